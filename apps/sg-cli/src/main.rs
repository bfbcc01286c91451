use clap::{Parser, Subcommand};
use sg_core::{LabelStyle, round_to_sig_figs};
use sg_values::UncertainValue;
use std::path::{Path, PathBuf};

mod sheet;

use sheet::SheetResult;

#[derive(Parser)]
#[command(name = "sg-cli")]
#[command(about = "Sigma CLI - measurement uncertainty worksheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate worksheet syntax and references
    Validate {
        /// Path to the worksheet YAML file
        sheet_path: PathBuf,
    },
    /// Evaluate every quantity and step of a worksheet
    Eval {
        /// Path to the worksheet YAML file
        sheet_path: PathBuf,
        /// Use "+/-" instead of "±"
        #[arg(long)]
        ascii: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Round a number to significant figures
    Round {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Number of significant figures
        digits: u32,
    },
    /// Compare two measurements given as value/uncertainty pairs
    Compare {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        a_uncertainty: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
        b_uncertainty: f64,
    },
}

fn main() -> SheetResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { sheet_path } => cmd_validate(&sheet_path),
        Commands::Eval {
            sheet_path,
            ascii,
            json,
        } => cmd_eval(&sheet_path, ascii, json),
        Commands::Round { value, digits } => {
            println!("{}", round_to_sig_figs(value, digits));
            Ok(())
        }
        Commands::Compare {
            a,
            a_uncertainty,
            b,
            b_uncertainty,
        } => cmd_compare(a, a_uncertainty, b, b_uncertainty),
    }
}

fn cmd_validate(sheet_path: &Path) -> SheetResult<()> {
    println!("Validating sheet: {}", sheet_path.display());
    let sheet = sheet::load_yaml(sheet_path)?;
    println!(
        "✓ Sheet is valid ({} quantities, {} steps)",
        sheet.quantities.len(),
        sheet.steps.len()
    );
    Ok(())
}

fn cmd_eval(sheet_path: &Path, ascii: bool, json: bool) -> SheetResult<()> {
    let sheet = sheet::load_yaml(sheet_path)?;
    let results = sheet::evaluate(&sheet)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let style = if ascii {
        LabelStyle::Ascii
    } else {
        LabelStyle::Unicode
    };
    let width = results.iter().map(|r| r.id.len()).max().unwrap_or(0);
    println!("{}", sheet.name);
    for r in &results {
        println!("  {:<width$}  {}", r.id, r.result.label_with(style));
    }
    Ok(())
}

fn cmd_compare(a: f64, a_uncertainty: f64, b: f64, b_uncertainty: f64) -> SheetResult<()> {
    let a = UncertainValue::with_uncertainty(a, a_uncertainty)?;
    let b = UncertainValue::with_uncertainty(b, b_uncertainty)?;
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    println!("a = {a}");
    println!("b = {b}");
    println!("Equivalent within uncertainty: {}", yes_no(a.is_equivalent_to(&b)));
    println!("Exactly equal:                 {}", yes_no(a == b));
    println!("Ordering:                      {:?}", a.statistical_cmp(&b));
    Ok(())
}
