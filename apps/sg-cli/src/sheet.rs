//! Measurement worksheets: named quantities followed by derived steps.
//!
//! Steps may only reference ids defined above them, so a sheet evaluates in a
//! single top-to-bottom pass.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sg_core::{Real, SgError, SgResult};
use sg_values::{Angle, AngleConfig, UncertainValue, stats};
use tracing::{debug, info};

pub const LATEST_VERSION: u32 = 1;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(thiserror::Error, Debug)]
pub enum SheetError {
    #[error("Duplicate ID: {id}")]
    DuplicateId { id: String },

    #[error("Missing reference: {id} in step {step}")]
    MissingReference { id: String, step: String },

    #[error("Invalid step {step}: {reason}")]
    InvalidStep { step: String, reason: &'static str },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Evaluation of {id} failed: {source}")]
    Value {
        id: String,
        #[source]
        source: SgError,
    },

    #[error(transparent)]
    Core(#[from] SgError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sheet {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub angles: AngleConfig,
    #[serde(default)]
    pub quantities: Vec<QuantityDef>,
    #[serde(default)]
    pub steps: Vec<StepDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuantityDef {
    pub id: String,
    pub value: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<Real>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepDef {
    pub id: String,
    #[serde(flatten)]
    pub op: OpDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OpDef {
    Add { lhs: String, rhs: String },
    Subtract { lhs: String, rhs: String },
    Multiply { lhs: String, rhs: String },
    Divide { lhs: String, rhs: String },
    Power { base: String, exponent: Real },
    Scale { input: String, factor: Real },
    /// Input is read as an angle in the sheet's angle unit.
    Sin { input: String },
    Cos { input: String },
    Tan { input: String },
    WeightedAverage { inputs: Vec<String> },
}

impl OpDef {
    pub fn inputs(&self) -> Vec<&str> {
        match self {
            Self::Add { lhs, rhs }
            | Self::Subtract { lhs, rhs }
            | Self::Multiply { lhs, rhs }
            | Self::Divide { lhs, rhs } => vec![lhs.as_str(), rhs.as_str()],
            Self::Power { base, .. } => vec![base.as_str()],
            Self::Scale { input, .. }
            | Self::Sin { input }
            | Self::Cos { input }
            | Self::Tan { input } => vec![input.as_str()],
            Self::WeightedAverage { inputs } => inputs.iter().map(String::as_str).collect(),
        }
    }
}

/// One evaluated quantity or step, in sheet order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Evaluated {
    pub id: String,
    pub result: UncertainValue,
}

pub fn validate_sheet(sheet: &Sheet) -> SheetResult<()> {
    if sheet.version > LATEST_VERSION {
        return Err(SheetError::UnsupportedVersion {
            version: sheet.version,
        });
    }

    let mut known = HashSet::new();
    for quantity in &sheet.quantities {
        if !known.insert(quantity.id.as_str()) {
            return Err(SheetError::DuplicateId {
                id: quantity.id.clone(),
            });
        }
    }

    for step in &sheet.steps {
        let inputs = step.op.inputs();
        if inputs.is_empty() {
            return Err(SheetError::InvalidStep {
                step: step.id.clone(),
                reason: "no inputs",
            });
        }
        for input in inputs {
            if !known.contains(input) {
                return Err(SheetError::MissingReference {
                    id: input.to_string(),
                    step: step.id.clone(),
                });
            }
        }
        if !known.insert(step.id.as_str()) {
            return Err(SheetError::DuplicateId {
                id: step.id.clone(),
            });
        }
    }
    Ok(())
}

pub fn from_yaml_str(content: &str) -> SheetResult<Sheet> {
    let sheet: Sheet = serde_yaml::from_str(content)?;
    validate_sheet(&sheet)?;
    Ok(sheet)
}

pub fn load_yaml(path: &Path) -> SheetResult<Sheet> {
    let content = std::fs::read_to_string(path)?;
    let sheet = from_yaml_str(&content)?;
    info!(
        path = %path.display(),
        quantities = sheet.quantities.len(),
        steps = sheet.steps.len(),
        "loaded sheet"
    );
    Ok(sheet)
}

pub fn evaluate(sheet: &Sheet) -> SheetResult<Vec<Evaluated>> {
    validate_sheet(sheet)?;

    let mut env: HashMap<&str, UncertainValue> = HashMap::new();
    let mut results = Vec::with_capacity(sheet.quantities.len() + sheet.steps.len());

    for quantity in &sheet.quantities {
        let value = UncertainValue::new(quantity.value, quantity.uncertainty).map_err(|source| {
            SheetError::Value {
                id: quantity.id.clone(),
                source,
            }
        })?;
        env.insert(&quantity.id, value);
        results.push(Evaluated {
            id: quantity.id.clone(),
            result: value,
        });
    }

    for step in &sheet.steps {
        let value = apply(&step.op, &env, sheet.angles).map_err(|source| SheetError::Value {
            id: step.id.clone(),
            source,
        })?;
        debug!(step = %step.id, result = %value, "evaluated step");
        env.insert(&step.id, value);
        results.push(Evaluated {
            id: step.id.clone(),
            result: value,
        });
    }
    Ok(results)
}

fn lookup(env: &HashMap<&str, UncertainValue>, id: &str) -> SgResult<UncertainValue> {
    env.get(id).copied().ok_or(SgError::InvalidArg {
        what: "unresolved reference",
    })
}

fn apply(
    op: &OpDef,
    env: &HashMap<&str, UncertainValue>,
    angles: AngleConfig,
) -> SgResult<UncertainValue> {
    let angle = |id: &str| lookup(env, id).and_then(|v| Angle::from_magnitude(v, angles));

    match op {
        OpDef::Add { lhs, rhs } => lookup(env, lhs)?.plus(&lookup(env, rhs)?),
        OpDef::Subtract { lhs, rhs } => lookup(env, lhs)?.minus(&lookup(env, rhs)?),
        OpDef::Multiply { lhs, rhs } => lookup(env, lhs)?.times(&lookup(env, rhs)?),
        OpDef::Divide { lhs, rhs } => lookup(env, lhs)?.divide(&lookup(env, rhs)?),
        OpDef::Power { base, exponent } => lookup(env, base)?.powf(*exponent),
        OpDef::Scale { input, factor } => lookup(env, input)?.scale(*factor),
        OpDef::Sin { input } => Ok(angle(input.as_str())?.sin()),
        OpDef::Cos { input } => Ok(angle(input.as_str())?.cos()),
        OpDef::Tan { input } => angle(input.as_str())?.tan(),
        OpDef::WeightedAverage { inputs } => {
            let values = inputs
                .iter()
                .map(|id| lookup(env, id))
                .collect::<SgResult<Vec<_>>>()?;
            stats::weighted_average(&values)
        }
    }
}
