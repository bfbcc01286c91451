use thiserror::Error;

pub type SgResult<T> = Result<T, SgError>;

/// Broad classification of an [`SgError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected when building a value.
    Validation,
    /// Operation undefined for the operands it was given.
    Arithmetic,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SgError {
    #[error("Negative uncertainty: {value}")]
    NegativeUncertainty { value: f64 },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Division by zero: {what}")]
    DivisionByZero { what: &'static str },

    #[error("Undefined angle unit: {unit:?}")]
    UndefinedUnit { unit: String },
}

impl SgError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NegativeUncertainty { .. } | Self::NonFinite { .. } | Self::InvalidArg { .. } => {
                ErrorKind::Validation
            }
            Self::DivisionByZero { .. } | Self::UndefinedUnit { .. } => ErrorKind::Arithmetic,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_arithmetic(&self) -> bool {
        self.kind() == ErrorKind::Arithmetic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        assert!(SgError::NegativeUncertainty { value: -1.0 }.is_validation());
        assert!(SgError::InvalidArg { what: "x" }.is_validation());
        assert!(SgError::DivisionByZero { what: "x" }.is_arithmetic());
        assert!(
            SgError::UndefinedUnit {
                unit: "grad".to_string()
            }
            .is_arithmetic()
        );
    }

    #[test]
    fn messages_name_the_problem() {
        let msg = format!("{}", SgError::NegativeUncertainty { value: -0.5 });
        assert!(msg.contains("Negative uncertainty"));
        assert!(msg.contains("-0.5"));

        let msg = format!(
            "{}",
            SgError::UndefinedUnit {
                unit: "grad".to_string()
            }
        );
        assert!(msg.contains("\"grad\""));
    }
}
