//! Calculation errors
//!
//! Every failure is a local validation failure. Nothing is retried and no
//! error is fatal; the caller renders the message.

use serde::Serialize;
use thiserror::Error;

/// Calculation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Unrecognized {family} unit: '{symbol}'")]
    InvalidUnit { family: &'static str, symbol: String },

    #[error("Molecular weight must be greater than 0 (got {0})")]
    InvalidMolecularWeight(f64),

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Cannot divide by zero: {divisor} is 0")]
    DivisionByZero { divisor: &'static str },

    #[error("Unknown reagent: '{0}'")]
    UnknownReagent(String),

    #[error("Not enough data: {0}")]
    InsufficientData(String),

    #[error("Invalid protocol: {0}")]
    InvalidProtocol(String),
}

/// Serializable error kind for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidUnit,
    InvalidMolecularWeight,
    InvalidInput,
    DivisionByZero,
    UnknownReagent,
    InsufficientData,
    InvalidProtocol,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InvalidUnit { .. } => ErrorKind::InvalidUnit,
            CalcError::InvalidMolecularWeight(_) => ErrorKind::InvalidMolecularWeight,
            CalcError::InvalidInput { .. } => ErrorKind::InvalidInput,
            CalcError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            CalcError::UnknownReagent(_) => ErrorKind::UnknownReagent,
            CalcError::InsufficientData(_) => ErrorKind::InsufficientData,
            CalcError::InvalidProtocol(_) => ErrorKind::InvalidProtocol,
        }
    }

    pub(crate) fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for calculations
pub type CalcResult<T> = Result<T, CalcError>;

/// Reject negative, NaN and infinite inputs
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(value)
}

/// Reject results that overflowed to infinity
pub(crate) fn ensure_finite_result(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, "result is out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            CalcError::DivisionByZero { divisor: "volume" }.kind(),
            ErrorKind::DivisionByZero
        );
        assert_eq!(
            CalcError::UnknownReagent("HEPES".into()).kind(),
            ErrorKind::UnknownReagent
        );
    }

    #[test]
    fn test_messages() {
        let err = CalcError::InvalidUnit {
            family: "volume",
            symbol: "cup".into(),
        };
        assert_eq!(err.to_string(), "Unrecognized volume unit: 'cup'");
        assert_eq!(
            CalcError::InvalidMolecularWeight(0.0).to_string(),
            "Molecular weight must be greater than 0 (got 0)"
        );
    }

    #[test]
    fn test_ensure_non_negative() {
        assert_eq!(ensure_non_negative("mass", 0.0), Ok(0.0));
        assert!(matches!(
            ensure_non_negative("mass", -1.0),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            ensure_non_negative("mass", f64::NAN),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(ensure_finite_result("mass", f64::INFINITY).is_err());
    }
}
