//! LabZen Tools module
//!
//! Tool implementations behind the MCP server and the CLI.

pub mod assembly;
pub mod conversions;
pub mod molarity;
pub mod protein_assay;
pub mod reagents;
pub mod status;

use serde::Serialize;

use crate::error::{CalcError, ErrorKind};

/// Body returned in place of a result when a calculation fails
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_kind: ErrorKind,
}

impl From<&CalcError> for ErrorResponse {
    fn from(err: &CalcError) -> Self {
        Self {
            error: err.to_string(),
            error_kind: err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_json() {
        let err = CalcError::DivisionByZero { divisor: "volume" };
        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert_eq!(json["error_kind"], "DivisionByZero");
        assert_eq!(json["error"], "Cannot divide by zero: volume is 0");
    }
}
