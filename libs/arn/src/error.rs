//! Error types for ARN parsing and validation.

use thiserror::Error;

/// Errors that can occur when parsing or validating ARNs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArnError {
    /// The ARN has fewer than six colon-separated pieces.
    #[error("malformed ARN")]
    Malformed,

    /// The ARN contains a `${...}` policy variable.
    #[error("policy variables are not supported")]
    VariablesNotSupported,
}

impl ArnError {
    /// Returns true if the input did not have the minimal ARN structure.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ArnError::Malformed)
    }

    /// Returns true if the input was rejected for containing a policy variable.
    pub fn is_variables_not_supported(&self) -> bool {
        matches!(self, ArnError::VariablesNotSupported)
    }
}
