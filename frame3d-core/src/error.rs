/// Error types for the opt-in checked operations
use thiserror::Error;

/// Failure of a checked math operation.
///
/// The unchecked operations (`normalize`, `invert`) never produce this; they
/// keep their silent IEEE / no-op behavior.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// The matrix has a determinant of exactly zero.
    #[error("matrix is singular (determinant {determinant})")]
    Singular { determinant: f32 },

    /// The vector has zero length and has no direction.
    #[error("vector has zero length")]
    ZeroLength,
}

/// A vector literal could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid vector literal {input:?}: expected three numbers")]
pub struct ParseVectorError {
    pub input: String,
}

impl ParseVectorError {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}
