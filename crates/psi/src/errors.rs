//! Error types for the psi crate.

use thiserror::Error;

/// The errors that can occur in the psi crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An error in the underlying mathematical operations.
    #[error("Mathematical error: {0}")]
    MathError(#[from] psi_math::Error),

    /// Too few values were provided.
    #[error("Too few values provided: {0} is below limit {1}")]
    TooFewValues(usize, usize),

    /// An input did not satisfy the protocol preconditions.
    #[error("Unspecified input: {0}")]
    UnspecifiedInput(String),

    /// A generic error.
    #[error("{0}")]
    DefaultError(String),
}

/// The Result type for the psi crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Helper functions to create protocol-specific errors.
impl Error {
    /// Create an empty identifier error.
    pub fn empty_identifier(index: usize) -> Self {
        Self::UnspecifiedInput(format!("Identifier at index {} is empty", index))
    }

    /// Create a duplicate identifier error.
    pub fn duplicate_identifier() -> Self {
        Self::UnspecifiedInput("Identifiers must be distinct".to_string())
    }

    /// Create an invalid weight error.
    pub fn invalid_weight(identifier: &str) -> Self {
        Self::UnspecifiedInput(format!(
            "Weight for identifier {} must be positive",
            identifier
        ))
    }

    /// Create a key generation exhausted error.
    pub fn key_generation_exhausted(attempts: usize) -> Self {
        Self::DefaultError(format!("Key generation failed after {} attempts", attempts))
    }

    /// Create a randomizer exhausted error.
    pub fn randomizer_exhausted(attempts: usize) -> Self {
        Self::DefaultError(format!(
            "No randomizer coprime to the modulus found after {} attempts",
            attempts
        ))
    }

    /// Create a foreign ciphertext error.
    pub fn foreign_ciphertext() -> Self {
        Self::DefaultError("Ciphertext is bound to a different public key".to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    #[test]
    fn test_error_helpers() {
        let error = Error::empty_identifier(3);
        assert_eq!(error.to_string(), "Unspecified input: Identifier at index 3 is empty");

        let error = Error::invalid_weight("bob");
        assert_eq!(
            error.to_string(),
            "Unspecified input: Weight for identifier bob must be positive"
        );

        let error = Error::key_generation_exhausted(8);
        assert_eq!(error.to_string(), "Key generation failed after 8 attempts");

        let error = Error::TooFewValues(0, 1);
        assert_eq!(
            error.to_string(),
            "Too few values provided: 0 is below limit 1"
        );
    }

    #[test]
    fn test_math_error_conversion() {
        let error: Error = psi_math::Error::InvalidBitLength(1).into();
        assert_eq!(error.to_string(), "Mathematical error: Invalid bit length: 1");
    }
}
