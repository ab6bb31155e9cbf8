//! Error types for the psi-math crate.

use thiserror::Error;

/// The errors that can occur in the psi-math crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A generic error.
    #[error("{0}")]
    Default(String),

    /// The group parameters do not describe a usable group.
    #[error("Invalid group parameters: {0}")]
    InvalidGroupParameters(String),

    /// The prime search used up its attempt budget without finding a prime.
    #[error("Prime generation exhausted after {0} attempts")]
    PrimeGenerationExhausted(usize),

    /// The requested bit length cannot be sampled.
    #[error("Invalid bit length: {0}")]
    InvalidBitLength(usize),
}

/// The Result type for the psi-math crate.
pub type Result<T> = std::result::Result<T, Error>;
