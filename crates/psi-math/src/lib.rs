//! Mathematical utilities for the psi.rs library.
//!
//! This crate provides the fixed-parameter finite-field group used for blind
//! matching, the deterministic hash-to-group map, and probabilistic prime
//! generation for the Paillier cryptosystem.

mod errors;
pub mod group;
pub mod primes;

pub use errors::{Error, Result};
