//! Two-party private intersection-sum in Rust.
//!
//! Party one holds a set of identifiers; party two holds a set of
//! (identifier, weight) pairs. After a three-round exchange, party two learns
//! the sum of the weights over the identifiers both parties hold, and nothing
//! else; party one learns only the size of the intersection.
//!
//! The construction combines a Diffie-Hellman-style blind-matching scheme
//! over the RFC 3526 MODP-2048 group (see [`psi_math::group`]) with the
//! additively homomorphic Paillier cryptosystem (see [`paillier`]). Every
//! round's message set is independently shuffled before transmission so that
//! recipients cannot correlate positions with inputs.

mod errors;
pub mod paillier;
pub mod protocol;
pub mod traits;

pub use errors::{Error, Result};
