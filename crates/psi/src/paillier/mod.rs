//! The Paillier additively homomorphic encryption scheme.
//!
//! Plaintexts are integers modulo `n`; ciphertexts are integers modulo `n²`.
//! Multiplying two ciphertexts yields an encryption of the sum of their
//! plaintexts, which is the sole algebraic property the intersection-sum
//! protocol relies on. Ciphertexts can additionally be re-randomized so that
//! an aggregate released to the other party is unlinkable to the ciphertexts
//! it was combined from.

mod ciphertext;
mod keys;

pub use ciphertext::Ciphertext;
pub use keys::{generate_keys, PublicKey, SecretKey, DEFAULT_KEY_BITS};
