//! The three-round private intersection-sum protocol.
//!
//! - **Setup**: each party draws a private blind key in `[1, q - 1]`; P2
//!   generates a Paillier key pair and publishes the public key.
//! - **Round 1**: P1 sends the shuffled list of `H(v)^k1` for its
//!   identifiers `v`.
//! - **Round 2**: P2 raises every received element to `k2` (the set `Z`,
//!   shuffled again) and separately sends shuffled pairs
//!   `(H(w)^k2, Enc(pk, t))` for its weighted entries `(w, t)`.
//! - **Round 3**: P1 raises the first component of every pair to `k1`; by
//!   commutativity of exponentiation a common identifier produces the same
//!   `H(·)^(k1·k2)` value in both lists, so P1 matches against `Z`,
//!   homomorphically sums the matching ciphertexts, re-randomizes the
//!   aggregate and returns it.
//! - **Output**: P2 decrypts the aggregate, learning the intersection-sum.
//!
//! Each round's message set is permuted independently before transmission and
//! the permutations are discarded, so neither party can correlate positions
//! across rounds. Identifiers themselves never cross the wire.

mod party_one;
mod party_two;

pub use party_one::PartyOne;
pub use party_two::PartyTwo;

use std::sync::Arc;

use itertools::Itertools;
use num_bigint_dig::BigUint;
use psi_math::group::GroupParams;
use rand::{CryptoRng, RngCore};

use crate::paillier::Ciphertext;
use crate::{Error, Result};

/// Round 1 message, P1 to P2: the blinded images of P1's identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round1Message {
    /// `H(v)^k1` for every identifier `v` of P1, in shuffled order.
    pub elements: Vec<BigUint>,
}

/// Round 2 message, P2 to P1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round2Message {
    /// The doubly blinded images `H(v)^(k1·k2)` of P1's set, in shuffled
    /// order.
    pub z: Vec<BigUint>,
    /// `(H(w)^k2, Enc(pk, t))` for every entry `(w, t)` of P2, in shuffled
    /// order.
    pub pairs: Vec<(BigUint, Ciphertext)>,
}

/// Round 3 message, P1 to P2: the re-randomized homomorphic aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round3Message {
    /// An encryption of the sum of the weights over the intersection.
    pub sum: Ciphertext,
}

/// The result of a complete protocol run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionSum {
    /// The decrypted sum of the weights over the intersection (P2's view).
    pub sum: BigUint,
    /// The number of matched elements (P1's view).
    pub intersection_size: usize,
}

/// Validates a party's identifier collection: no empty strings, all distinct.
pub(crate) fn validate_identifiers<'a, I>(mut identifiers: I) -> Result<()>
where
    I: Iterator<Item = &'a str> + Clone,
{
    for (index, id) in identifiers.clone().enumerate() {
        if id.is_empty() {
            return Err(Error::empty_identifier(index));
        }
    }
    if !identifiers.all_unique() {
        return Err(Error::duplicate_identifier());
    }
    Ok(())
}

/// Runs the complete three-round protocol between two in-process parties.
///
/// Empty inputs are valid and yield an empty intersection with sum 0. A run
/// either completes through the output or aborts with an error before any
/// result is produced.
pub fn run<R: RngCore + CryptoRng>(
    group: &Arc<GroupParams>,
    identifiers: Vec<String>,
    entries: Vec<(String, u64)>,
    key_bits: usize,
    rng: &mut R,
) -> Result<IntersectionSum> {
    let mut p1 = PartyOne::new(group, identifiers, rng)?;
    let p2 = PartyTwo::new(group, entries, key_bits, rng)?;

    let round1 = p1.round1(rng);
    let round2 = p2.round2(&round1, rng)?;
    let round3 = p1.round3(p2.public_key(), &round2, rng)?;
    let sum = p2.output(&round3)?;

    let intersection_size = p1
        .intersection_size()
        .ok_or_else(|| Error::DefaultError("Protocol did not reach Round 3".to_string()))?;

    Ok(IntersectionSum {
        sum,
        intersection_size,
    })
}

#[cfg(test)]
mod tests {
    use super::validate_identifiers;
    use crate::Error;

    #[test]
    fn identifier_validation() {
        assert!(validate_identifiers(["alice", "bob"].into_iter()).is_ok());
        assert!(validate_identifiers(std::iter::empty::<&str>()).is_ok());
        assert_eq!(
            validate_identifiers(["alice", ""].into_iter()),
            Err(Error::empty_identifier(1))
        );
        assert_eq!(
            validate_identifiers(["alice", "bob", "alice"].into_iter()),
            Err(Error::duplicate_identifier())
        );
    }
}
