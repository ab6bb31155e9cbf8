//! The identifier-holding party of the intersection-sum protocol.

use std::collections::HashSet;
use std::sync::Arc;

use num_bigint_dig::BigUint;
use num_traits::Zero;
use psi_math::group::GroupParams;
use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};
use rayon::prelude::*;
use zeroize::Zeroizing;

use crate::paillier::{Ciphertext, PublicKey};
use crate::protocol::{validate_identifiers, Round1Message, Round2Message, Round3Message};
use crate::traits::Encrypter;
use crate::{Error, Result};

/// P1 contributes the identifier set `V` and, at the end of the run, learns
/// only the size of the intersection.
pub struct PartyOne {
    group: Arc<GroupParams>,
    identifiers: Vec<String>,
    /// The private blind key `k1`, never revealed.
    blind_key: Zeroizing<BigUint>,
    intersection_size: Option<usize>,
}

impl PartyOne {
    /// Sets up P1 with its identifier set and a fresh blind key.
    pub fn new<R: RngCore + CryptoRng>(
        group: &Arc<GroupParams>,
        identifiers: Vec<String>,
        rng: &mut R,
    ) -> Result<Self> {
        validate_identifiers(identifiers.iter().map(String::as_str))?;
        let blind_key = Zeroizing::new(group.random_exponent(rng));
        Ok(Self {
            group: group.clone(),
            identifiers,
            blind_key,
            intersection_size: None,
        })
    }

    /// Round 1: blinds every identifier as `H(v)^k1` and hands the shuffled
    /// list to P2.
    pub fn round1<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Round1Message {
        let mut elements: Vec<BigUint> = self
            .identifiers
            .par_iter()
            .map(|v| {
                self.group
                    .exponentiate(&self.group.hash_to_group(v), &self.blind_key)
            })
            .collect();
        // Shuffle only once the round output is fully materialized; the
        // permutation itself is not retained.
        elements.shuffle(rng);
        Round1Message { elements }
    }

    /// Round 3: completes the double blinding of P2's pairs, matches them
    /// against `Z`, and returns the re-randomized homomorphic sum of the
    /// weights at matching positions.
    ///
    /// With no matches the aggregate is a fresh encryption of zero. The
    /// intersection size is recorded and available through
    /// [`PartyOne::intersection_size`] afterwards.
    pub fn round3<R: RngCore + CryptoRng>(
        &mut self,
        public_key: &Arc<PublicKey>,
        round2: &Round2Message,
        rng: &mut R,
    ) -> Result<Round3Message> {
        // Fail closed on ciphertexts bound to a different key; summing them
        // would silently corrupt the aggregate.
        if round2.pairs.iter().any(|(_, ct)| ct.public_key() != public_key) {
            return Err(Error::foreign_ciphertext());
        }

        let doubly_blinded: Vec<BigUint> = round2
            .pairs
            .par_iter()
            .map(|(h, _)| self.group.exponentiate(h, &self.blind_key))
            .collect();

        let z: HashSet<&BigUint> = round2.z.iter().collect();
        let matching: Vec<&Ciphertext> = doubly_blinded
            .iter()
            .zip(&round2.pairs)
            .filter_map(|(h, (_, ct))| z.contains(h).then_some(ct))
            .collect();

        let sum = match matching.split_first() {
            Some((first, rest)) => {
                let mut acc = (*first).clone();
                for ct in rest {
                    acc = &acc + *ct;
                }
                acc
            }
            None => public_key.try_encrypt(&BigUint::zero(), rng)?,
        };
        let sum = sum.rerandomize(rng)?;

        self.intersection_size = Some(matching.len());
        Ok(Round3Message { sum })
    }

    /// The number of matched elements, known once Round 3 has completed.
    pub fn intersection_size(&self) -> Option<usize> {
        self.intersection_size
    }
}

#[cfg(test)]
mod tests {
    use super::PartyOne;
    use crate::paillier::generate_keys;
    use crate::protocol::{PartyTwo, Round2Message};
    use crate::Error;
    use psi_math::group::GroupParams;
    use rand::thread_rng;

    #[test]
    fn setup_validates_inputs() {
        let group = GroupParams::rfc3526_modp_2048_arc();
        let mut rng = thread_rng();
        assert!(PartyOne::new(&group, vec!["alice".to_string()], &mut rng).is_ok());
        assert!(PartyOne::new(&group, vec![], &mut rng).is_ok());
        assert!(
            PartyOne::new(&group, vec!["a".to_string(), "a".to_string()], &mut rng).is_err()
        );
        assert!(PartyOne::new(&group, vec![String::new()], &mut rng).is_err());
    }

    #[test]
    fn intersection_size_is_unknown_before_round3() {
        let group = GroupParams::rfc3526_modp_2048_arc();
        let mut rng = thread_rng();
        let p1 = PartyOne::new(&group, vec!["alice".to_string()], &mut rng).unwrap();
        assert_eq!(p1.intersection_size(), None);
    }

    #[test]
    fn round3_rejects_foreign_ciphertexts() {
        let group = GroupParams::rfc3526_modp_2048_arc();
        let mut rng = thread_rng();
        let mut p1 = PartyOne::new(&group, vec!["alice".to_string()], &mut rng).unwrap();
        let p2 = PartyTwo::new(&group, vec![("alice".to_string(), 3)], 256, &mut rng).unwrap();

        let round1 = p1.round1(&mut rng);
        let round2 = p2.round2(&round1, &mut rng).unwrap();

        // A key that is not the one the pairs were encrypted under.
        let (other_pk, _) = generate_keys(256, &mut rng).unwrap();
        let result = p1.round3(&other_pk, &round2, &mut rng);
        assert_eq!(result.unwrap_err(), Error::foreign_ciphertext());
    }

    #[test]
    fn round1_emits_one_element_per_identifier() {
        let group = GroupParams::rfc3526_modp_2048_arc();
        let mut rng = thread_rng();
        let ids: Vec<String> = (0..8).map(|i| format!("id-{}", i)).collect();
        let p1 = PartyOne::new(&group, ids, &mut rng).unwrap();
        let round1 = p1.round1(&mut rng);
        assert_eq!(round1.elements.len(), 8);
    }

    #[test]
    fn round3_handles_empty_round2() {
        let group = GroupParams::rfc3526_modp_2048_arc();
        let mut rng = thread_rng();
        let mut p1 = PartyOne::new(&group, vec!["alice".to_string()], &mut rng).unwrap();
        let (pk, _) = generate_keys(256, &mut rng).unwrap();
        let round2 = Round2Message {
            z: vec![],
            pairs: vec![],
        };
        let round3 = p1.round3(&pk, &round2, &mut rng).unwrap();
        assert_eq!(p1.intersection_size(), Some(0));
        assert_eq!(round3.sum.public_key(), &pk);
    }
}
