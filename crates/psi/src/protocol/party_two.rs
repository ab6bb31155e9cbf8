//! The weight-holding party of the intersection-sum protocol.

use std::sync::Arc;

use num_bigint_dig::BigUint;
use psi_math::group::GroupParams;
use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};
use rayon::prelude::*;
use zeroize::Zeroizing;

use crate::paillier::{generate_keys, PublicKey, SecretKey};
use crate::protocol::{validate_identifiers, Round1Message, Round2Message, Round3Message};
use crate::traits::{Decrypter, Encrypter};
use crate::{Error, Result};

/// P2 contributes the weighted entries `W` and, at the end of the run,
/// learns only the sum of the weights over the intersection.
pub struct PartyTwo {
    group: Arc<GroupParams>,
    entries: Vec<(String, u64)>,
    /// The private blind key `k2`, never revealed.
    blind_key: Zeroizing<BigUint>,
    public_key: Arc<PublicKey>,
    secret_key: SecretKey,
}

impl PartyTwo {
    /// Sets up P2 with its weighted entries, a fresh blind key, and a fresh
    /// Paillier key pair of `key_bits` bits.
    ///
    /// Weights must be positive; the identifiers must be distinct and
    /// non-empty. Violations abort before Setup.
    pub fn new<R: RngCore + CryptoRng>(
        group: &Arc<GroupParams>,
        entries: Vec<(String, u64)>,
        key_bits: usize,
        rng: &mut R,
    ) -> Result<Self> {
        validate_identifiers(entries.iter().map(|(w, _)| w.as_str()))?;
        if let Some((w, _)) = entries.iter().find(|(_, t)| *t == 0) {
            return Err(Error::invalid_weight(w));
        }

        let blind_key = Zeroizing::new(group.random_exponent(rng));
        let (public_key, secret_key) = generate_keys(key_bits, rng)?;
        Ok(Self {
            group: group.clone(),
            entries,
            blind_key,
            public_key,
            secret_key,
        })
    }

    /// The Paillier public key made available to P1 during Setup. The secret
    /// key never leaves P2.
    pub fn public_key(&self) -> &Arc<PublicKey> {
        &self.public_key
    }

    /// Round 2: raises every received element to `k2` (the set `Z`) and
    /// builds the blinded-and-encrypted pairs `(H(w)^k2, Enc(pk, t))` for its
    /// own entries.
    ///
    /// `Z` and the pairs are shuffled with permutations drawn independently
    /// of each other and of the Round 1 permutation.
    pub fn round2<R: RngCore + CryptoRng>(
        &self,
        round1: &Round1Message,
        rng: &mut R,
    ) -> Result<Round2Message> {
        let mut z: Vec<BigUint> = round1
            .elements
            .par_iter()
            .map(|x| self.group.exponentiate(x, &self.blind_key))
            .collect();
        z.shuffle(rng);

        let blinded: Vec<BigUint> = self
            .entries
            .par_iter()
            .map(|(w, _)| {
                self.group
                    .exponentiate(&self.group.hash_to_group(w), &self.blind_key)
            })
            .collect();
        let mut pairs = blinded
            .into_iter()
            .zip(&self.entries)
            .map(|(h, (_, t))| {
                Ok((h, self.public_key.try_encrypt(&BigUint::from(*t), rng)?))
            })
            .collect::<Result<Vec<_>>>()?;
        pairs.shuffle(rng);

        Ok(Round2Message { z, pairs })
    }

    /// Output: decrypts the aggregate received in Round 3, yielding the sum
    /// of the weights over the intersection.
    pub fn output(&self, round3: &Round3Message) -> Result<BigUint> {
        self.secret_key.try_decrypt(&round3.sum)
    }
}
