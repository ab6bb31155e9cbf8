//! Probabilistic generation of large primes.

use num_bigint_dig::{prime::probably_prime, BigUint, RandBigInt};
use num_traits::One;
use rand::{CryptoRng, RngCore};

use crate::{Error, Result};

/// Number of Miller-Rabin rounds used by the primality test.
pub const MILLER_RABIN_ROUNDS: usize = 16;

/// Attempt budget per requested bit of the prime.
const ATTEMPTS_PER_BIT: usize = 64;

/// Generates a probable prime of exactly `bits` bits.
///
/// Candidates are drawn uniformly with the top and bottom bits forced, and
/// accepted once they pass [`MILLER_RABIN_ROUNDS`] rounds of Miller-Rabin.
/// The search is bounded; exhausting the budget returns
/// [`Error::PrimeGenerationExhausted`] instead of looping forever.
pub fn generate_prime<R: RngCore + CryptoRng>(bits: usize, rng: &mut R) -> Result<BigUint> {
    if bits < 2 {
        return Err(Error::InvalidBitLength(bits));
    }

    let max_attempts = ATTEMPTS_PER_BIT * bits;
    for _ in 0..max_attempts {
        let mut candidate = rng.gen_biguint(bits);
        candidate |= BigUint::one() << (bits - 1);
        candidate |= BigUint::one();
        if probably_prime(&candidate, MILLER_RABIN_ROUNDS) {
            return Ok(candidate);
        }
    }

    Err(Error::PrimeGenerationExhausted(max_attempts))
}
