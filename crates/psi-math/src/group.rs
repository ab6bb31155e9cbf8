//! Fixed-parameter subgroup of a safe-prime field, used for blind matching.

use std::fmt::Debug;
use std::sync::Arc;

use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// The RFC 3526 MODP-2048 prime.
const RFC3526_MODP_2048_P: &str = concat!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1",
    "29024E088A67CC74020BBEA63B139B22514A08798E3404DD",
    "EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245",
    "E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED",
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D",
    "C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F",
    "83655D23DCA3AD961C62F356208552BB9ED529077096966D",
    "670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B",
    "E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9",
    "DE2BCBF6955817183995497CEA956AE515D2261898FA0510",
    "15728E5A8AACAA68FFFFFFFFFFFFFFFF"
);

/// The generator of the order-q subgroup of the RFC 3526 MODP-2048 group.
const RFC3526_MODP_2048_G: u32 = 2;

/// Parameters of a subgroup of prime order `q = (p - 1) / 2` inside the
/// multiplicative group modulo the safe prime `p`, generated by `g`.
///
/// Parameters are immutable once constructed and are meant to be shared as an
/// `Arc` and injected into every component that needs group arithmetic.
#[derive(Clone, PartialEq, Eq)]
pub struct GroupParams {
    /// The safe-prime modulus.
    p: BigUint,
    /// The subgroup order, `(p - 1) / 2`.
    q: BigUint,
    /// The subgroup generator.
    g: BigUint,
}

impl Debug for GroupParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupParams")
            .field("modulus_bits", &self.p.bits())
            .field("generator", &self.g)
            .finish()
    }
}

impl GroupParams {
    /// Creates group parameters from a safe-prime modulus and a generator.
    ///
    /// The subgroup order is derived as `(p - 1) / 2`. Primality of `p` is
    /// not re-verified here; callers are expected to pass standardized
    /// constants such as [`GroupParams::rfc3526_modp_2048`].
    pub fn new(p: BigUint, g: BigUint) -> Result<Self> {
        if (&p & BigUint::one()).is_zero() || p.bits() < 3 {
            return Err(Error::InvalidGroupParameters(
                "The modulus must be an odd prime".to_string(),
            ));
        }
        if g < BigUint::from(2u32) || g >= p {
            return Err(Error::InvalidGroupParameters(
                "The generator must lie in [2, p - 1)".to_string(),
            ));
        }
        let q = (&p - BigUint::one()) >> 1;
        Ok(Self { p, q, g })
    }

    /// Creates the RFC 3526 MODP-2048 group with generator 2.
    pub fn rfc3526_modp_2048() -> Self {
        let p = BigUint::parse_bytes(RFC3526_MODP_2048_P.as_bytes(), 16)
            .expect("RFC 3526 MODP-2048 constant is valid hex");
        Self::new(p, BigUint::from(RFC3526_MODP_2048_G))
            .expect("RFC 3526 MODP-2048 constants describe a valid group")
    }

    /// Creates the RFC 3526 MODP-2048 group in an `Arc`.
    pub fn rfc3526_modp_2048_arc() -> Arc<Self> {
        Arc::new(Self::rfc3526_modp_2048())
    }

    /// Returns the modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Returns the subgroup order `q`.
    pub fn order(&self) -> &BigUint {
        &self.q
    }

    /// Returns the generator `g`.
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// Computes `base^exponent mod p` by fast modular exponentiation.
    pub fn exponentiate(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.p)
    }

    /// Draws a uniform exponent in `[1, q - 1]`, suitable as a blind key.
    pub fn random_exponent<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_range(&BigUint::one(), &self.q)
    }

    /// Deterministically maps an identifier into the subgroup.
    ///
    /// The SHA-256 digest of the UTF-8 encoding is reduced modulo `q`; a zero
    /// reduction is replaced by 1 to avoid the degenerate exponent. The
    /// result is `g` raised to that exponent, so identical identifiers always
    /// map to identical group elements.
    pub fn hash_to_group(&self, identifier: &str) -> BigUint {
        let digest = Sha256::digest(identifier.as_bytes());
        let mut x = BigUint::from_bytes_be(&digest) % &self.q;
        if x.is_zero() {
            x = BigUint::one();
        }
        self.g.modpow(&x, &self.p)
    }
}
