//! Public and secret keys for the Paillier encryption scheme.

use std::fmt::Debug;
use std::sync::Arc;

use num_bigint_dig::{BigUint, ModInverse, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use psi_math::primes::generate_prime;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::paillier::Ciphertext;
use crate::traits::{Decrypter, Encrypter, Parametrized};
use crate::{Error, Result};

/// Default Paillier modulus size in bits.
///
/// 512 bits keeps protocol runs fast but is below modern security
/// recommendations; production callers should pass a larger size to
/// [`generate_keys`].
pub const DEFAULT_KEY_BITS: usize = 512;

/// Full key generations attempted before giving up.
const KEYGEN_MAX_ATTEMPTS: usize = 8;

/// Draws of a randomizer coprime to `n` attempted before giving up.
const RANDOMIZER_MAX_ATTEMPTS: usize = 64;

/// Public key for the Paillier encryption scheme.
///
/// The public key doubles as the parameter object shared by all ciphertexts
/// produced under it, so it is handed around as an `Arc<PublicKey>`.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// The modulus `n = p * q`.
    pub(crate) n: BigUint,
    /// The ciphertext modulus `n²`.
    pub(crate) n_squared: BigUint,
    /// The generator, fixed to `n + 1`.
    pub(crate) g: BigUint,
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("modulus_bits", &self.n.bits())
            .finish()
    }
}

impl PublicKey {
    /// Returns the modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Returns the ciphertext modulus `n²`.
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Returns the generator `g = n + 1`.
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// Draws a randomizer in `[1, n)` coprime to `n`.
    ///
    /// A draw that shares a factor with `n` is retried transparently; the
    /// search is bounded so a degenerate modulus cannot loop forever.
    pub(crate) fn sample_randomizer<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<BigUint> {
        for _ in 0..RANDOMIZER_MAX_ATTEMPTS {
            let r = rng.gen_biguint_range(&BigUint::one(), &self.n);
            if r.gcd(&self.n).is_one() {
                return Ok(r);
            }
        }
        Err(Error::randomizer_exhausted(RANDOMIZER_MAX_ATTEMPTS))
    }
}

/// Secret key for the Paillier encryption scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    /// The public key this secret key belongs to.
    pub(crate) par: Arc<PublicKey>,
    /// `λ = lcm(p - 1, q - 1)`.
    pub(crate) lambda: BigUint,
    /// `μ = L(g^λ mod n²)⁻¹ mod n`, with `L(u) = (u - 1) / n`.
    pub(crate) mu: BigUint,
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.lambda.zeroize();
        self.mu.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey").field("par", &self.par).finish()
    }
}

impl SecretKey {
    /// Returns the public key associated with this secret key.
    pub fn public_key(&self) -> &Arc<PublicKey> {
        &self.par
    }
}

/// Generates a Paillier key pair with a modulus of `bit_length` bits.
///
/// Two independent `bit_length / 2`-bit probable primes are drawn; colliding
/// primes, and the rare case where the decryption constant `μ` has no inverse
/// modulo `n`, restart the generation with fresh randomness. The retry loop
/// is bounded and surfaces [`Error::key_generation_exhausted`] only when the
/// budget is spent, which indicates an internal fault rather than a protocol
/// failure.
pub fn generate_keys<R: RngCore + CryptoRng>(
    bit_length: usize,
    rng: &mut R,
) -> Result<(Arc<PublicKey>, SecretKey)> {
    if bit_length < 16 || bit_length % 2 != 0 {
        return Err(Error::UnspecifiedInput(format!(
            "Key bit length must be even and at least 16, got {}",
            bit_length
        )));
    }

    for _ in 0..KEYGEN_MAX_ATTEMPTS {
        let p = generate_prime(bit_length / 2, rng)?;
        let q = generate_prime(bit_length / 2, rng)?;
        if p == q {
            continue;
        }

        let n = &p * &q;
        let n_squared = &n * &n;
        let g = &n + BigUint::one();
        let lambda = (&p - BigUint::one()).lcm(&(&q - BigUint::one()));

        // With g = n + 1, L(g^λ mod n²) ≡ λ (mod n), so the inverse exists
        // whenever gcd(λ, n) = 1. It can still fail when p divides q - 1 or
        // vice versa, in which case the whole generation is retried.
        let u = g.modpow(&lambda, &n_squared);
        let l = (&u - BigUint::one()) / &n;
        if let Some(mu) = (&l).mod_inverse(&n).and_then(|inv| inv.to_biguint()) {
            let par = Arc::new(PublicKey { n, n_squared, g });
            let sk = SecretKey {
                par: par.clone(),
                lambda,
                mu,
            };
            return Ok((par, sk));
        }
    }

    Err(Error::key_generation_exhausted(KEYGEN_MAX_ATTEMPTS))
}

impl Parametrized for SecretKey {
    type Parameters = PublicKey;
}

impl Encrypter<BigUint, Ciphertext> for Arc<PublicKey> {
    type Error = Error;

    /// Encrypts `pt mod n` as `g^m · r^n mod n²` for a fresh randomizer `r`.
    ///
    /// Encryption is randomized: repeated calls with the same plaintext yield
    /// different ciphertexts.
    fn try_encrypt<R: RngCore + CryptoRng>(
        &self,
        pt: &BigUint,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        let m = pt % &self.n;
        let r = self.sample_randomizer(rng)?;
        let c = (self.g.modpow(&m, &self.n_squared) * r.modpow(&self.n, &self.n_squared))
            % &self.n_squared;
        Ok(Ciphertext {
            par: self.clone(),
            c,
        })
    }
}

impl Decrypter<BigUint, Ciphertext> for SecretKey {
    type Error = Error;

    /// Decrypts a ciphertext as `L(c^λ mod n²) · μ mod n`.
    fn try_decrypt(&self, ct: &Ciphertext) -> Result<BigUint> {
        if ct.par != self.par {
            return Err(Error::foreign_ciphertext());
        }
        let u = ct.c.modpow(&self.lambda, &self.par.n_squared);
        let l = (&u - BigUint::one()) / &self.par.n;
        Ok((l * &self.mu) % &self.par.n)
    }
}
