//! Ciphertext type for the Paillier encryption scheme.

use std::ops::Add;
use std::sync::Arc;

use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};

use crate::paillier::PublicKey;
use crate::traits::Parametrized;
use crate::Result;

/// A Paillier ciphertext, an integer in `[0, n² - 1]`.
///
/// Ciphertexts are never mutated in place: homomorphic addition and
/// re-randomization both yield new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    /// The public key the ciphertext was produced under.
    pub(crate) par: Arc<PublicKey>,
    /// The ciphertext value.
    pub(crate) c: BigUint,
}

impl Ciphertext {
    /// Returns the ciphertext value.
    pub fn value(&self) -> &BigUint {
        &self.c
    }

    /// Returns the public key the ciphertext is bound to.
    pub fn public_key(&self) -> &Arc<PublicKey> {
        &self.par
    }

    /// Re-randomizes the ciphertext by multiplying in `r^n mod n²` for a
    /// fresh randomizer `r`.
    ///
    /// The result decrypts identically but is unlinkable to `self` by
    /// ciphertext value alone, so an aggregate can be released without
    /// exposing which ciphertexts were combined into it.
    pub fn rerandomize<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<Ciphertext> {
        let r = self.par.sample_randomizer(rng)?;
        let c = (&self.c * r.modpow(&self.par.n, &self.par.n_squared)) % &self.par.n_squared;
        Ok(Ciphertext {
            par: self.par.clone(),
            c,
        })
    }
}

impl Parametrized for Ciphertext {
    type Parameters = PublicKey;
}

impl Add<&Ciphertext> for &Ciphertext {
    type Output = Ciphertext;

    /// Homomorphic addition: the product `c1 · c2 mod n²` decrypts to the
    /// sum of the two plaintexts modulo `n`.
    fn add(self, rhs: &Ciphertext) -> Ciphertext {
        assert_eq!(
            self.par, rhs.par,
            "Ciphertexts under different Paillier keys"
        );
        Ciphertext {
            par: self.par.clone(),
            c: (&self.c * &rhs.c) % &self.par.n_squared,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::paillier::generate_keys;
    use crate::traits::{Decrypter, Encrypter};
    use num_bigint_dig::{BigUint, RandBigInt};
    use rand::thread_rng;

    #[test]
    fn homomorphic_addition() {
        let mut rng = thread_rng();
        let (pk, sk) = generate_keys(256, &mut rng).unwrap();
        for _ in 0..20 {
            let a = rng.gen_biguint_below(pk.n());
            let b = rng.gen_biguint_below(pk.n());
            let ct = &pk.try_encrypt(&a, &mut rng).unwrap() + &pk.try_encrypt(&b, &mut rng).unwrap();
            assert_eq!(sk.try_decrypt(&ct).unwrap(), (&a + &b) % pk.n());
        }
    }

    #[test]
    fn rerandomization_preserves_the_plaintext() {
        let mut rng = thread_rng();
        let (pk, sk) = generate_keys(256, &mut rng).unwrap();
        let ct = pk.try_encrypt(&BigUint::from(16u32), &mut rng).unwrap();
        let ct2 = ct.rerandomize(&mut rng).unwrap();
        assert_ne!(ct.value(), ct2.value());
        assert_eq!(
            sk.try_decrypt(&ct).unwrap(),
            sk.try_decrypt(&ct2).unwrap()
        );
    }

    #[test]
    #[should_panic(expected = "different Paillier keys")]
    fn addition_under_mismatched_keys_panics() {
        let mut rng = thread_rng();
        let (pk1, _) = generate_keys(256, &mut rng).unwrap();
        let (pk2, _) = generate_keys(256, &mut rng).unwrap();
        let ct1 = pk1.try_encrypt(&BigUint::from(1u32), &mut rng).unwrap();
        let ct2 = pk2.try_encrypt(&BigUint::from(2u32), &mut rng).unwrap();
        let _ = &ct1 + &ct2;
    }
}
