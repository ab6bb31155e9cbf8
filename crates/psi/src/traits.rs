//! Traits at the encryption seams of the psi crate.

use rand::{CryptoRng, RngCore};

/// Indicates that an object is parametrized.
pub trait Parametrized {
    /// The parameters type.
    type Parameters;
}

/// Encrypt a plaintext into a ciphertext.
pub trait Encrypter<P, C> {
    /// The error type.
    type Error;

    /// Try to encrypt a plaintext.
    fn try_encrypt<R: RngCore + CryptoRng>(
        &self,
        pt: &P,
        rng: &mut R,
    ) -> std::result::Result<C, Self::Error>;
}

/// Decrypt a ciphertext into a plaintext.
pub trait Decrypter<P, C> {
    /// The error type.
    type Error;

    /// Try to decrypt a ciphertext.
    fn try_decrypt(&self, ct: &C) -> std::result::Result<P, Self::Error>;
}
