//! Symmetric key material for transport frame sealing.
//!
//! Frames are sealed with ChaCha20-Poly1305. The key is an opaque handle
//! produced by session establishment; everything outside this crate only
//! passes it through to the framer. Key bytes are wiped on drop and never
//! appear in debug output.

use std::fmt;

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Nonce,
};
use sealwire_core::error::FramingErrorKind;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key size for ChaCha20-Poly1305.
pub const KEY_SIZE: usize = 32;

/// Nonce size for ChaCha20-Poly1305.
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size for ChaCha20-Poly1305.
pub const TAG_SIZE: usize = 16;

/// A symmetric session key used to seal outbound frames.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: [u8; KEY_SIZE],
}

impl SymmetricKey {
    /// Wraps session-derived key material.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Generates a fresh random key.
    pub fn generate() -> Self {
        Self { bytes: rand::random() }
    }

    /// Seals `plaintext` under this key, authenticating `aad` alongside it.
    /// Returns ciphertext with the 16-byte authentication tag appended.
    pub(crate) fn seal(
        &self,
        nonce: &[u8; NONCE_SIZE],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, FramingErrorKind> {
        let cipher = ChaCha20Poly1305::new((&self.bytes).into());
        cipher
            .encrypt(Nonce::from_slice(nonce), Payload { msg: plaintext, aad })
            .map_err(|_| FramingErrorKind::SealFailed)
    }

    /// Opens `ciphertext` (tag included), verifying `aad`.
    /// Fails if the key, nonce, aad or ciphertext do not match the seal.
    pub(crate) fn open(
        &self,
        nonce: &[u8; NONCE_SIZE],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, FramingErrorKind> {
        if ciphertext.len() < TAG_SIZE {
            return Err(FramingErrorKind::UnexpectedEnd);
        }
        let cipher = ChaCha20Poly1305::new((&self.bytes).into());
        cipher
            .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad })
            .map_err(|_| FramingErrorKind::OpenFailed)
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}
