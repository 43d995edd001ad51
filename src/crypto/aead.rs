//! AES-256-GCM authenticated encryption.
//!
//! Each call to `seal` draws a fresh random 12-byte nonce and returns it
//! next to the ciphertext; the two are stored as a pair and handed back
//! together to `open`.
//!
//! The ciphertext carries the 16-byte GCM tag at its end:
//!   [ ciphertext | 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use super::keys::SymmetricKey;
use crate::errors::{LockboxError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Output of [`seal`]: ciphertext plus the nonce it was produced under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_LEN],
}

/// Encrypt and authenticate `plaintext` under `key` with a fresh nonce.
pub fn seal(plaintext: &[u8], key: &SymmetricKey) -> Result<Sealed> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| LockboxError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| LockboxError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(Sealed {
        ciphertext,
        nonce: nonce.into(),
    })
}

/// Verify and decrypt `ciphertext` under `key` and `nonce`.
///
/// Any failure (wrong key, wrong nonce, nonce of the wrong size, truncated
/// or modified ciphertext) is reported as the same
/// `AuthenticationFailed`, and no plaintext is released.
pub fn open(ciphertext: &[u8], key: &SymmetricKey, nonce: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if nonce.len() != NONCE_LEN || ciphertext.len() < TAG_LEN {
        return Err(LockboxError::AuthenticationFailed);
    }
    let nonce = Nonce::from_slice(nonce);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| LockboxError::AuthenticationFailed)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| LockboxError::AuthenticationFailed)?;

    Ok(Zeroizing::new(plaintext))
}
