//! In-memory key material.
//!
//! Both the random vault key and the password-derived key are 32-byte
//! AES-256 keys held in a `SymmetricKey`, which zeroes its bytes when
//! dropped and never prints them.

use std::fmt;

use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::Zeroize;

use crate::errors::{LockboxError, Result};

/// Length of every symmetric key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte symmetric key that automatically zeroes its memory when
/// dropped.
///
/// Never serialized. The only way bytes leave this type is `as_bytes`,
/// which hands out a borrow for the duration of a cipher call.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SymmetricKey {
    bytes: [u8; KEY_LEN],
}

impl SymmetricKey {
    /// Wrap raw key bytes. The caller should zeroize its own copy.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh key from the operating system CSPRNG.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; KEY_LEN];
        fill_random(&mut bytes)?;
        let key = Self::new(bytes);
        bytes.zeroize();
        Ok(key)
    }

    /// Rebuild a key from a decrypted buffer.
    ///
    /// Anything other than exactly 32 bytes is treated as a failed
    /// authentication: a correctly sealed vault key always has that length.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let mut bytes: [u8; KEY_LEN] = slice
            .try_into()
            .map_err(|_| LockboxError::AuthenticationFailed)?;
        let key = Self::new(bytes);
        bytes.zeroize();
        Ok(key)
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Fill `buf` from the operating system CSPRNG.
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| LockboxError::EncryptionFailed(format!("random source unavailable: {e}")))
}
