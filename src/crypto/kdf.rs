//! Password-based key derivation.
//!
//! Two schemes are supported, each with fixed, documented parameters that
//! are stored in the vault file next to the envelope:
//!
//! - **Argon2id** (v0x13): memory-hard, the default for new vaults
//!   (64 MiB, 3 passes, 4 lanes).
//! - **PBKDF2-HMAC-SHA256**: the scheme of vault files that carry no `Kdf`
//!   field, at exactly 4096 iterations.
//!
//! Both produce a 32-byte key. The same password, salt, and parameters
//! always yield the same key; unlocking depends on that.

use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroize;

use super::keys::{fill_random, SymmetricKey, KEY_LEN};
use crate::errors::{LockboxError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Iteration count of vault files written without a `Kdf` field.
pub const LEGACY_PBKDF2_ITERATIONS: u32 = 4_096;

/// Minimum safe Argon2 memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Minimum PBKDF2 iteration count accepted for derivation.
const MIN_PBKDF2_ITERATIONS: u32 = 1_000;

/// Largest Argon2 memory cost accepted, in KiB (1 GiB).
pub const MAX_MEMORY_KIB: u32 = 1_048_576;

/// Largest Argon2 pass count accepted.
pub const MAX_ITERATIONS: u32 = 64;

/// Largest Argon2 lane count accepted.
pub const MAX_PARALLELISM: u32 = 64;

/// Largest PBKDF2 iteration count accepted.
pub const MAX_PBKDF2_ITERATIONS: u32 = 10_000_000;

/// Key derivation scheme and work factor.
///
/// Serialized into the vault file as `{"Algorithm": "...", ...}` so a
/// vault keeps opening after the defaults change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Algorithm")]
pub enum KdfParams {
    #[serde(rename = "argon2id")]
    Argon2id {
        /// Memory cost in KiB.
        #[serde(rename = "MemoryKib")]
        memory_kib: u32,
        /// Number of passes.
        #[serde(rename = "Iterations")]
        iterations: u32,
        /// Parallelism lanes.
        #[serde(rename = "Parallelism")]
        parallelism: u32,
    },

    #[serde(rename = "pbkdf2-sha256")]
    Pbkdf2Sha256 {
        #[serde(rename = "Iterations")]
        iterations: u32,
    },
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::Argon2id {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl KdfParams {
    /// Parameters of vault files that predate the `Kdf` field.
    pub const fn legacy() -> Self {
        Self::Pbkdf2Sha256 {
            iterations: LEGACY_PBKDF2_ITERATIONS,
        }
    }

    /// Short algorithm name for display.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::Argon2id { .. } => "argon2id",
            Self::Pbkdf2Sha256 { .. } => "pbkdf2-sha256",
        }
    }

    /// Reject parameter sets that are too weak, or too expensive to run
    /// in an interactive unlock.
    ///
    /// The bounds apply to parameters read back from vault files as well,
    /// so a damaged `Kdf` block cannot make unlock allocate gigabytes or
    /// spin for hours.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Argon2id {
                memory_kib,
                iterations,
                parallelism,
            } => {
                if !(MIN_MEMORY_KIB..=MAX_MEMORY_KIB).contains(&memory_kib) {
                    return Err(LockboxError::KeyDerivationFailed(format!(
                        "Argon2 memory_kib must be between {MIN_MEMORY_KIB} and {MAX_MEMORY_KIB} (got {memory_kib})"
                    )));
                }
                if !(1..=MAX_ITERATIONS).contains(&iterations) {
                    return Err(LockboxError::KeyDerivationFailed(format!(
                        "Argon2 iterations must be between 1 and {MAX_ITERATIONS} (got {iterations})"
                    )));
                }
                if !(1..=MAX_PARALLELISM).contains(&parallelism) {
                    return Err(LockboxError::KeyDerivationFailed(format!(
                        "Argon2 parallelism must be between 1 and {MAX_PARALLELISM} (got {parallelism})"
                    )));
                }
            }
            Self::Pbkdf2Sha256 { iterations } => {
                if !(MIN_PBKDF2_ITERATIONS..=MAX_PBKDF2_ITERATIONS).contains(&iterations) {
                    return Err(LockboxError::KeyDerivationFailed(format!(
                        "PBKDF2 iterations must be between {MIN_PBKDF2_ITERATIONS} and {MAX_PBKDF2_ITERATIONS} (got {iterations})"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Derive a 32-byte key from a password and salt.
///
/// Returns an error only for parameter sets rejected by
/// [`KdfParams::validate`] or an empty salt.
pub fn derive_key(password: &[u8], salt: &[u8], params: &KdfParams) -> Result<SymmetricKey> {
    params.validate()?;
    if salt.is_empty() {
        return Err(LockboxError::KeyDerivationFailed("salt cannot be empty".into()));
    }

    let mut key = [0u8; KEY_LEN];
    match *params {
        KdfParams::Argon2id {
            memory_kib,
            iterations,
            parallelism,
        } => {
            let argon2_params = Params::new(memory_kib, iterations, parallelism, Some(KEY_LEN))
                .map_err(|e| {
                    LockboxError::KeyDerivationFailed(format!("invalid Argon2 params: {e}"))
                })?;
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);
            argon2
                .hash_password_into(password, salt, &mut key)
                .map_err(|e| {
                    LockboxError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}"))
                })?;
        }
        KdfParams::Pbkdf2Sha256 { iterations } => {
            pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
        }
    }

    let derived = SymmetricKey::new(key);
    key.zeroize();
    Ok(derived)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    fill_random(&mut salt)?;
    Ok(salt)
}
