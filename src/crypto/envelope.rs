//! The vault-key envelope.
//!
//! A vault is protected by two keys:
//! - a random **vault key** that encrypts every secret, and
//! - a **password key** derived from the master password and a salt,
//!   which only ever encrypts the vault key.
//!
//! The envelope is the sealed vault key plus the salt and nonce needed to
//! reopen it. There is no separate password hash: a password is correct
//! exactly when the envelope opens.

use tracing::debug;

use super::aead::{self, NONCE_LEN};
use super::kdf::{self, KdfParams, SALT_LEN};
use super::keys::SymmetricKey;
use crate::errors::{LockboxError, Result};

/// Persisted fields of a vault-key envelope.
///
/// `salt` and `nonce` are fixed at creation and never regenerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub encrypted_vault_key: Vec<u8>,
    pub salt: Vec<u8>,
    pub nonce: Vec<u8>,
    pub kdf: KdfParams,
}

/// Create a new vault key and seal it under `password`.
///
/// Returns the raw vault key for immediate use together with the
/// envelope fields to persist.
pub fn create(password: &[u8], kdf_params: &KdfParams) -> Result<(SymmetricKey, Envelope)> {
    let vault_key = SymmetricKey::generate()?;
    let salt = kdf::generate_salt()?;

    let password_key = kdf::derive_key(password, &salt, kdf_params)?;
    let sealed = aead::seal(vault_key.as_bytes(), &password_key)?;
    drop(password_key);

    debug!(kdf = kdf_params.algorithm(), "sealed new vault key");

    Ok((
        vault_key,
        Envelope {
            encrypted_vault_key: sealed.ciphertext,
            salt: salt.to_vec(),
            nonce: sealed.nonce.to_vec(),
            kdf: *kdf_params,
        },
    ))
}

/// Re-derive the password key and open the envelope.
///
/// `Err(AuthenticationFailed)` means the password is wrong (or the
/// envelope was modified); no key material is returned in that case.
pub fn open(password: &[u8], envelope: &Envelope) -> Result<SymmetricKey> {
    let password_key = kdf::derive_key(password, &envelope.salt, &envelope.kdf)?;
    let plaintext = aead::open(&envelope.encrypted_vault_key, &password_key, &envelope.nonce)?;
    drop(password_key);

    SymmetricKey::from_slice(&plaintext)
}

impl Envelope {
    /// Check field lengths of an envelope read from disk.
    ///
    /// A salt or nonce of the wrong size means the file itself is
    /// malformed, which is reported as an encoding problem rather than a
    /// wrong password.
    pub fn check_shape(&self) -> Result<()> {
        if self.salt.len() != SALT_LEN {
            return Err(LockboxError::EncodingFailed(format!(
                "salt must be {SALT_LEN} bytes, got {}",
                self.salt.len()
            )));
        }
        if self.nonce.len() != NONCE_LEN {
            return Err(LockboxError::EncodingFailed(format!(
                "envelope nonce must be {NONCE_LEN} bytes, got {}",
                self.nonce.len()
            )));
        }
        if self.encrypted_vault_key.is_empty() {
            return Err(LockboxError::EncodingFailed(
                "encrypted vault key is empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> KdfParams {
        KdfParams::Argon2id {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn create_then_open_returns_same_key() {
        let (key, envelope) = create(b"pw-123456", &cheap()).unwrap();
        let reopened = open(b"pw-123456", &envelope).unwrap();
        assert_eq!(key.as_bytes(), reopened.as_bytes());
    }

    #[test]
    fn wrong_password_fails() {
        let (_key, envelope) = create(b"right-password", &cheap()).unwrap();
        let result = open(b"wrong-password", &envelope);
        assert!(matches!(result, Err(LockboxError::AuthenticationFailed)));
    }

    #[test]
    fn fresh_envelope_has_expected_shape() {
        let (_key, envelope) = create(b"pw", &cheap()).unwrap();
        assert_eq!(envelope.salt.len(), SALT_LEN);
        assert_eq!(envelope.nonce.len(), NONCE_LEN);
        // 32-byte vault key + 16-byte tag.
        assert_eq!(envelope.encrypted_vault_key.len(), 48);
        assert!(envelope.check_shape().is_ok());
        assert_eq!(envelope.kdf, cheap());
    }

    #[test]
    fn vault_key_is_not_the_password_key() {
        let (key, envelope) = create(b"pw", &cheap()).unwrap();
        let password_key = kdf::derive_key(b"pw", &envelope.salt, &envelope.kdf).unwrap();
        assert_ne!(key.as_bytes(), password_key.as_bytes());
    }

    #[test]
    fn check_shape_rejects_bad_nonce() {
        let (_key, mut envelope) = create(b"pw", &cheap()).unwrap();
        envelope.nonce.truncate(4);
        assert!(matches!(
            envelope.check_shape(),
            Err(LockboxError::EncodingFailed(_))
        ));
    }
}
