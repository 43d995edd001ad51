//! Per-secret field encryption.
//!
//! A secret's name and value are sealed separately under the vault key,
//! each with its own nonce. The password key is never used here, so a
//! password change would only need to re-seal the envelope.

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use super::aead;
use super::keys::SymmetricKey;
use crate::errors::{LockboxError, Result};
use crate::vault::record::{EncryptedField, SecretRecord};

/// A decrypted secret. The value is wiped from memory on drop.
pub struct DecryptedSecret {
    pub name: String,
    pub value: Zeroizing<String>,
}

impl fmt::Debug for DecryptedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptedSecret")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Seal `name` and `value` independently under the vault key.
pub fn encrypt_secret(name: &str, value: &str, vault_key: &SymmetricKey) -> Result<SecretRecord> {
    let name_sealed = aead::seal(name.as_bytes(), vault_key)?;
    let value_sealed = aead::seal(value.as_bytes(), vault_key)?;

    Ok(SecretRecord {
        encrypted_name: EncryptedField::from(name_sealed),
        encrypted_value: EncryptedField::from(value_sealed),
    })
}

/// Open both fields of `record` under the vault key.
///
/// Fails with `AuthenticationFailed` if either field does not verify.
pub fn decrypt_secret(record: &SecretRecord, vault_key: &SymmetricKey) -> Result<DecryptedSecret> {
    let name = open_field(&record.encrypted_name, vault_key)?;
    let value = open_field(&record.encrypted_value, vault_key)?;

    Ok(DecryptedSecret {
        name: name.as_str().to_owned(),
        value,
    })
}

fn open_field(field: &EncryptedField, vault_key: &SymmetricKey) -> Result<Zeroizing<String>> {
    let mut plaintext = aead::open(&field.ciphertext, vault_key, &field.nonce)?;
    let bytes = std::mem::take(&mut *plaintext);

    // Convert via from_utf8 which takes ownership (no copy).
    // On error, zeroize the bytes inside the error before discarding.
    String::from_utf8(bytes).map(Zeroizing::new).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        LockboxError::EncodingFailed("secret field is not valid UTF-8".into())
    })
}
