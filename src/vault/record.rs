//! The persisted vault shape and the operations callers run on it.
//!
//! A `VaultRecord` is created once, read and rewritten in full on every
//! secret change, and deleted as a unit. Secrets are stored only as
//! `SecretRecord`s (two sealed fields); plaintext exists only in the
//! `DecryptedSecret`s returned by `list_secrets`.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::format::{self, base64_decode, base64_encode};
use crate::crypto::codec::{self, DecryptedSecret};
use crate::crypto::envelope::{self, Envelope};
use crate::crypto::kdf::KdfParams;
use crate::crypto::keys::SymmetricKey;
use crate::crypto::Sealed;
use crate::errors::{LockboxError, Result};

/// Longest vault name accepted.
const MAX_NAME_LEN: usize = 64;

/// One vault: metadata, the key envelope, and the encrypted secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRecord {
    /// Identifier, also the storage file name.
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Description")]
    pub description: String,

    /// The vault key sealed under the password key (base64 in JSON).
    #[serde(
        rename = "EncodedEncryptedVaultKey",
        serialize_with = "base64_encode",
        deserialize_with = "base64_decode"
    )]
    pub encrypted_vault_key: Vec<u8>,

    /// Salt for password key derivation (base64 in JSON).
    #[serde(
        rename = "EncodedSalt",
        serialize_with = "base64_encode",
        deserialize_with = "base64_decode"
    )]
    pub salt: Vec<u8>,

    /// Nonce the vault key was sealed under (base64 in JSON).
    #[serde(
        rename = "EncodedNonce",
        serialize_with = "base64_encode",
        deserialize_with = "base64_decode"
    )]
    pub nonce: Vec<u8>,

    /// KDF parameters used at creation. Files without the field use the
    /// legacy PBKDF2 parameters.
    #[serde(rename = "Kdf", default = "KdfParams::legacy")]
    pub kdf: KdfParams,

    #[serde(rename = "Secrets", default, deserialize_with = "null_as_empty")]
    pub secrets: Vec<SecretRecord>,
}

/// One stored credential: its label and its payload, sealed separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    #[serde(rename = "EncodedEncryptedName")]
    pub encrypted_name: EncryptedField,

    #[serde(rename = "EncodedEncryptedText")]
    pub encrypted_value: EncryptedField,
}

/// A ciphertext paired with the nonce it was sealed under.
///
/// Serialized as a two-element array `[ciphertext, nonce]` of base64
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EncodedPair", into = "EncodedPair")]
pub struct EncryptedField {
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct EncodedPair(
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")] Vec<u8>,
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")] Vec<u8>,
);

impl From<EncodedPair> for EncryptedField {
    fn from(pair: EncodedPair) -> Self {
        Self {
            ciphertext: pair.0,
            nonce: pair.1,
        }
    }
}

impl From<EncryptedField> for EncodedPair {
    fn from(field: EncryptedField) -> Self {
        Self(field.ciphertext, field.nonce)
    }
}

impl From<Sealed> for EncryptedField {
    fn from(sealed: Sealed) -> Self {
        Self {
            ciphertext: sealed.ciphertext,
            nonce: sealed.nonce.to_vec(),
        }
    }
}

/// `"Secrets": null` is read the same as a missing or empty list.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<SecretRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SecretRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

impl VaultRecord {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a new, empty vault protected by `password`.
    ///
    /// Returns the record to persist and the raw vault key so the caller
    /// can add secrets without unlocking again.
    pub fn create(
        name: &str,
        description: &str,
        password: &[u8],
        kdf_params: &KdfParams,
    ) -> Result<(Self, SymmetricKey)> {
        validate_vault_name(name)?;
        if password.is_empty() {
            return Err(LockboxError::ValidationFailed(
                "password cannot be empty".into(),
            ));
        }

        let (vault_key, envelope) = envelope::create(password, kdf_params)?;
        let record = Self {
            name: name.to_string(),
            description: description.to_string(),
            encrypted_vault_key: envelope.encrypted_vault_key,
            salt: envelope.salt,
            nonce: envelope.nonce,
            kdf: envelope.kdf,
            secrets: Vec::new(),
        };

        debug!(vault = %record.name, kdf = kdf_params.algorithm(), "vault created");
        Ok((record, vault_key))
    }

    /// Parse a record from its JSON form and check its invariants.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        format::decode_record(bytes)
    }

    /// Serialize the whole record to JSON.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        format::encode_record(self)
    }

    // ------------------------------------------------------------------
    // Unlock
    // ------------------------------------------------------------------

    /// The envelope fields of this vault.
    pub fn envelope(&self) -> Envelope {
        Envelope {
            encrypted_vault_key: self.encrypted_vault_key.clone(),
            salt: self.salt.clone(),
            nonce: self.nonce.clone(),
            kdf: self.kdf,
        }
    }

    /// Recover the vault key with `password`.
    ///
    /// `Err(AuthenticationFailed)` is the wrong-password answer. It is
    /// never retried.
    pub fn unlock(&self, password: &[u8]) -> Result<SymmetricKey> {
        let envelope = self.envelope();
        envelope.check_shape()?;

        match envelope::open(password, &envelope) {
            Ok(key) => {
                debug!(vault = %self.name, "vault unlocked");
                Ok(key)
            }
            Err(e) => {
                debug!(vault = %self.name, "vault unlock rejected");
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Secret operations
    // ------------------------------------------------------------------

    /// Decrypt every secret, in stored order.
    pub fn list_secrets(&self, vault_key: &SymmetricKey) -> Result<Vec<DecryptedSecret>> {
        self.secrets
            .iter()
            .map(|record| codec::decrypt_secret(record, vault_key))
            .collect()
    }

    /// Encrypt a new secret and append it. The caller then persists the
    /// whole record.
    ///
    /// Empty values are allowed; empty names are not.
    pub fn add_secret(&mut self, vault_key: &SymmetricKey, name: &str, value: &str) -> Result<()> {
        if name.is_empty() {
            return Err(LockboxError::ValidationFailed(
                "secret name cannot be empty".into(),
            ));
        }

        let record = codec::encrypt_secret(name, value, vault_key)?;
        self.secrets.push(record);

        debug!(vault = %self.name, count = self.secrets.len(), "secret added");
        Ok(())
    }

    /// Remove the secret at `index` and return it.
    pub fn remove_secret(&mut self, index: usize) -> Result<SecretRecord> {
        if index >= self.secrets.len() {
            return Err(LockboxError::SecretNotFound(format!("#{}", index + 1)));
        }

        let removed = self.secrets.remove(index);
        debug!(vault = %self.name, count = self.secrets.len(), "secret removed");
        Ok(removed)
    }

    /// Index of the first secret whose decrypted name is `name`.
    pub fn find_secret(&self, vault_key: &SymmetricKey, name: &str) -> Result<usize> {
        for (index, record) in self.secrets.iter().enumerate() {
            if codec::decrypt_secret(record, vault_key)?.name == name {
                return Ok(index);
            }
        }
        Err(LockboxError::SecretNotFound(name.to_string()))
    }

    /// Returns the number of secrets in the vault.
    pub fn secret_count(&self) -> usize {
        self.secrets.len()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a vault name is safe to use as a file name.
///
/// Rejected: empty names, names over 64 characters, path separators,
/// whitespace, control characters, and names starting with a period.
pub fn validate_vault_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LockboxError::ValidationFailed(
            "vault name cannot be empty".into(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(LockboxError::ValidationFailed(format!(
            "vault name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    if name.starts_with('.') {
        return Err(LockboxError::ValidationFailed(format!(
            "vault name '{name}' cannot start with a period"
        )));
    }
    if name
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control())
    {
        return Err(LockboxError::ValidationFailed(format!(
            "vault name '{name}' cannot contain path separators or spaces"
        )));
    }
    Ok(())
}

/// Check the fields of a new-vault form before any key derivation runs.
///
/// Every field is required and the password must be typed the same way
/// twice.
pub fn validate_new_vault(
    name: &str,
    description: &str,
    password: &str,
    confirmation: &str,
) -> Result<()> {
    validate_vault_name(name)?;
    if description.trim().is_empty() {
        return Err(LockboxError::ValidationFailed(
            "description cannot be empty".into(),
        ));
    }
    if password.is_empty() {
        return Err(LockboxError::ValidationFailed(
            "password cannot be empty".into(),
        ));
    }
    if password != confirmation {
        return Err(LockboxError::PasswordMismatch);
    }
    Ok(())
}
