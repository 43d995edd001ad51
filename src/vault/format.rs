//! Vault file format: one JSON document per vault.
//!
//! ```text
//! {
//!   "Name": "personal",
//!   "Description": "...",
//!   "EncodedEncryptedVaultKey": "<base64>",
//!   "EncodedSalt": "<base64>",
//!   "EncodedNonce": "<base64>",
//!   "Kdf": { "Algorithm": "argon2id", ... },
//!   "Secrets": [
//!     { "EncodedEncryptedName": ["<base64 ct>", "<base64 nonce>"],
//!       "EncodedEncryptedText": ["<base64 ct>", "<base64 nonce>"] }
//!   ]
//! }
//! ```
//!
//! All binary fields are standard base64. Files written without `Kdf`
//! are read with PBKDF2-HMAC-SHA256 at 4096 iterations.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::Deserialize;

use super::record::{validate_vault_name, VaultRecord};
use crate::errors::{LockboxError, Result};

// ---------------------------------------------------------------------------
// Record encoding
// ---------------------------------------------------------------------------

/// Serialize a record to compact JSON.
pub fn encode_record(record: &VaultRecord) -> Result<Vec<u8>> {
    serde_json::to_vec(record)
        .map_err(|e| LockboxError::SerializationError(format!("vault record: {e}")))
}

/// Parse a record and check the invariants a loaded file must satisfy.
///
/// Malformed JSON or base64, an unusable name, envelope fields of the
/// wrong size, or KDF parameters outside the accepted range are all
/// `EncodingFailed`: the file cannot be trusted enough to attempt an
/// unlock.
pub fn decode_record(bytes: &[u8]) -> Result<VaultRecord> {
    let record: VaultRecord = serde_json::from_slice(bytes)
        .map_err(|e| LockboxError::EncodingFailed(format!("vault JSON: {e}")))?;

    validate_vault_name(&record.name)
        .map_err(|e| LockboxError::EncodingFailed(format!("stored name: {e}")))?;
    record.envelope().check_shape()?;
    record
        .kdf
        .validate()
        .map_err(|e| LockboxError::EncodingFailed(format!("stored KDF parameters: {e}")))?;

    Ok(record)
}

// ---------------------------------------------------------------------------
// Disk I/O
// ---------------------------------------------------------------------------

/// Write `bytes` to `path` **atomically**.
///
/// 1. Create a temp file in the same directory, owner-only on Unix from
///    the moment it exists.
/// 2. Write and flush the bytes.
/// 3. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written vault. If any step
/// fails the temp file is removed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    // A leftover from an interrupted write may carry looser permissions.
    match fs::remove_file(&tmp_path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }

    let result = write_new_private(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Create `path` (which must not exist) readable by the owner only.
fn write_new_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
