use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Lockbox.
///
/// Three variants carry the user-facing taxonomy: `AuthenticationFailed`
/// (wrong password or a ciphertext that does not verify), the validation
/// variants (bad user input, caught before any crypto runs), and
/// `EncodingFailed` (a vault file that cannot be parsed).
#[derive(Debug, Error)]
pub enum LockboxError {
    // --- Crypto errors ---
    #[error("Authentication failed: wrong password or corrupted data")]
    AuthenticationFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Input validation ---
    #[error("Invalid input: {0}")]
    ValidationFailed(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    // --- Vault errors ---
    #[error("Malformed vault data: {0}")]
    EncodingFailed(String),

    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl LockboxError {
    /// Returns `true` for errors the user can fix by retrying with
    /// different input (another password, a valid name).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed | Self::ValidationFailed(_) | Self::PasswordMismatch
        )
    }
}

/// Convenience type alias for Lockbox results.
pub type Result<T> = std::result::Result<T, LockboxError>;
