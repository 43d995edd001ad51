//! Vault module: the persisted vault and its storage.
//!
//! This module provides:
//! - `VaultRecord`, `SecretRecord` and the create/unlock/list/add/remove
//!   operations (`record`)
//! - JSON + base64 encoding and atomic file writes (`format`)
//! - `VaultStore`, a directory of vault files (`store`)

pub mod format;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use record::{validate_new_vault, validate_vault_name, EncryptedField, SecretRecord, VaultRecord};
pub use store::{UnreadableVault, VaultScan, VaultStore};
