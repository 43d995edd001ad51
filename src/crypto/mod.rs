//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - Password-based key derivation, Argon2id or PBKDF2 (`kdf`)
//! - AES-256-GCM seal/open with per-call random nonces (`aead`)
//! - Zeroize-on-drop key material (`keys`)
//! - The password-protected vault-key envelope (`envelope`)
//! - Per-secret field encryption under the vault key (`codec`)

pub mod aead;
pub mod codec;
pub mod envelope;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_key, ...};
pub use aead::{open, seal, Sealed};
pub use codec::{decrypt_secret, encrypt_secret, DecryptedSecret};
pub use envelope::Envelope;
pub use kdf::{derive_key, generate_salt, KdfParams};
pub use keys::SymmetricKey;
