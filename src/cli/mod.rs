//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::SymmetricKey;
use crate::errors::{LockboxError, Result};
use crate::vault::{VaultRecord, VaultStore};

/// Minimum length for a new master password.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable that supplies the master password non-interactively.
pub const PASSWORD_ENV: &str = "LOCKBOX_PASSWORD";

/// Lockbox CLI: password-protected local secret vaults.
#[derive(Parser)]
#[command(
    name = "lockbox",
    about = "Password-protected local secret vaults",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: `vault_dir` from .lockbox.toml, else "vaults")
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault
    Create {
        /// Vault name (no spaces or path separators)
        vault: String,
        /// Short description (omit for interactive prompt)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List all vaults
    List,

    /// Unlock a vault and show its secrets
    Open {
        /// Vault name
        vault: String,
        /// Show secret values instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Add a secret to a vault
    Add {
        /// Vault name
        vault: String,
        /// Secret name (e.g. email)
        secret: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
    },

    /// Remove a secret from a vault
    Remove {
        /// Vault name
        vault: String,
        /// Secret name (the first match is removed)
        secret: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a vault and all its secrets
    Delete {
        /// Vault name
        vault: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master password, trying in order:
/// 1. `LOCKBOX_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(vault: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Master password for '{vault}'"))
        .allow_empty_password(true)
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password and its confirmation (used by `create`).
///
/// With `LOCKBOX_PASSWORD` set, that value is used for both. Enforces a
/// minimum password length; matching is checked by the caller.
pub fn prompt_new_password() -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    let (password, confirmation) = match password_from_env() {
        Some(pw) => (pw.clone(), pw),
        None => {
            let password = dialoguer::Password::new()
                .with_prompt("Choose master password")
                .interact()
                .map_err(|e| LockboxError::CommandFailed(format!("password prompt: {e}")))?;
            let confirmation = dialoguer::Password::new()
                .with_prompt("Confirm master password")
                .interact()
                .map_err(|e| LockboxError::CommandFailed(format!("password prompt: {e}")))?;
            (Zeroizing::new(password), Zeroizing::new(confirmation))
        }
    };

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(LockboxError::ValidationFailed(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    Ok((password, confirmation))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Load settings from the working directory and open the vault directory.
///
/// `--vault-dir` wins over the config file.
pub fn open_store(cli: &Cli) -> Result<(Settings, VaultStore)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let dir = match &cli.vault_dir {
        Some(dir) => cwd.join(dir),
        None => settings.vault_dir(&cwd),
    };
    Ok((settings, VaultStore::new(dir)))
}

/// Load a vault and unlock it with the master password.
pub fn unlock_vault(store: &VaultStore, name: &str) -> Result<(VaultRecord, SymmetricKey)> {
    let record = store.load(name)?;
    let password = prompt_password(name)?;
    let key = record.unlock(password.as_bytes())?;
    Ok((record, key))
}
