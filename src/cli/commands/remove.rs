//! `lockbox remove`: remove a secret from a vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_store, unlock_vault, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, vault: &str, secret: &str, force: bool) -> Result<()> {
    let (_settings, store) = open_store(cli)?;
    let (mut record, vault_key) = unlock_vault(&store, vault)?;

    let index = record.find_secret(&vault_key, secret)?;

    // Unless --force is set, ask for confirmation before removing.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove secret '{secret}' from {vault}?"))
            .default(false)
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    record.remove_secret(index)?;
    store.save(&record)?;

    output::success(&format!(
        "Removed secret '{secret}' ({} left)",
        record.secret_count()
    ));

    Ok(())
}
