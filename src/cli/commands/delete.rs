//! `lockbox delete`: delete a whole vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let (_settings, store) = open_store(cli)?;
    let path = store.path_for(name)?;

    if !path.exists() {
        return Err(LockboxError::VaultNotFound(path));
    }

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete vault '{name}' and all its secrets? This cannot be undone"
            ))
            .default(false)
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.delete(name)?;

    output::success(&format!(
        "Deleted vault '{name}' ({} removed)",
        path.display()
    ));

    Ok(())
}
