//! `lockbox create`: create a new, empty vault.

use crate::cli::output;
use crate::cli::{open_store, prompt_new_password, Cli};
use crate::errors::{LockboxError, Result};
use crate::vault::{validate_new_vault, validate_vault_name, VaultRecord};

/// Execute the `create` command.
pub fn execute(cli: &Cli, name: &str, description: Option<&str>) -> Result<()> {
    // 1. Fail fast on a bad name or an existing vault, before any prompt.
    validate_vault_name(name)?;
    let (settings, store) = open_store(cli)?;
    if store.exists(name)? {
        output::tip("Use `lockbox add` to add secrets to the existing vault.");
        return Err(LockboxError::VaultAlreadyExists(store.path_for(name)?));
    }
    let kdf_params = settings.kdf_params()?;

    // 2. Collect the description and the new password (with confirmation).
    let description = match description {
        Some(d) => d.to_string(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Description")
            .interact_text()
            .map_err(|e| LockboxError::CommandFailed(format!("input prompt: {e}")))?,
    };
    let (password, confirmation) = prompt_new_password()?;
    validate_new_vault(name, &description, &password, &confirmation)?;

    // 3. Derive keys and write the empty vault.
    let (record, _vault_key) =
        VaultRecord::create(name, &description, password.as_bytes(), &kdf_params)?;
    let path = store.create(&record)?;

    output::success(&format!(
        "Vault '{name}' created at {} ({})",
        path.display(),
        kdf_params.algorithm()
    ));
    output::tip(&format!("Run `lockbox add {name} <NAME>` to add a secret."));
    output::tip("There is no recovery if the master password is lost.");

    Ok(())
}
