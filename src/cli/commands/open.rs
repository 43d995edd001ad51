//! `lockbox open`: unlock a vault and display its secrets.

use crate::cli::output;
use crate::cli::{open_store, unlock_vault, Cli};
use crate::errors::Result;

/// Execute the `open` command.
pub fn execute(cli: &Cli, name: &str, reveal: bool) -> Result<()> {
    let (_settings, store) = open_store(cli)?;
    let (record, vault_key) = unlock_vault(&store, name)?;

    let secrets = record.list_secrets(&vault_key)?;

    output::info(&format!(
        "{} ({}): {} secret(s)",
        record.name,
        record.description,
        secrets.len()
    ));
    output::print_secrets_table(&secrets, reveal);

    if !reveal && !secrets.is_empty() {
        output::tip("Pass --reveal to show values.");
    }

    Ok(())
}
