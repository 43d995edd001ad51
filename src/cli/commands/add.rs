//! `lockbox add`: encrypt a new secret into a vault.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_store, unlock_vault, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `add` command.
pub fn execute(cli: &Cli, vault: &str, secret: &str, value: Option<&str>) -> Result<()> {
    let (_settings, store) = open_store(cli)?;

    // Unlock first so a wrong password is reported before asking for the value.
    let (mut record, vault_key) = unlock_vault(&store, vault)?;

    // Determine the secret value from one of three sources.
    let secret_value = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line; it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed_len);
        buf
    } else {
        // Source 3: Interactive hidden prompt (default).
        let v = dialoguer::Password::new()
            .with_prompt(format!("Value for {secret}"))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(v)
    };

    // Append and rewrite the whole vault file.
    record.add_secret(&vault_key, secret, &secret_value)?;
    store.save(&record)?;

    output::success(&format!(
        "Secret '{}' added to {} ({} total)",
        secret,
        record.name,
        record.secret_count()
    ));

    Ok(())
}
