//! `lockbox list`: display all vaults in a table.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (_settings, store) = open_store(cli)?;
    let scan = store.scan()?;

    for bad in &scan.unreadable {
        output::warning(&format!(
            "Skipping {}: {}",
            bad.path.display(),
            bad.error
        ));
    }

    if !scan.vaults.is_empty() {
        output::info(&format!(
            "{} vault(s) in {}",
            scan.vaults.len(),
            store.dir().display()
        ));
    }
    output::print_vaults_table(&scan.vaults);

    Ok(())
}
