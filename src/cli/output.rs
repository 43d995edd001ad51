//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::crypto::DecryptedSecret;
use crate::vault::VaultRecord;

/// Shown in place of a secret value unless `--reveal` is passed.
const MASK: &str = "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of vaults (Name, Description, Secrets, KDF).
pub fn print_vaults_table(vaults: &[VaultRecord]) {
    if vaults.is_empty() {
        info("No vaults yet.");
        tip("Run `lockbox create <NAME>` to create your first vault.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Description", "Secrets", "KDF"]);

    for v in vaults {
        table.add_row(vec![
            v.name.clone(),
            v.description.clone(),
            v.secret_count().to_string(),
            v.kdf.algorithm().to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a table of decrypted secrets (#, Name, Value).
pub fn print_secrets_table(secrets: &[DecryptedSecret], reveal: bool) {
    if secrets.is_empty() {
        info("No secrets in this vault yet.");
        tip("Run `lockbox add <VAULT> <NAME>` to add your first secret.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Value"]);

    for (i, s) in secrets.iter().enumerate() {
        let value = if reveal {
            s.value.as_str().to_string()
        } else {
            MASK.to_string()
        };
        table.add_row(vec![(i + 1).to_string(), s.name.clone(), value]);
    }

    println!("{table}");
}
