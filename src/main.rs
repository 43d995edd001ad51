use clap::Parser;
use lockbox::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Create {
            ref vault,
            ref description,
        } => lockbox::cli::commands::create::execute(&cli, vault, description.as_deref()),
        Commands::List => lockbox::cli::commands::list::execute(&cli),
        Commands::Open { ref vault, reveal } => {
            lockbox::cli::commands::open::execute(&cli, vault, reveal)
        }
        Commands::Add {
            ref vault,
            ref secret,
            ref value,
        } => lockbox::cli::commands::add::execute(&cli, vault, secret, value.as_deref()),
        Commands::Remove {
            ref vault,
            ref secret,
            force,
        } => lockbox::cli::commands::remove::execute(&cli, vault, secret, force),
        Commands::Delete { ref vault, force } => {
            lockbox::cli::commands::delete::execute(&cli, vault, force)
        }
    };

    if let Err(e) = result {
        lockbox::cli::output::error(&e.to_string());
        if e.is_recoverable() {
            lockbox::cli::output::tip("Check the password or input and try again.");
        }
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// `LOCKBOX_LOG` takes a full filter directive; otherwise only warnings
/// are shown, or debug output for this crate with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "lockbox=debug,warn" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("LOCKBOX_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
