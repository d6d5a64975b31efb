//! Main CLI application structure

use clap::Parser;
use std::path::PathBuf;

use crate::cli::commands::{locks, stand, token, version, Commands};
use crate::cli::error::CliResult;

/// niffler-e2e - Operate the Niffler end-to-end harness
#[derive(Debug, Parser)]
#[command(name = "niffler-e2e")]
#[command(version = niffler_e2e::VERSION)]
#[command(about = "niffler-e2e - Operate the Niffler end-to-end harness")]
#[command(long_about = "Helpers around the Niffler end-to-end test harness.\n\n\
                         Stand settings are resolved using this priority:\n\
                         1. Environment variables (GATEWAY_URL, TEST_USERNAME, ...)\n\
                         2. The file given with --config, or NIFFLER_CONFIG, or ./niffler.toml\n\
                         3. Built-in defaults\n\n\
                         Examples:\n\
                           niffler-e2e locks list            # Show held locks\n\
                           niffler-e2e locks clear cleanup   # Remove a stale lock\n\
                           niffler-e2e stand clean           # Wipe the stand databases\n\
                           niffler-e2e token                 # Print an access token")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a TOML configuration file
    #[arg(long, global = true, help = "Path to a niffler.toml configuration file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> CliResult<()> {
        init_logging(self.verbose);

        if self.verbose {
            if let Some(path) = &self.config {
                println!("Using configuration file: {}", path.display());
            }
        }

        let config = self.config.as_deref();
        match self.command {
            Some(Commands::Locks(args)) => locks::execute_locks(config, args).await,
            Some(Commands::Stand(args)) => stand::execute_stand(config, args).await,
            Some(Commands::Token(args)) => token::execute_token(config, args).await,
            Some(Commands::Version(args)) => version::execute_version(args).await,
            None => Err(crate::cli::error::CliError::Validation(
                "No command specified".to_string(),
            )),
        }
    }
}

/// Logs go to stderr; stdout carries command output
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose {
        "niffler_e2e=debug"
    } else {
        "niffler_e2e=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    // Fails silently if already initialized
    let _ = tracing::subscriber::set_global_default(subscriber);
}
