//! Stand maintenance commands

use super::load_config;
use crate::cli::error::{CliError, CliResult};
use clap::{Args, Subcommand};
use niffler_e2e::db::{AuthDb, SpendsDb, UserdataDb};
use niffler_e2e::fixtures::{StandCleaner, CLEANUP_LOCK};
use niffler_e2e::LockManager;
use std::path::Path;
use tracing::info;

/// Stand commands
#[derive(Debug, Args)]
pub struct StandArgs {
    #[command(subcommand)]
    pub command: StandCommand,
}

#[derive(Debug, Subcommand)]
pub enum StandCommand {
    /// Delete spendings, categories and every user except the test user
    Clean {
        /// Clean even while a test run holds the cleanup lock
        #[arg(long)]
        force: bool,
    },
}

pub async fn execute_stand(config: Option<&Path>, args: StandArgs) -> CliResult<()> {
    let config = load_config(config)?;

    match args.command {
        StandCommand::Clean { force } => {
            let locks = LockManager::new(config.lock.clone())?;
            let running = locks.list()?.into_iter().any(|l| l.name == CLEANUP_LOCK);
            if running && !force {
                return Err(CliError::Validation(
                    "a test run holds the cleanup lock; pass --force to clean anyway"
                        .to_string(),
                ));
            }

            let (spends_db, userdata_db, auth_db) = futures::try_join!(
                SpendsDb::connect(&config.server.spends_db_url),
                UserdataDb::connect(&config.server.userdata_db_url),
                AuthDb::connect(&config.server.auth_db_url),
            )?;

            StandCleaner::new(
                &spends_db,
                &userdata_db,
                &auth_db,
                &config.client.test_username,
            )
            .clean()
            .await?;

            info!("Stand clean finished");
            println!(
                "Stand cleaned, kept user '{}'",
                config.client.test_username
            );
        }
    }

    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clean_refuses_while_cleanup_lock_is_held() {
        let dir = TempDir::new().unwrap();
        let lock_dir = dir.path().join("lock");
        std::fs::create_dir_all(&lock_dir).unwrap();
        std::fs::write(lock_dir.join("cleanup.lock"), "host-1").unwrap();

        let config = dir.path().join("niffler.toml");
        std::fs::write(
            &config,
            format!(
                "lock_dir = {:?}\ntest_username = \"duck\"\ntest_password = \"12345\"\n",
                lock_dir.to_string_lossy()
            ),
        )
        .unwrap();

        let args = StandArgs {
            command: StandCommand::Clean { force: false },
        };
        let err = execute_stand(Some(&config), args).await.unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
