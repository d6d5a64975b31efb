//! Lock inspection and cleanup commands
//!
//! A worker killed mid-run leaves its lock files behind and every later run
//! waits on them until the lock timeout. `locks clear` removes them.

use crate::cli::error::CliResult;
use clap::{Args, Subcommand};
use niffler_e2e::config::load_lock_settings;
use niffler_e2e::{LockManager, LockStatus};
use std::path::Path;

/// Lock management commands
#[derive(Debug, Args)]
pub struct LocksArgs {
    #[command(subcommand)]
    pub command: LocksCommand,
}

#[derive(Debug, Subcommand)]
pub enum LocksCommand {
    /// List locks present in the lock directory
    List,

    /// Remove one lock, or every lock when no name is given
    Clear {
        /// Lock name, e.g. `cleanup`
        name: Option<String>,
    },
}

pub async fn execute_locks(config: Option<&Path>, args: LocksArgs) -> CliResult<()> {
    let manager = LockManager::new(load_lock_settings(config)?)?;

    match args.command {
        LocksCommand::List => {
            let locks = manager.list()?;
            if locks.is_empty() {
                println!(
                    "No locks held in {}",
                    manager.settings().dir.display()
                );
            } else {
                print!("{}", render_locks(&locks));
            }
        }
        LocksCommand::Clear { name: Some(name) } => {
            if manager.clear(&name) {
                println!("Cleared lock '{}'", name);
            } else {
                println!("Lock '{}' is not held", name);
            }
        }
        LocksCommand::Clear { name: None } => {
            let removed = manager.clear_all()?;
            println!("Removed {} lock file(s)", removed);
        }
    }

    Ok(())
}

fn render_locks(locks: &[LockStatus]) -> String {
    let name_width = locks
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!("{:<name_width$}  {:<5}  {:<5}  HOLDER\n", "NAME", "DATA", "COUNT");
    for lock in locks {
        let count = lock
            .count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let data = if lock.has_data { "yes" } else { "no" };
        out.push_str(&format!(
            "{:<name_width$}  {:<5}  {:<5}  {}\n",
            lock.name, data, count, lock.holder
        ));
    }
    out
}
