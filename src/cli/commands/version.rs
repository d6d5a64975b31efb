//! `version`: harness build information

use crate::cli::error::CliResult;
use clap::Args;

/// Print the harness version and the stand protocols it speaks
#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Print only the version number, for scripts
    #[arg(long)]
    pub short: bool,
}

pub async fn execute_version(args: VersionArgs) -> CliResult<()> {
    println!("{}", version_line(args.short));
    Ok(())
}

fn version_line(short: bool) -> String {
    if short {
        return niffler_e2e::VERSION.to_string();
    }
    format!(
        "niffler-e2e {} (gateway REST, userdata SOAP, currency gRPC)",
        niffler_e2e::VERSION
    )
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_is_the_bare_version() {
        assert_eq!(version_line(true), niffler_e2e::VERSION);
    }

    #[test]
    fn test_full_line_names_the_harness() {
        let line = version_line(false);
        assert!(line.starts_with(&format!("niffler-e2e {} ", niffler_e2e::VERSION)));
        assert!(line.contains("currency gRPC"));
    }
}
