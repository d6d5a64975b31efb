//! Token command implementation

use super::load_config;
use crate::cli::error::CliResult;
use clap::Args;
use niffler_e2e::{OAuthClient, RegistrationOutcome};
use std::path::Path;
use tracing::info;

/// Print an access token
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// User to log in as (defaults to TEST_USERNAME)
    #[arg(long)]
    pub username: Option<String>,

    /// Password for --username (defaults to TEST_PASSWORD)
    #[arg(long, requires = "username")]
    pub password: Option<String>,

    /// Skip registration and only log in
    #[arg(long)]
    pub no_register: bool,
}

pub async fn execute_token(config: Option<&Path>, args: TokenArgs) -> CliResult<()> {
    let config = load_config(config)?;
    let username = args.username.unwrap_or(config.client.test_username);
    let password = args.password.unwrap_or(config.client.test_password);

    let oauth = OAuthClient::new(&config.server);
    if !args.no_register {
        match oauth.register(&username, &password).await? {
            RegistrationOutcome::Created => info!("Registered user {}", username),
            RegistrationOutcome::AlreadyExists => info!("User {} already registered", username),
        }
    }

    let token = oauth.get_token(&username, &password).await?;
    println!("{}", token);
    Ok(())
}
