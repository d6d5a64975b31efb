//! Everything a stand test needs, connected once per test

use super::cleaner::StandCleaner;
use super::users::SoapUserCreator;
use crate::clients::{CurrencyClient, OAuthClient, SpendsClient, UsersClient};
use crate::config::HarnessConfig;
use crate::db::{AuthDb, SpendsDb, UserdataDb};
use crate::error::Result;
use crate::lock::LockManager;
use crate::soap::SoapClient;
use tracing::info;

/// Connected clients and databases for the configured stand, authorized as the
/// test user
pub struct StandContext {
    pub config: HarnessConfig,
    pub locks: LockManager,
    pub oauth: OAuthClient,
    pub token: String,
    pub spends: SpendsClient,
    pub users: UsersClient,
    pub soap: SoapClient,
    pub currency: CurrencyClient,
    pub spends_db: SpendsDb,
    pub userdata_db: UserdataDb,
    pub auth_db: AuthDb,
}

impl StandContext {
    /// Load configuration from the environment and connect
    pub async fn from_env() -> Result<Self> {
        crate::init_logging();
        Self::connect(HarnessConfig::load()?).await
    }

    /// Register the test user (if needed), log in and connect every client
    pub async fn connect(config: HarnessConfig) -> Result<Self> {
        let server = &config.server;
        let client = &config.client;

        let oauth = OAuthClient::new(server);
        oauth
            .register(&client.test_username, &client.test_password)
            .await?;
        let token = oauth
            .get_token(&client.test_username, &client.test_password)
            .await?;

        let spends = SpendsClient::new(server, client, &token)?;
        let users = UsersClient::new(server, &token)?;
        let soap = SoapClient::new(server)?;
        let currency = CurrencyClient::connect(&server.currency_url).await?;

        let (spends_db, userdata_db, auth_db) = futures::try_join!(
            SpendsDb::connect(&server.spends_db_url),
            UserdataDb::connect(&server.userdata_db_url),
            AuthDb::connect(&server.auth_db_url),
        )?;

        let locks = LockManager::new(config.lock.clone())?;

        info!("Stand context ready for {}", client.test_username);
        Ok(Self {
            config,
            locks,
            oauth,
            token,
            spends,
            users,
            soap,
            currency,
            spends_db,
            userdata_db,
            auth_db,
        })
    }

    pub fn test_username(&self) -> &str {
        &self.config.client.test_username
    }

    pub fn cleaner(&self) -> StandCleaner<'_> {
        StandCleaner::new(
            &self.spends_db,
            &self.userdata_db,
            &self.auth_db,
            self.test_username(),
        )
    }

    pub fn user_creator(&self) -> SoapUserCreator<'_> {
        SoapUserCreator::new(&self.oauth, &self.soap, &self.userdata_db, &self.auth_db)
    }
}
