//! Stand cleanup straight through the databases

use crate::db::{AuthDb, SpendsDb, UserdataDb};
use crate::error::Result;
use tracing::{info, instrument};

/// Wipes spendings, categories and every user but the test user
pub struct StandCleaner<'a> {
    spends_db: &'a SpendsDb,
    userdata_db: &'a UserdataDb,
    auth_db: &'a AuthDb,
    test_username: &'a str,
}

impl<'a> StandCleaner<'a> {
    pub fn new(
        spends_db: &'a SpendsDb,
        userdata_db: &'a UserdataDb,
        auth_db: &'a AuthDb,
        test_username: &'a str,
    ) -> Self {
        Self {
            spends_db,
            userdata_db,
            auth_db,
            test_username,
        }
    }

    #[instrument(name = "clean stand", skip(self))]
    pub async fn clean(&self) -> Result<()> {
        let keep = [self.test_username.to_string()];

        self.spends_db.delete_all_spendings().await?;
        self.spends_db.delete_all_categories().await?;
        self.userdata_db.delete_all_users(&keep).await?;
        self.auth_db.delete_all_users(&keep).await?;

        info!("Stand cleaned, kept user {}", self.test_username);
        Ok(())
    }
}
