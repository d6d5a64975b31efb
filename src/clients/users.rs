//! Gateway client for the current user's profile

use super::session::ApiSession;
use crate::config::ServerEnvs;
use crate::error::Result;
use crate::models::UserJson;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{info, instrument};

const CURRENT_USER_ENDPOINT: &str = "/api/users/current";
const UPDATE_USER_ENDPOINT: &str = "/api/users/update";

#[derive(Debug, Serialize)]
struct ProfileUpdate<'a> {
    id: &'a str,
    username: &'a str,
    fullname: &'a str,
    photo: &'a str,
}

pub struct UsersClient {
    session: ApiSession,
}

impl UsersClient {
    pub fn new(server: &ServerEnvs, token: &str) -> Result<Self> {
        Ok(Self {
            session: ApiSession::bearer(&server.gateway_url, token)?,
        })
    }

    #[instrument(name = "get current user", skip(self))]
    pub async fn get_current_user(&self) -> Result<UserJson> {
        let response = self
            .session
            .send(self.session.get(CURRENT_USER_ENDPOINT), "get current user")
            .await?;

        ApiSession::expect_json(response, StatusCode::OK, "get current user").await
    }

    /// Set the profile's full name, clearing the photo
    #[instrument(name = "update profile name", skip(self))]
    pub async fn update_profile_name(&self, name: &str) -> Result<()> {
        let current = self.get_current_user().await?;
        let update = ProfileUpdate {
            id: &current.id,
            username: &current.username,
            fullname: name,
            photo: "",
        };

        let response = self
            .session
            .send(
                self.session.patch(UPDATE_USER_ENDPOINT).json(&update),
                "update profile name",
            )
            .await?;
        ApiSession::expect_status(response, StatusCode::OK, "update profile name").await?;

        info!("Profile name changed to {}", name);
        Ok(())
    }
}
