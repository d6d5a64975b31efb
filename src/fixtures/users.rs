//! Throwaway users for SOAP scenarios

use super::data::{random_password, random_username};
use super::wait::wait_until;
use crate::clients::OAuthClient;
use crate::db::{AuthDb, UserdataDb};
use crate::error::Result;
use crate::models::{UserData, UserdataRow};
use crate::soap::SoapClient;
use std::time::Duration;
use tracing::{info, instrument, warn};

const PASSWORD_LENGTH: usize = 10;

/// Actions users only befriend this many of the created users
pub const ACTIONS_FRIENDS_LIMIT: usize = 5;

/// Userdata rows appear asynchronously after registration
const USERDATA_WAIT: Duration = Duration::from_secs(5);
const USERDATA_POLL: Duration = Duration::from_millis(300);

/// Marker embedded in generated usernames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    Plain,
    Friend,
    Actions,
}

impl UserKind {
    fn marker(&self) -> &'static str {
        match self {
            UserKind::Plain => "",
            UserKind::Friend => "Friend_",
            UserKind::Actions => "Actions_",
        }
    }
}

/// How the created users relate to an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedUsers<'a> {
    Plain,
    /// Every created user becomes a friend of this user
    FriendsOf(&'a str),
    /// The first few created users become friends of this user
    ActionsFor(&'a str),
}

pub struct SoapUserCreator<'a> {
    oauth: &'a OAuthClient,
    soap: &'a SoapClient,
    userdata_db: &'a UserdataDb,
    auth_db: &'a AuthDb,
}

impl<'a> SoapUserCreator<'a> {
    pub fn new(
        oauth: &'a OAuthClient,
        soap: &'a SoapClient,
        userdata_db: &'a UserdataDb,
        auth_db: &'a AuthDb,
    ) -> Self {
        Self {
            oauth,
            soap,
            userdata_db,
            auth_db,
        }
    }

    #[instrument(name = "register mock users", skip(self))]
    pub async fn register_users(&self, count: usize, kind: UserKind) -> Result<Vec<UserData>> {
        let mut users = Vec::with_capacity(count);
        for index in 0..count {
            let user = UserData {
                username: random_username(kind.marker(), index),
                password: random_password(PASSWORD_LENGTH),
            };
            self.oauth.register(&user.username, &user.password).await?;
            self.wait_for_userdata(&user.username).await?;
            users.push(user);
        }
        Ok(users)
    }

    /// Each user invites `friend_of`, who accepts; stops after `limit` users
    #[instrument(name = "add mock friends", skip(self, users))]
    pub async fn add_friends(
        &self,
        users: &[UserData],
        friend_of: &str,
        limit: Option<usize>,
    ) -> Result<()> {
        let limit = limit.unwrap_or(users.len());
        for user in users.iter().take(limit) {
            self.soap
                .send_friend_invitation(&user.username, friend_of)
                .await?
                .into_value()?;
            self.soap
                .accept_friend_invitation(friend_of, &user.username)
                .await?
                .into_value()?;
        }
        Ok(())
    }

    pub async fn create_users(
        &self,
        count: usize,
        relation: CreatedUsers<'_>,
    ) -> Result<Vec<UserData>> {
        let users = match relation {
            CreatedUsers::Plain => self.register_users(count, UserKind::Plain).await?,
            CreatedUsers::FriendsOf(friend_of) => {
                let users = self.register_users(count, UserKind::Friend).await?;
                self.add_friends(&users, friend_of, None).await?;
                users
            }
            CreatedUsers::ActionsFor(friend_of) => {
                let users = self.register_users(count, UserKind::Actions).await?;
                self.add_friends(&users, friend_of, Some(ACTIONS_FRIENDS_LIMIT))
                    .await?;
                users
            }
        };

        info!("Created {} mock users", users.len());
        Ok(users)
    }

    /// Remove users from userdata and auth; unknown users are skipped
    #[instrument(name = "delete mock users", skip_all)]
    pub async fn delete_users(&self, users: &[UserData]) -> Result<()> {
        for user in users {
            let Some(row) = self.userdata_db.get_user_by_name(&user.username).await? else {
                warn!("User {} not found in userdata, skipping", user.username);
                continue;
            };
            self.userdata_db.delete_user(row.id).await?;
            self.auth_db.delete_user(&user.username).await?;
        }

        info!("Deleted {} mock users", users.len());
        Ok(())
    }

    /// Wait for a freshly registered user to reach the userdata store
    pub async fn wait_for_userdata(&self, username: &str) -> Result<UserdataRow> {
        wait_for_userdata(self.userdata_db, username).await
    }
}

/// Poll the userdata store until `username` shows up
pub async fn wait_for_userdata(userdata_db: &UserdataDb, username: &str) -> Result<UserdataRow> {
    wait_until(USERDATA_WAIT, USERDATA_POLL, move || {
        userdata_db.get_user_by_name(username)
    })
    .await
}
