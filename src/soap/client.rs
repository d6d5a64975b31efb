//! Raw-XML client for the userdata SOAP endpoint

use super::{envelope, parser};
use crate::clients::session::ApiSession;
use crate::config::ServerEnvs;
use crate::error::{HarnessError, Result};
use crate::models::{PageInfo, SoapUser, UsersPage};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const WS_ENDPOINT: &str = "/ws";

/// What the service answered with
#[derive(Debug, Clone, PartialEq)]
pub enum SoapOutcome<T> {
    Value(T),
    Fault(String),
}

/// HTTP status plus the parsed body of one SOAP call
#[derive(Debug, Clone, PartialEq)]
pub struct SoapReply<T> {
    pub status: u16,
    pub outcome: SoapOutcome<T>,
}

impl<T> SoapReply<T> {
    pub fn fault(&self) -> Option<&str> {
        match &self.outcome {
            SoapOutcome::Fault(message) => Some(message),
            SoapOutcome::Value(_) => None,
        }
    }

    /// The value, or the fault as an error
    pub fn into_value(self) -> Result<T> {
        match self.outcome {
            SoapOutcome::Value(value) => Ok(value),
            SoapOutcome::Fault(message) => Err(HarnessError::Soap(message)),
        }
    }
}

pub struct SoapClient {
    session: ApiSession,
}

impl SoapClient {
    pub fn new(server: &ServerEnvs) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/xml; charset=utf-8"));
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            session: ApiSession::new(&server.userdata_url, client),
        })
    }

    /// POST an envelope; returns the status and the body, or the fault string
    /// when `check_fault` is set and the body is a fault
    async fn call(
        &self,
        xml: String,
        operation: &str,
        check_fault: bool,
    ) -> Result<(u16, std::result::Result<String, String>)> {
        let response = self
            .session
            .send(self.session.post(WS_ENDPOINT).body(xml), operation)
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(operation, status, %body, "SOAP response");

        if check_fault {
            if let Some(fault) = parser::parse_fault(&body)? {
                warn!("SOAP {} returned fault: {}", operation, fault);
                return Ok((status, Err(fault)));
            }
        }
        Ok((status, Ok(body)))
    }

    async fn call_parsed<T>(
        &self,
        xml: String,
        operation: &str,
        parse: impl FnOnce(&str) -> Result<T>,
    ) -> Result<SoapReply<T>> {
        let (status, body) = self.call(xml, operation, true).await?;
        let outcome = match body {
            Ok(body) => SoapOutcome::Value(parse(&body)?),
            Err(fault) => SoapOutcome::Fault(fault),
        };
        Ok(SoapReply { status, outcome })
    }

    fn required_user(body: &str) -> Result<SoapUser> {
        parser::parse_user(body)?
            .ok_or_else(|| HarnessError::Soap("Response has no user element".to_string()))
    }

    #[instrument(name = "soap get current user", skip(self))]
    pub async fn get_current_user(&self, username: &str) -> Result<SoapReply<SoapUser>> {
        let reply = self
            .call_parsed(envelope::current_user(username), "currentUser", Self::required_user)
            .await?;
        info!("Fetched user {}", username);
        Ok(reply)
    }

    #[instrument(name = "soap update user", skip_all)]
    pub async fn update_user(&self, user: &SoapUser) -> Result<SoapReply<SoapUser>> {
        let reply = self
            .call_parsed(envelope::update_user(user), "updateUser", Self::required_user)
            .await?;
        info!("Updated user {}", user.username.as_deref().unwrap_or_default());
        Ok(reply)
    }

    #[instrument(name = "soap get all users", skip(self))]
    pub async fn get_all_users(
        &self,
        username: &str,
        search_query: Option<&str>,
    ) -> Result<SoapReply<Vec<SoapUser>>> {
        let reply = self
            .call_parsed(
                envelope::all_users(username, search_query),
                "allUsers",
                parser::parse_users,
            )
            .await?;
        if let SoapOutcome::Value(users) = &reply.outcome {
            info!("Fetched {} users", users.len());
        }
        Ok(reply)
    }

    #[instrument(name = "soap get all users page", skip(self))]
    pub async fn get_all_users_page(
        &self,
        username: &str,
        page_info: &PageInfo,
        search_query: Option<&str>,
    ) -> Result<SoapReply<UsersPage>> {
        self.call_parsed(
            envelope::all_users_page(username, page_info, search_query),
            "allUsersPage",
            parser::parse_users_page,
        )
        .await
    }

    #[instrument(name = "soap get friends", skip(self))]
    pub async fn get_friends(
        &self,
        username: &str,
        search_query: Option<&str>,
    ) -> Result<SoapReply<Vec<SoapUser>>> {
        let reply = self
            .call_parsed(
                envelope::friends(username, search_query),
                "friends",
                parser::parse_users,
            )
            .await?;
        if let SoapOutcome::Value(friends) = &reply.outcome {
            info!("Fetched {} friends of {}", friends.len(), username);
        }
        Ok(reply)
    }

    #[instrument(name = "soap get friends page", skip(self))]
    pub async fn get_friends_page(
        &self,
        username: &str,
        page_info: &PageInfo,
        search_query: Option<&str>,
    ) -> Result<SoapReply<UsersPage>> {
        self.call_parsed(
            envelope::friends_page(username, page_info, search_query),
            "friendsPage",
            parser::parse_users_page,
        )
        .await
    }

    #[instrument(name = "soap send friend invitation", skip(self))]
    pub async fn send_friend_invitation(
        &self,
        username: &str,
        friend_to_be_requested: &str,
    ) -> Result<SoapReply<SoapUser>> {
        let reply = self
            .call_parsed(
                envelope::send_invitation(username, friend_to_be_requested),
                "sendInvitation",
                Self::required_user,
            )
            .await?;
        info!("Invitation sent from {} to {}", username, friend_to_be_requested);
        Ok(reply)
    }

    #[instrument(name = "soap accept friend invitation", skip(self))]
    pub async fn accept_friend_invitation(
        &self,
        username: &str,
        friend_to_be_added: &str,
    ) -> Result<SoapReply<SoapUser>> {
        let reply = self
            .call_parsed(
                envelope::accept_invitation(username, friend_to_be_added),
                "acceptInvitation",
                Self::required_user,
            )
            .await?;
        info!("{} accepted invitation from {}", username, friend_to_be_added);
        Ok(reply)
    }

    #[instrument(name = "soap decline friend invitation", skip(self))]
    pub async fn decline_friend_invitation(
        &self,
        username: &str,
        invitation_to_be_declined: &str,
    ) -> Result<SoapReply<SoapUser>> {
        let reply = self
            .call_parsed(
                envelope::decline_invitation(username, invitation_to_be_declined),
                "declineInvitation",
                Self::required_user,
            )
            .await?;
        info!("{} declined invitation from {}", username, invitation_to_be_declined);
        Ok(reply)
    }

    /// Remove a friend; the body is not inspected for faults
    #[instrument(name = "soap remove friend", skip(self))]
    pub async fn remove_friend(
        &self,
        username: &str,
        friend_to_be_removed: &str,
    ) -> Result<SoapReply<()>> {
        let (status, _) = self
            .call(
                envelope::remove_friend(username, friend_to_be_removed),
                "removeFriend",
                false,
            )
            .await?;
        info!("{} removed {} from friends", username, friend_to_be_removed);
        Ok(SoapReply {
            status,
            outcome: SoapOutcome::Value(()),
        })
    }
}
