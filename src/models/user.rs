//! Users

use super::enums::{Currency, FriendshipStatus};
use serde::{Deserialize, Serialize};

/// Current user as returned by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJson {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub photo_small: Option<String>,
    #[serde(default)]
    pub friendship_status: Option<FriendshipStatus>,
}

/// Credentials of a user registered by a test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub username: String,
    pub password: String,
}
