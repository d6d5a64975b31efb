//! Enumerations shared by the gateway, SOAP and gRPC surfaces

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Rub,
    Eur,
    Usd,
    Kzt,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Rub, Currency::Eur, Currency::Usd, Currency::Kzt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Kzt => "KZT",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown currency: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendshipStatus {
    InviteSent,
    InviteReceived,
    Friend,
    Void,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::InviteSent => "INVITE_SENT",
            FriendshipStatus::InviteReceived => "INVITE_RECEIVED",
            FriendshipStatus::Friend => "FRIEND",
            FriendshipStatus::Void => "VOID",
        }
    }
}

impl FromStr for FriendshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "INVITE_SENT" => Ok(FriendshipStatus::InviteSent),
            "INVITE_RECEIVED" => Ok(FriendshipStatus::InviteReceived),
            "FRIEND" => Ok(FriendshipStatus::Friend),
            "VOID" => Ok(FriendshipStatus::Void),
            other => Err(format!("Unknown friendship status: {}", other)),
        }
    }
}

/// Sort direction for paged SOAP queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}
