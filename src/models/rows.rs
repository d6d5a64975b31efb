//! Rows read straight from the stand's Postgres stores

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// `spend` joined with its `category` name
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct SpendRow {
    pub id: Uuid,
    pub username: String,
    pub spend_date: NaiveDate,
    pub currency: String,
    pub amount: f64,
    pub description: String,
    pub category_id: Uuid,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub archived: bool,
}

/// `"user"` of the userdata store; photos are not selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserdataRow {
    pub id: Uuid,
    pub username: String,
    pub currency: String,
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub full_name: Option<String>,
}

/// `"user"` of the auth store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct AuthUserRow {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub enabled: bool,
    pub account_non_expired: bool,
    pub account_non_locked: bool,
    pub credentials_non_expired: bool,
}
