//! Userdata shapes of the SOAP endpoint

use super::enums::Direction;
use super::validation::{PAGE_INDEX_NEGATIVE, PAGE_SIZE_TOO_SMALL};
use serde::{Deserialize, Serialize};

/// User element of a SOAP response; absent elements stay `None`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SoapUser {
    pub id: Option<String>,
    pub username: Option<String>,
    pub currency: Option<String>,
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub photo: Option<String>,
    pub photo_small: Option<String>,
    pub full_name: Option<String>,
    pub friendship_status: Option<String>,
}

/// Paging request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: i64,
    pub size: i64,
    pub sort: Option<Direction>,
}

impl PageInfo {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    /// Fault the service answers with when the request is out of bounds
    pub fn expected_fault(&self) -> Option<&'static str> {
        if self.page < 0 {
            Some(PAGE_INDEX_NEGATIVE)
        } else if self.size < 1 {
            Some(PAGE_SIZE_TOO_SMALL)
        } else {
            None
        }
    }
}

/// One page of users
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsersPage {
    pub users: Vec<SoapUser>,
    pub size: i64,
    pub number: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}
