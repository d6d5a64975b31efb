//! Data shapes exchanged with the stand: gateway JSON, SOAP users and DB rows

pub mod category;
pub mod enums;
pub mod rows;
pub mod soap;
pub mod spend;
pub mod user;
pub mod validation;

pub use category::{Category, CategoryAdd};
pub use enums::{Currency, Direction, FriendshipStatus};
pub use rows::{AuthUserRow, CategoryRow, SpendRow, UserdataRow};
pub use soap::{PageInfo, SoapUser, UsersPage};
pub use spend::{Page, SpendAdd, SpendGet};
pub use user::{UserData, UserJson};

use serde::{Deserialize, Serialize};

/// RFC 7807 error body returned by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub instance: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_detail_from_conflict_body() {
        let body = r#"{
            "type": "niffler-spend: Bad request ",
            "title": "Conflict",
            "status": 409,
            "detail": "Cannot save duplicates",
            "instance": "/api/categories/add"
        }"#;

        let problem: ProblemDetail = serde_json::from_str(body).unwrap();
        assert_eq!(problem.kind, "niffler-spend: Bad request ");
        assert_eq!(problem.status, 409);
        assert_eq!(problem.detail, validation::CATEGORY_DUPLICATE);
    }
}
