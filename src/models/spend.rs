//! Spendings

use super::category::{Category, CategoryAdd};
use super::enums::Currency;
use serde::{Deserialize, Serialize};

/// Spending payload for add and edit requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendAdd {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryAdd>,
    /// ISO-8601 timestamp, e.g. `2024-06-01T00:00:00.000Z`
    pub spend_date: String,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Spending as returned by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendGet {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub category: Category,
    pub spend_date: String,
    pub currency: Currency,
    pub username: String,
}

impl SpendGet {
    /// Edit payload carrying this spending's current values
    pub fn to_edit(&self) -> SpendAdd {
        SpendAdd {
            id: Some(self.id.clone()),
            amount: Some(self.amount),
            description: self.description.clone(),
            category: Some(CategoryAdd {
                id: Some(self.category.id.clone()),
                name: self.category.name.clone(),
                username: Some(self.category.username.clone()),
                archived: self.category.archived,
            }),
            spend_date: self.spend_date.clone(),
            currency: self.currency,
            username: Some(self.username.clone()),
        }
    }
}

/// Spring-style page wrapper used by the v2 endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub size: u64,
}
