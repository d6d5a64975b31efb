//! Gateway client for spendings, categories and currencies

use super::session::ApiSession;
use crate::config::{ClientEnvs, ServerEnvs};
use crate::error::{HarnessError, Result};
use crate::models::{Category, CategoryAdd, Page, ProblemDetail, SpendAdd, SpendGet};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{info, instrument};

const ALL_SPENDS_ENDPOINT: &str = "/api/v2/spends/all";
const ADD_SPENDS_ENDPOINT: &str = "/api/spends/add";
const EDIT_SPEND_ENDPOINT: &str = "/api/spends/edit";
const DELETE_SPENDS_ENDPOINT: &str = "/api/spends/remove";

const ADD_CATEGORY_ENDPOINT: &str = "/api/categories/add";
const UPDATE_CATEGORY_ENDPOINT: &str = "/api/categories/update";
const ALL_CATEGORIES_ENDPOINT: &str = "/api/categories/all";

const CURRENCIES_ENDPOINT: &str = "/api/currencies";

/// Upper bound on spendings fetched in one page
const ALL_SPENDS_PAGE_SIZE: u32 = 1000;

/// Result of adding a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCategoryOutcome {
    Created(Category),
    Conflict(ProblemDetail),
}

impl AddCategoryOutcome {
    pub fn created(self) -> Result<Category> {
        match self {
            AddCategoryOutcome::Created(category) => Ok(category),
            AddCategoryOutcome::Conflict(problem) => Err(HarnessError::UnexpectedStatus {
                operation: "add category".to_string(),
                status: problem.status,
                body: problem.detail,
            }),
        }
    }
}

/// Currency entry of `/api/currencies`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyJson {
    pub currency: crate::models::Currency,
    #[serde(default)]
    pub currency_rate: Option<f64>,
}

pub struct SpendsClient {
    session: ApiSession,
    client_envs: ClientEnvs,
}

impl SpendsClient {
    pub fn new(server: &ServerEnvs, client_envs: &ClientEnvs, token: &str) -> Result<Self> {
        Ok(Self {
            session: ApiSession::bearer(&server.gateway_url, token)?,
            client_envs: client_envs.clone(),
        })
    }

    /// Add a spending; the username defaults to the test user
    #[instrument(name = "add spending", skip_all)]
    pub async fn add_spending(&self, mut spend: SpendAdd) -> Result<SpendGet> {
        if spend.username.is_none() {
            spend.username = Some(self.client_envs.test_username.clone());
        }

        let response = self
            .session
            .send(self.session.post(ADD_SPENDS_ENDPOINT).json(&spend), "add spending")
            .await?;
        let added: SpendGet =
            ApiSession::expect_json(response, StatusCode::CREATED, "add spending").await?;

        info!("Spending added: {}", added.id);
        Ok(added)
    }

    #[instrument(name = "get all spendings", skip_all)]
    pub async fn get_all_spendings(&self) -> Result<Vec<SpendGet>> {
        let request = self
            .session
            .get(ALL_SPENDS_ENDPOINT)
            .query(&[("size", ALL_SPENDS_PAGE_SIZE)]);
        let response = self.session.send(request, "get all spendings").await?;
        let page: Page<SpendGet> =
            ApiSession::expect_json(response, StatusCode::OK, "get all spendings").await?;

        Ok(page.content)
    }

    #[instrument(name = "get spending by id", skip(self))]
    pub async fn get_spending_by_id(&self, id: &str) -> Result<SpendGet> {
        let path = format!("/api/spends/{}", id);
        let response = self
            .session
            .send(self.session.get(&path), "get spending by id")
            .await?;

        ApiSession::expect_json(response, StatusCode::OK, "get spending by id").await
    }

    #[instrument(name = "update spending", skip_all)]
    pub async fn update_spending(&self, spend: &SpendAdd) -> Result<SpendGet> {
        let response = self
            .session
            .send(self.session.patch(EDIT_SPEND_ENDPOINT).json(spend), "update spending")
            .await?;

        ApiSession::expect_json(response, StatusCode::OK, "update spending").await
    }

    /// Delete the given spendings, or every spending of the user when `ids` is `None`
    #[instrument(name = "delete spendings", skip(self))]
    pub async fn clear_spendings(&self, ids: Option<Vec<String>>) -> Result<()> {
        let ids = match ids {
            Some(ids) => ids,
            None => self
                .get_all_spendings()
                .await?
                .into_iter()
                .map(|spend| spend.id)
                .collect(),
        };
        if ids.is_empty() {
            info!("No spendings to delete");
            return Ok(());
        }

        let request = self
            .session
            .delete(DELETE_SPENDS_ENDPOINT)
            .query(&[("ids", ids.join(","))]);
        let response = self.session.send(request, "delete spendings").await?;
        ApiSession::expect_status(response, StatusCode::OK, "delete spendings").await?;

        info!("Deleted {} spendings", ids.len());
        Ok(())
    }

    /// Add a category; a duplicate name yields the server's problem detail
    #[instrument(name = "add category", skip(self))]
    pub async fn add_category(&self, name: &str) -> Result<AddCategoryOutcome> {
        let response = self
            .session
            .send(
                self.session
                    .post(ADD_CATEGORY_ENDPOINT)
                    .json(&CategoryAdd::named(name)),
                "add category",
            )
            .await?;

        if response.status() == StatusCode::CONFLICT {
            info!("Category {} already exists", name);
            let problem =
                ApiSession::expect_json(response, StatusCode::CONFLICT, "add category").await?;
            return Ok(AddCategoryOutcome::Conflict(problem));
        }

        let category = ApiSession::expect_json(response, StatusCode::OK, "add category").await?;
        info!("Category {} added", name);
        Ok(AddCategoryOutcome::Created(category))
    }

    #[instrument(name = "get all categories", skip(self))]
    pub async fn get_all_categories(&self, exclude_archived: bool) -> Result<Vec<Category>> {
        let request = self
            .session
            .get(ALL_CATEGORIES_ENDPOINT)
            .query(&[("excludeArchived", exclude_archived)]);
        let response = self.session.send(request, "get all categories").await?;

        ApiSession::expect_json(response, StatusCode::OK, "get all categories").await
    }

    #[instrument(name = "get category by name", skip(self))]
    pub async fn get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .get_all_categories(false)
            .await?
            .into_iter()
            .find(|category| category.name == name))
    }

    #[instrument(name = "update category", skip_all)]
    pub async fn update_category(&self, category: &Category) -> Result<Category> {
        let response = self
            .session
            .send(
                self.session.patch(UPDATE_CATEGORY_ENDPOINT).json(category),
                "update category",
            )
            .await?;
        let updated = ApiSession::expect_json(response, StatusCode::OK, "update category").await?;

        info!("Category {} updated", category.name);
        Ok(updated)
    }

    #[instrument(name = "get currencies", skip(self))]
    pub async fn get_currencies(&self) -> Result<Vec<CurrencyJson>> {
        let response = self
            .session
            .send(self.session.get(CURRENCIES_ENDPOINT), "get currencies")
            .await?;

        ApiSession::expect_json(response, StatusCode::OK, "get currencies").await
    }
}
