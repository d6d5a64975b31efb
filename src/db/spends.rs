//! Spend store: `spend` and `category`

use super::Database;
use crate::error::Result;
use crate::models::{CategoryRow, SpendRow};
use tracing::{info, instrument};
use uuid::Uuid;

const SELECT_SPENDS: &str = "SELECT s.id, s.username, s.spend_date, s.currency, s.amount, \
     s.description, s.category_id, c.name AS category_name \
     FROM spend s JOIN category c ON c.id = s.category_id";

pub struct SpendsDb {
    db: Database,
}

impl SpendsDb {
    pub async fn connect(url: &str) -> Result<Self> {
        Ok(Self {
            db: Database::connect(url).await?,
        })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    #[instrument(name = "db get user spendings", skip(self))]
    pub async fn get_user_spendings(&self, username: &str) -> Result<Vec<SpendRow>> {
        let sql = format!("{} WHERE s.username = $1 ORDER BY s.spend_date DESC", SELECT_SPENDS);
        self.db.trace(&sql);

        Ok(sqlx::query_as::<_, SpendRow>(&sql)
            .bind(username)
            .fetch_all(self.db.pool())
            .await?)
    }

    #[instrument(name = "db get spending by id", skip(self))]
    pub async fn get_spending_by_id(&self, id: Uuid) -> Result<Option<SpendRow>> {
        let sql = format!("{} WHERE s.id = $1", SELECT_SPENDS);
        self.db.trace(&sql);

        Ok(sqlx::query_as::<_, SpendRow>(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?)
    }

    #[instrument(name = "db get user categories", skip(self))]
    pub async fn get_user_categories(&self, username: &str) -> Result<Vec<CategoryRow>> {
        let sql = "SELECT id, name, username, archived FROM category WHERE username = $1 ORDER BY name";
        self.db.trace(sql);

        Ok(sqlx::query_as::<_, CategoryRow>(sql)
            .bind(username)
            .fetch_all(self.db.pool())
            .await?)
    }

    /// Delete a category with its spendings; false when it did not exist
    #[instrument(name = "db delete category", skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        let delete_spends = "DELETE FROM spend WHERE category_id = $1";
        self.db.trace(delete_spends);
        sqlx::query(delete_spends).bind(id).execute(&mut *tx).await?;

        let delete_category = "DELETE FROM category WHERE id = $1";
        self.db.trace(delete_category);
        let deleted = sqlx::query(delete_category)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    /// Delete every category of a user; returns how many were removed
    #[instrument(name = "db delete user categories", skip(self))]
    pub async fn delete_user_categories(&self, username: &str) -> Result<usize> {
        let categories = self.get_user_categories(username).await?;

        let mut deleted = 0;
        for category in &categories {
            info!("Deleting category {} ({})", category.name, category.id);
            if self.delete_category(category.id).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    #[instrument(name = "db delete all spendings", skip(self))]
    pub async fn delete_all_spendings(&self) -> Result<u64> {
        let sql = "DELETE FROM spend";
        self.db.trace(sql);

        let deleted = sqlx::query(sql).execute(self.db.pool()).await?.rows_affected();
        info!("Deleted {} spendings", deleted);
        Ok(deleted)
    }

    /// Delete every category; spendings must be gone first
    #[instrument(name = "db delete all categories", skip(self))]
    pub async fn delete_all_categories(&self) -> Result<u64> {
        let sql = "DELETE FROM category";
        self.db.trace(sql);

        let deleted = sqlx::query(sql).execute(self.db.pool()).await?.rows_affected();
        info!("Deleted {} categories", deleted);
        Ok(deleted)
    }
}
