//! Auth store: `"user"` and `authority`

use super::Database;
use crate::error::Result;
use crate::models::AuthUserRow;
use tracing::{info, instrument};

const SELECT_USERS: &str = r#"SELECT id, username, password, enabled, account_non_expired,
    account_non_locked, credentials_non_expired FROM "user""#;

pub struct AuthDb {
    db: Database,
}

impl AuthDb {
    pub async fn connect(url: &str) -> Result<Self> {
        Ok(Self {
            db: Database::connect(url).await?,
        })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    #[instrument(name = "db get auth users", skip(self))]
    pub async fn get_users(&self) -> Result<Vec<AuthUserRow>> {
        let sql = format!("{} ORDER BY username", SELECT_USERS);
        self.db.trace(&sql);

        Ok(sqlx::query_as::<_, AuthUserRow>(&sql)
            .fetch_all(self.db.pool())
            .await?)
    }

    #[instrument(name = "db get auth user", skip(self))]
    pub async fn get_user_by_name(&self, username: &str) -> Result<Option<AuthUserRow>> {
        let sql = format!("{} WHERE username = $1", SELECT_USERS);
        self.db.trace(&sql);

        Ok(sqlx::query_as::<_, AuthUserRow>(&sql)
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?)
    }

    /// Delete a user and their authorities; false when no such user
    #[instrument(name = "db delete auth user", skip(self))]
    pub async fn delete_user(&self, username: &str) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        let delete_authorities =
            r#"DELETE FROM authority WHERE user_id IN (SELECT id FROM "user" WHERE username = $1)"#;
        self.db.trace(delete_authorities);
        sqlx::query(delete_authorities)
            .bind(username)
            .execute(&mut *tx)
            .await?;

        let delete_user = r#"DELETE FROM "user" WHERE username = $1"#;
        self.db.trace(delete_user);
        let deleted = sqlx::query(delete_user)
            .bind(username)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    /// Delete every user whose name is not in `exclude`
    #[instrument(name = "db delete all auth users", skip(self))]
    pub async fn delete_all_users(&self, exclude: &[String]) -> Result<u64> {
        let mut tx = self.db.pool().begin().await?;

        let delete_authorities = r#"DELETE FROM authority
            WHERE user_id IN (SELECT id FROM "user" WHERE username <> ALL($1))"#;
        self.db.trace(delete_authorities);
        sqlx::query(delete_authorities)
            .bind(exclude)
            .execute(&mut *tx)
            .await?;

        let delete_users = r#"DELETE FROM "user" WHERE username <> ALL($1)"#;
        self.db.trace(delete_users);
        let deleted = sqlx::query(delete_users)
            .bind(exclude)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        info!("Deleted {} auth users", deleted);
        Ok(deleted)
    }
}
