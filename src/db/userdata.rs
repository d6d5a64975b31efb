//! Userdata store: `"user"` and `friendship`

use super::Database;
use crate::error::Result;
use crate::models::UserdataRow;
use tracing::{info, instrument};
use uuid::Uuid;

const SELECT_USERS: &str =
    r#"SELECT id, username, currency, firstname, surname, full_name FROM "user""#;

pub struct UserdataDb {
    db: Database,
}

impl UserdataDb {
    pub async fn connect(url: &str) -> Result<Self> {
        Ok(Self {
            db: Database::connect(url).await?,
        })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    #[instrument(name = "db get userdata users", skip(self))]
    pub async fn get_users(&self) -> Result<Vec<UserdataRow>> {
        let sql = format!("{} ORDER BY username", SELECT_USERS);
        self.db.trace(&sql);

        Ok(sqlx::query_as::<_, UserdataRow>(&sql)
            .fetch_all(self.db.pool())
            .await?)
    }

    #[instrument(name = "db get userdata user", skip(self))]
    pub async fn get_user_by_name(&self, username: &str) -> Result<Option<UserdataRow>> {
        let sql = format!("{} WHERE username = $1", SELECT_USERS);
        self.db.trace(&sql);

        Ok(sqlx::query_as::<_, UserdataRow>(&sql)
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?)
    }

    /// Delete a user and their friendships; false when no such user
    #[instrument(name = "db delete userdata user", skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        let delete_friendships = "DELETE FROM friendship WHERE requester_id = $1 OR addressee_id = $1";
        self.db.trace(delete_friendships);
        sqlx::query(delete_friendships).bind(id).execute(&mut *tx).await?;

        let delete_user = r#"DELETE FROM "user" WHERE id = $1"#;
        self.db.trace(delete_user);
        let deleted = sqlx::query(delete_user)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    /// Delete every user whose name is not in `exclude`
    #[instrument(name = "db delete all userdata users", skip(self))]
    pub async fn delete_all_users(&self, exclude: &[String]) -> Result<u64> {
        let mut tx = self.db.pool().begin().await?;

        let delete_friendships = r#"DELETE FROM friendship
            WHERE requester_id IN (SELECT id FROM "user" WHERE username <> ALL($1))
               OR addressee_id IN (SELECT id FROM "user" WHERE username <> ALL($1))"#;
        self.db.trace(delete_friendships);
        sqlx::query(delete_friendships)
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
        info!("Deleted {} userdata users", deleted);
        Ok(deleted)
    }
}
