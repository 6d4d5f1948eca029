use cyber_core::model::{User, UserId};

use super::{SqliteRepository, mapping};
use crate::repository::{NewUserRecord, StorageError, UserRepository};

fn map_insert_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
        _ => StorageError::Connection(e.to_string()),
    }
}

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_user(&self, record: NewUserRecord) -> Result<UserId, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO users (email, organization, industry, role, created_at, risk_score)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(record.email)
        .bind(record.organization)
        .bind(record.industry)
        .bind(record.role)
        .bind(record.created_at)
        .bind(record.risk_score)
        .execute(self.pool())
        .await
        .map_err(map_insert_err)?;

        mapping::user_id_from_i64(result.last_insert_rowid())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, email, organization, industry, role, created_at, risk_score
            FROM users
            WHERE id = ?1
            ",
        )
        .bind(mapping::user_id_to_i64(id)?)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(mapping::map_user_row).transpose()
    }

    async fn delete_all_users(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM users")
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }
}
