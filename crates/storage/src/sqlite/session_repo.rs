use cyber_core::model::{SessionId, TrainingSession, UserId};

use super::{SqliteRepository, mapping};
use crate::repository::{NewSessionRecord, StorageError, TrainingSessionRepository};

#[async_trait::async_trait]
impl TrainingSessionRepository for SqliteRepository {
    async fn insert_session(&self, record: NewSessionRecord) -> Result<SessionId, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO training_sessions (
                user_id, module_name, content, completion_status,
                quiz_score, started_at, completed_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(mapping::user_id_to_i64(record.user_id)?)
        .bind(record.module_name)
        .bind(mapping::content_to_json(&record.content)?)
        .bind(record.status.as_str())
        .bind(record.quiz_score)
        .bind(record.started_at)
        .bind(record.completed_at)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        mapping::session_id_from_i64(result.last_insert_rowid())
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<TrainingSession>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, module_name, content, completion_status,
                   quiz_score, started_at, completed_at
            FROM training_sessions
            WHERE id = ?1
            ",
        )
        .bind(mapping::session_id_to_i64(id)?)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(mapping::map_session_row).transpose()
    }

    async fn update_session(&self, session: &TrainingSession) -> Result<(), StorageError> {
        let result = sqlx::query(
            r"
            UPDATE training_sessions SET
                module_name = ?2,
                content = ?3,
                completion_status = ?4,
                quiz_score = ?5,
                started_at = ?6,
                completed_at = ?7
            WHERE id = ?1
            ",
        )
        .bind(mapping::session_id_to_i64(session.id())?)
        .bind(session.module_name())
        .bind(mapping::content_to_json(session.content())?)
        .bind(session.status().as_str())
        .bind(session.quiz_score())
        .bind(session.started_at())
        .bind(session.completed_at())
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn sessions_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TrainingSession>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, module_name, content, completion_status,
                   quiz_score, started_at, completed_at
            FROM training_sessions
            WHERE user_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(mapping::user_id_to_i64(user_id)?)
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            sessions.push(mapping::map_session_row(row)?);
        }
        Ok(sessions)
    }

    async fn delete_all_sessions(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM training_sessions")
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }
}
