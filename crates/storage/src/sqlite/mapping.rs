use cyber_core::model::{
    CompletionStatus, ModuleContent, SessionId, TrainingSession, User, UserId,
};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn user_id_from_i64(v: i64) -> Result<UserId, StorageError> {
    Ok(UserId::new(i64_to_u64("user_id", v)?))
}

pub(crate) fn session_id_from_i64(v: i64) -> Result<SessionId, StorageError> {
    Ok(SessionId::new(i64_to_u64("session_id", v)?))
}

pub(crate) fn user_id_to_i64(id: UserId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("user_id overflow".into()))
}

pub(crate) fn session_id_to_i64(id: SessionId) -> Result<i64, StorageError> {
    i64::try_from(id.value())
        .map_err(|_| StorageError::Serialization("session_id overflow".into()))
}

pub(crate) fn parse_completion_status(s: &str) -> Result<CompletionStatus, StorageError> {
    match s {
        "not_started" => Ok(CompletionStatus::NotStarted),
        "in_progress" => Ok(CompletionStatus::InProgress),
        "completed" => Ok(CompletionStatus::Completed),
        _ => Err(StorageError::Serialization(format!("invalid status: {s}"))),
    }
}

/// Serializes the content payload to its stored JSON form.
pub(crate) fn content_to_json(content: &ModuleContent) -> Result<String, StorageError> {
    serde_json::to_string(content).map_err(ser)
}

/// Deserializes the stored JSON blob back into the content payload.
pub(crate) fn content_from_json(raw: &str) -> Result<ModuleContent, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn map_user_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, StorageError> {
    User::from_persisted(
        user_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("email").map_err(ser)?,
        row.try_get::<String, _>("organization").map_err(ser)?,
        row.try_get::<String, _>("industry").map_err(ser)?,
        row.try_get::<String, _>("role").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
        row.try_get("risk_score").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_session_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<TrainingSession, StorageError> {
    let status_str: String = row.try_get("completion_status").map_err(ser)?;
    let content_raw: String = row.try_get("content").map_err(ser)?;

    TrainingSession::from_persisted(
        session_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        user_id_from_i64(row.try_get::<i64, _>("user_id").map_err(ser)?)?,
        row.try_get::<String, _>("module_name").map_err(ser)?,
        content_from_json(&content_raw)?,
        parse_completion_status(status_str.as_str())?,
        row.try_get("quiz_score").map_err(ser)?,
        row.try_get("started_at").map_err(ser)?,
        row.try_get("completed_at").map_err(ser)?,
    )
    .map_err(ser)
}
