//! Shared error types for the services crate.

use thiserror::Error;

use cyber_core::model::{TrainingSessionError, UserError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by content generation.
///
/// Every variant means the same thing to callers: no usable content came
/// back, fall back to the static catalog. Transport failures and malformed
/// responses are deliberately not distinguished at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("generation returned an empty response")]
    EmptyResponse,
    #[error("generation returned invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `UserService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    #[error("email is already registered")]
    EmailTaken,
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Storage(StorageError),
}

/// Errors emitted by `TrainingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainingError {
    #[error("user not found")]
    UserNotFound,
    #[error("training session not found")]
    SessionNotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `MetricsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MetricsError {
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SeedService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Session(#[from] TrainingSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
