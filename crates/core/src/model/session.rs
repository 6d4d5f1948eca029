use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::ids::{SessionId, UserId};
use crate::model::module::ModuleContent;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrainingSessionError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Lifecycle state of one training attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl CompletionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionStatus::NotStarted => "not_started",
            CompletionStatus::InProgress => "in_progress",
            CompletionStatus::Completed => "completed",
        }
    }
}

/// One user's attempt at one module.
///
/// Sessions are created already in progress (content attached, start
/// timestamp set) and mutated once more on completion. Completing again
/// overwrites the score and completion timestamp; there is no detection of
/// racing completions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSession {
    id: SessionId,
    user_id: UserId,
    module_name: String,
    content: ModuleContent,
    status: CompletionStatus,
    quiz_score: Option<f64>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl TrainingSession {
    /// Creates a session at training start: in progress, content attached.
    #[must_use]
    pub fn begin(
        id: SessionId,
        user_id: UserId,
        module_name: impl Into<String>,
        content: ModuleContent,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            module_name: module_name.into(),
            content,
            status: CompletionStatus::InProgress,
            quiz_score: None,
            started_at: Some(started_at),
            completed_at: None,
        }
    }

    /// Rehydrates a session from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `TrainingSessionError::InvalidTimeRange` if both timestamps are
    /// present and completion precedes the start.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: SessionId,
        user_id: UserId,
        module_name: impl Into<String>,
        content: ModuleContent,
        status: CompletionStatus,
        quiz_score: Option<f64>,
        started_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, TrainingSessionError> {
        if let (Some(started), Some(completed)) = (started_at, completed_at) {
            if completed < started {
                return Err(TrainingSessionError::InvalidTimeRange);
            }
        }

        Ok(Self {
            id,
            user_id,
            module_name: module_name.into(),
            content,
            status,
            quiz_score,
            started_at,
            completed_at,
        })
    }

    /// Marks the session completed with the given quiz score.
    ///
    /// Accepts any numeric score; calling this on an already-completed session
    /// simply overwrites the score and completion timestamp (last write wins).
    pub fn complete(&mut self, quiz_score: f64, completed_at: DateTime<Utc>) {
        self.status = CompletionStatus::Completed;
        self.quiz_score = Some(quiz_score);
        self.completed_at = Some(completed_at);
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    #[must_use]
    pub fn content(&self) -> &ModuleContent {
        &self.content
    }

    #[must_use]
    pub fn status(&self) -> CompletionStatus {
        self.status
    }

    #[must_use]
    pub fn quiz_score(&self) -> Option<f64> {
        self.quiz_score
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}
