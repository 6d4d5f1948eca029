use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cyber_core::model::{
    CompletionStatus, ModuleContent, SessionId, TrainingSession, User, UserId,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a user; the backend assigns the id.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub email: String,
    pub organization: String,
    pub industry: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub risk_score: f64,
}

impl NewUserRecord {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            email: user.email().to_owned(),
            organization: user.organization().to_owned(),
            industry: user.industry().to_owned(),
            role: user.role().to_owned(),
            created_at: user.created_at(),
            risk_score: user.risk_score(),
        }
    }
}

/// Insert shape for a training session; the backend assigns the id.
#[derive(Debug, Clone)]
pub struct NewSessionRecord {
    pub user_id: UserId,
    pub module_name: String,
    pub content: ModuleContent,
    pub status: CompletionStatus,
    pub quiz_score: Option<f64>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl NewSessionRecord {
    #[must_use]
    pub fn from_session(session: &TrainingSession) -> Self {
        Self {
            user_id: session.user_id(),
            module_name: session.module_name().to_owned(),
            content: session.content().clone(),
            status: session.status(),
            quiz_score: session.quiz_score(),
            started_at: session.started_at(),
            completed_at: session.completed_at(),
        }
    }
}

/// Repository contract for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered,
    /// or other storage errors.
    async fn insert_user(&self, record: NewUserRecord) -> Result<UserId, StorageError>;

    /// Fetch a user by id, `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError>;

    /// Remove every user. Used only by the demo reset.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn delete_all_users(&self) -> Result<(), StorageError>;
}

/// Repository contract for training sessions.
#[async_trait]
pub trait TrainingSessionRepository: Send + Sync {
    /// Insert a new session and return the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn insert_session(&self, record: NewSessionRecord) -> Result<SessionId, StorageError>;

    /// Fetch a session by id, `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_session(&self, id: SessionId) -> Result<Option<TrainingSession>, StorageError>;

    /// Overwrite a session's mutable fields (status, score, timestamps, content).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the id does not exist.
    async fn update_session(&self, session: &TrainingSession) -> Result<(), StorageError>;

    /// All sessions belonging to a user, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn sessions_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TrainingSession>, StorageError>;

    /// Remove every session. Used only by the demo reset.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn delete_all_sessions(&self) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Mutex<InMemoryState>>,
}

#[derive(Default)]
struct InMemoryState {
    next_user_id: u64,
    next_session_id: u64,
    users: Vec<User>,
    sessions: Vec<TrainingSession>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, record: NewUserRecord) -> Result<UserId, StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if guard.users.iter().any(|u| u.email() == record.email) {
            return Err(StorageError::Conflict);
        }

        guard.next_user_id += 1;
        let id = UserId::new(guard.next_user_id);
        let user = User::from_persisted(
            id,
            record.email,
            record.organization,
            record.industry,
            record.role,
            record.created_at,
            record.risk_score,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
        guard.users.push(user);
        Ok(id)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn delete_all_users(&self) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.users.clear();
        Ok(())
    }
}

#[async_trait]
impl TrainingSessionRepository for InMemoryRepository {
    async fn insert_session(&self, record: NewSessionRecord) -> Result<SessionId, StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        guard.next_session_id += 1;
        let id = SessionId::new(guard.next_session_id);
        let session = TrainingSession::from_persisted(
            id,
            record.user_id,
            record.module_name,
            record.content,
            record.status,
            record.quiz_score,
            record.started_at,
            record.completed_at,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
        guard.sessions.push(session);
        Ok(id)
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<TrainingSession>, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.sessions.iter().find(|s| s.id() == id).cloned())
    }

    async fn update_session(&self, session: &TrainingSession) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let slot = guard
            .sessions
            .iter_mut()
            .find(|s| s.id() == session.id())
            .ok_or(StorageError::NotFound)?;
        *slot = session.clone();
        Ok(())
    }

    async fn sessions_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TrainingSession>, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .sessions
            .iter()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn delete_all_sessions(&self) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.sessions.clear();
        Ok(())
    }
}

/// Aggregates user and session repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn TrainingSessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let users: Arc<dyn UserRepository> = Arc::new(repo.clone());
        let sessions: Arc<dyn TrainingSessionRepository> = Arc::new(repo);
        Self { users, sessions }
    }
}
