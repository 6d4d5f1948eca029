use std::sync::Arc;

use cyber_core::Clock;
use cyber_core::model::{
    CompletionStatus, ModuleContent, SessionId, TrainingSession, User, UserId,
};
use storage::repository::{
    NewSessionRecord, NewUserRecord, TrainingSessionRepository, UserRepository,
};

use crate::error::SeedError;

/// Demo rows inserted by [`SeedService::seed_demo`].
const DEMO_SESSIONS: [(&str, CompletionStatus, Option<f64>); 4] = [
    ("Phishing Awareness", CompletionStatus::Completed, Some(88.0)),
    ("Password Security", CompletionStatus::Completed, Some(85.0)),
    ("Ransomware Prevention", CompletionStatus::InProgress, None),
    ("Data Protection Basics", CompletionStatus::NotStarted, None),
];

/// Identity of the freshly seeded demo user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededDemo {
    pub user_id: UserId,
    pub email: String,
}

/// Resets the whole store to the SyncFlow demo fixture.
pub struct SeedService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn TrainingSessionRepository>,
}

impl SeedService {
    #[must_use]
    pub fn new(
        clock: Clock,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn TrainingSessionRepository>,
    ) -> Self {
        Self {
            clock,
            users,
            sessions,
        }
    }

    /// Wipes all users and sessions, then inserts one demo user with four
    /// demo sessions. Running it again fully replaces the previous fixture.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if any wipe or insert fails.
    pub async fn seed_demo(&self) -> Result<SeededDemo, SeedError> {
        // Sessions first: they hold the foreign key onto users.
        self.sessions.delete_all_sessions().await?;
        self.users.delete_all_users().await?;

        let now = self.clock.now();
        let user = User::from_persisted(
            UserId::new(0),
            "alice.smith@syncflowsolutions.com",
            "SyncFlow Solutions",
            "Professional Services",
            "IT Manager",
            now,
            45.0,
        )?;
        let user_id = self
            .users
            .insert_user(NewUserRecord::from_user(&user))
            .await?;

        for (module_name, status, quiz_score) in DEMO_SESSIONS {
            let started_at = (status != CompletionStatus::NotStarted).then_some(now);
            let completed_at = (status == CompletionStatus::Completed).then_some(now);
            let session = TrainingSession::from_persisted(
                SessionId::new(0),
                user_id,
                module_name,
                demo_placeholder(module_name),
                status,
                quiz_score,
                started_at,
                completed_at,
            )?;
            self.sessions
                .insert_session(NewSessionRecord::from_session(&session))
                .await?;
        }

        Ok(SeededDemo {
            user_id,
            email: user.email().to_owned(),
        })
    }
}

fn demo_placeholder(module_name: &str) -> ModuleContent {
    ModuleContent {
        title: module_name.to_owned(),
        introduction: format!("Training module on {module_name}"),
        key_concepts: Vec::new(),
        real_world_examples: Vec::new(),
        best_practices: Vec::new(),
        quiz: Vec::new(),
    }
}
