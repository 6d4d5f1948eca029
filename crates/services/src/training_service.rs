use std::sync::Arc;

use cyber_core::Clock;
use cyber_core::model::{ModuleContent, SessionId, TrainingSession, UserId};
use storage::repository::{NewSessionRecord, TrainingSessionRepository, UserRepository};

use crate::content_provider::ContentGenerator;
use crate::error::TrainingError;
use crate::fallback::fallback_content;

/// Result of starting a training session: the stored id plus the content the
/// client should render.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedTraining {
    pub session_id: SessionId,
    pub content: ModuleContent,
}

/// Owns the training-session lifecycle: start with generated-or-fallback
/// content, complete with a quiz score.
pub struct TrainingService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn TrainingSessionRepository>,
    generator: Arc<dyn ContentGenerator>,
}

impl TrainingService {
    #[must_use]
    pub fn new(
        clock: Clock,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn TrainingSessionRepository>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        Self {
            clock,
            users,
            sessions,
            generator,
        }
    }

    /// Starts a session for the user on the given module.
    ///
    /// Generation failures are absorbed here: the session is always persisted
    /// with usable content, either generated or from the fallback catalog.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::UserNotFound` if the user id does not resolve,
    /// or a storage error if persisting fails.
    pub async fn start_training(
        &self,
        user_id: UserId,
        module_name: &str,
    ) -> Result<StartedTraining, TrainingError> {
        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or(TrainingError::UserNotFound)?;

        log::info!("starting training: {module_name} for {}", user.email());

        let profile = user.profile();
        let content = match self.generator.generate(module_name, &profile).await {
            Ok(content) => content,
            Err(err) => {
                log::warn!("generation failed for {module_name}: {err}; using fallback content");
                fallback_content(module_name)
            }
        };

        let session = TrainingSession::begin(
            SessionId::new(0),
            user_id,
            module_name,
            content,
            self.clock.now(),
        );
        let session_id = self
            .sessions
            .insert_session(NewSessionRecord::from_session(&session))
            .await?;

        log::info!("training session created: {session_id}");

        Ok(StartedTraining {
            session_id,
            content: session.content().clone(),
        })
    }

    /// Marks a session completed with the given quiz score.
    ///
    /// Any numeric score is accepted; completing an already-completed session
    /// overwrites its score and completion timestamp.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::SessionNotFound` if the session id does not
    /// resolve, or a storage error if persisting fails.
    pub async fn complete_training(
        &self,
        session_id: SessionId,
        quiz_score: f64,
    ) -> Result<(), TrainingError> {
        let mut session = self
            .sessions
            .get_session(session_id)
            .await?
            .ok_or(TrainingError::SessionNotFound)?;

        session.complete(quiz_score, self.clock.now());
        self.sessions.update_session(&session).await?;
        Ok(())
    }
}
