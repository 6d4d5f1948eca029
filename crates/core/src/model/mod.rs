mod ids;
mod module;
mod session;
mod user;

pub use ids::{SessionId, UserId};
pub use module::{
    DEFAULT_MODULE_COUNT, KeyConcept, ModuleContent, QuizQuestion, TRAINING_MODULES, UserProfile,
};
pub use session::{CompletionStatus, TrainingSession, TrainingSessionError};
pub use user::{User, UserError};
