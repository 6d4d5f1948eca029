use std::sync::Arc;

use cyber_core::Clock;
use cyber_core::model::{User, UserId};
use storage::repository::{NewUserRecord, StorageError, UserRepository};

use crate::error::RegistrationError;

/// Registration input; omitted fields fall back to generic defaults.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub organization: Option<String>,
    pub industry: Option<String>,
    pub role: Option<String>,
}

/// Creates identity records keyed by email.
pub struct UserService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
}

impl UserService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>) -> Self {
        Self { clock, users }
    }

    /// Registers a user and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::User` for an empty email and
    /// `RegistrationError::EmailTaken` when the email is already registered.
    pub async fn register(&self, new_user: NewUser) -> Result<UserId, RegistrationError> {
        let user = User::new(
            UserId::new(0),
            new_user.email,
            new_user.organization.unwrap_or_else(|| "Demo Org".into()),
            new_user.industry.unwrap_or_else(|| "General".into()),
            new_user.role.unwrap_or_else(|| "Employee".into()),
            self.clock.now(),
        )?;

        self.users
            .insert_user(NewUserRecord::from_user(&user))
            .await
            .map_err(|err| match err {
                StorageError::Conflict => RegistrationError::EmailTaken,
                other => RegistrationError::Storage(other),
            })
    }
}
