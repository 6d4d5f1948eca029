use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::UserId;
use crate::model::module::UserProfile;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("email cannot be empty")]
    EmptyEmail,
}

/// A registered trainee, keyed by email.
///
/// Everything except `risk_score` is immutable after registration; the risk
/// score is set externally (e.g. by demo seeding) and never computed here.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    email: String,
    organization: String,
    industry: String,
    role: String,
    created_at: DateTime<Utc>,
    risk_score: f64,
}

impl User {
    /// Creates a new user at registration time with a zero risk score.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmptyEmail` if the email is empty or whitespace-only.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        organization: impl Into<String>,
        industry: impl Into<String>,
        role: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, UserError> {
        Self::from_persisted(
            id,
            email,
            organization,
            industry,
            role,
            created_at,
            0.0,
        )
    }

    /// Rehydrates a user from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmptyEmail` if the stored email is empty.
    pub fn from_persisted(
        id: UserId,
        email: impl Into<String>,
        organization: impl Into<String>,
        industry: impl Into<String>,
        role: impl Into<String>,
        created_at: DateTime<Utc>,
        risk_score: f64,
    ) -> Result<Self, UserError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserError::EmptyEmail);
        }

        Ok(Self {
            id,
            email: email.trim().to_owned(),
            organization: organization.into(),
            industry: industry.into(),
            role: role.into(),
            created_at,
            risk_score,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    #[must_use]
    pub fn industry(&self) -> &str {
        &self.industry
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn risk_score(&self) -> f64 {
        self.risk_score
    }

    /// Profile used to personalize generated training content.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile::beginner(self.role.clone(), self.industry.clone())
    }
}
