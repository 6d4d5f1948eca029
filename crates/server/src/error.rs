use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use services::error::{MetricsError, RegistrationError, SeedError, TrainingError};

use crate::response::ErrorResponse;

/// Wraps service errors for HTTP rendering.
///
/// The only intentionally user-visible failure is a missing user or session
/// (404); everything else is a client-input problem (400/409) or an opaque
/// server error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Training(#[from] TrainingError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error(transparent)]
    Seed(#[from] SeedError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Registration(RegistrationError::EmailTaken) => StatusCode::CONFLICT,
            ApiError::Registration(RegistrationError::User(_)) => StatusCode::BAD_REQUEST,
            ApiError::Training(TrainingError::UserNotFound | TrainingError::SessionNotFound)
            | ApiError::Metrics(MetricsError::UserNotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::Training(TrainingError::SessionNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::Metrics(MetricsError::UserNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_email_maps_to_409() {
        let err = ApiError::Registration(RegistrationError::EmailTaken);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
