use serde::Serialize;

use cyber_core::model::{ModuleContent, SessionId, UserId};
use services::metrics_service::Alert;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: UserId,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModulesResponse {
    pub modules: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Serialize)]
pub struct StartTrainingResponse {
    pub session_id: SessionId,
    pub content: ModuleContent,
}

#[derive(Debug, Serialize)]
pub struct CompleteTrainingResponse {
    pub message: &'static str,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: &'static str,
    pub user_id: UserId,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
