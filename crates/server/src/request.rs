use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub organization: Option<String>,
    pub industry: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartTrainingRequest {
    pub user_id: u64,
    pub module_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CompleteTrainingRequest {
    pub session_id: u64,
    pub quiz_score: f64,
}
