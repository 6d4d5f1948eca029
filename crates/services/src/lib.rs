#![forbid(unsafe_code)]

pub mod app_services;
pub mod content_provider;
pub mod error;
pub mod fallback;
pub mod metrics_service;
pub mod seed_service;
pub mod training_service;
pub mod user_service;

pub use cyber_core::Clock;

pub use app_services::AppServices;
pub use content_provider::{ContentGenerator, GeminiConfig, GeminiContentProvider};
pub use error::{
    AppServicesError, GenerationError, MetricsError, RegistrationError, SeedError, TrainingError,
};
pub use fallback::fallback_content;
pub use metrics_service::{Alert, DashboardMetrics, MetricsService};
pub use seed_service::{SeedService, SeededDemo};
pub use training_service::{StartedTraining, TrainingService};
pub use user_service::{NewUser, UserService};
