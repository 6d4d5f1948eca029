use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::content_provider::ContentGenerator;
use crate::error::AppServicesError;
use crate::metrics_service::MetricsService;
use crate::seed_service::SeedService;
use crate::training_service::TrainingService;
use crate::user_service::UserService;

/// Assembles the app-facing services over one storage backend and one
/// content generator.
#[derive(Clone)]
pub struct AppServices {
    users: Arc<UserService>,
    training: Arc<TrainingService>,
    metrics: Arc<MetricsService>,
    seed: Arc<SeedService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, generator: Arc<dyn ContentGenerator>) -> Self {
        let users = Arc::new(UserService::new(clock, Arc::clone(&storage.users)));
        let training = Arc::new(TrainingService::new(
            clock,
            Arc::clone(&storage.users),
            Arc::clone(&storage.sessions),
            generator,
        ));
        let metrics = Arc::new(MetricsService::new(
            Arc::clone(&storage.users),
            Arc::clone(&storage.sessions),
        ));
        let seed = Arc::new(SeedService::new(
            clock,
            Arc::clone(&storage.users),
            Arc::clone(&storage.sessions),
        ));

        Self {
            users,
            training,
            metrics,
            seed,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        generator: Arc<dyn ContentGenerator>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, clock, generator))
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }

    #[must_use]
    pub fn training(&self) -> Arc<TrainingService> {
        Arc::clone(&self.training)
    }

    #[must_use]
    pub fn metrics(&self) -> Arc<MetricsService> {
        Arc::clone(&self.metrics)
    }

    #[must_use]
    pub fn seed(&self) -> Arc<SeedService> {
        Arc::clone(&self.seed)
    }
}
