use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use cyber_core::model::{CompletionStatus, ModuleContent, SessionId, UserProfile};
use cyber_core::time::fixed_clock;
use services::content_provider::ContentGenerator;
use services::error::{GenerationError, MetricsError, TrainingError};
use services::fallback::fallback_content;
use services::metrics_service::MetricsService;
use services::seed_service::SeedService;
use services::training_service::TrainingService;
use services::user_service::{NewUser, UserService};
use storage::repository::{InMemoryRepository, TrainingSessionRepository};

/// Generator that always fails, as if the upstream call were unreachable.
struct FailingGenerator {
    calls: AtomicUsize,
}

impl FailingGenerator {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ContentGenerator for FailingGenerator {
    async fn generate(
        &self,
        _topic: &str,
        _profile: &UserProfile,
    ) -> Result<ModuleContent, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::EmptyResponse)
    }
}

/// Generator that returns a canned module.
struct CannedGenerator {
    content: ModuleContent,
}

#[async_trait]
impl ContentGenerator for CannedGenerator {
    async fn generate(
        &self,
        _topic: &str,
        _profile: &UserProfile,
    ) -> Result<ModuleContent, GenerationError> {
        Ok(self.content.clone())
    }
}

struct Harness {
    repo: InMemoryRepository,
    users: UserService,
    training: TrainingService,
    metrics: MetricsService,
    seed: SeedService,
}

fn harness(generator: Arc<dyn ContentGenerator>) -> Harness {
    let repo = InMemoryRepository::new();
    let clock = fixed_clock();
    let users = UserService::new(clock, Arc::new(repo.clone()));
    let training = TrainingService::new(
        clock,
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
        generator,
    );
    let metrics = MetricsService::new(Arc::new(repo.clone()), Arc::new(repo.clone()));
    let seed = SeedService::new(clock, Arc::new(repo.clone()), Arc::new(repo.clone()));
    Harness {
        repo,
        users,
        training,
        metrics,
        seed,
    }
}

fn register_input(email: &str) -> NewUser {
    NewUser {
        email: email.to_owned(),
        organization: None,
        industry: None,
        role: None,
    }
}

#[tokio::test]
async fn failed_generation_serves_exact_fallback_content() {
    let generator = Arc::new(FailingGenerator::new());
    let h = harness(generator.clone());

    let user_id = h.users.register(register_input("a@x.com")).await.unwrap();
    let started = h
        .training
        .start_training(user_id, "Password Security")
        .await
        .unwrap();

    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(started.content, fallback_content("Password Security"));

    // The persisted session carries the same content: never content-less.
    let stored = h
        .repo
        .get_session(started.session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.content(), &fallback_content("Password Security"));
    assert_eq!(stored.status(), CompletionStatus::InProgress);
}

#[tokio::test]
async fn generated_content_is_used_when_available() {
    let canned = ModuleContent {
        title: "Phishing Awareness".to_owned(),
        introduction: "Tailored intro.".to_owned(),
        key_concepts: Vec::new(),
        real_world_examples: Vec::new(),
        best_practices: Vec::new(),
        quiz: Vec::new(),
    };
    let h = harness(Arc::new(CannedGenerator {
        content: canned.clone(),
    }));

    let user_id = h.users.register(register_input("a@x.com")).await.unwrap();
    let started = h
        .training
        .start_training(user_id, "Phishing Awareness")
        .await
        .unwrap();

    assert_eq!(started.content, canned);
}

#[tokio::test]
async fn start_then_complete_reaches_completed_with_score() {
    let h = harness(Arc::new(FailingGenerator::new()));
    let user_id = h.users.register(register_input("a@x.com")).await.unwrap();

    let started = h
        .training
        .start_training(user_id, "Phishing Awareness")
        .await
        .unwrap();
    h.training
        .complete_training(started.session_id, 91.5)
        .await
        .unwrap();

    let session = h
        .repo
        .get_session(started.session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.status(), CompletionStatus::Completed);
    assert_eq!(session.quiz_score(), Some(91.5));
    assert!(session.completed_at().unwrap() >= session.started_at().unwrap());
}

#[tokio::test]
async fn start_for_unknown_user_is_not_found() {
    let h = harness(Arc::new(FailingGenerator::new()));
    let err = h
        .training
        .start_training(cyber_core::model::UserId::new(99), "Phishing Awareness")
        .await
        .unwrap_err();
    assert!(matches!(err, TrainingError::UserNotFound));
}

#[tokio::test]
async fn complete_for_unknown_session_is_not_found_and_mutates_nothing() {
    let h = harness(Arc::new(FailingGenerator::new()));
    let user_id = h.users.register(register_input("a@x.com")).await.unwrap();

    let err = h
        .training
        .complete_training(SessionId::new(404), 50.0)
        .await
        .unwrap_err();
    assert!(matches!(err, TrainingError::SessionNotFound));
    assert!(h.repo.sessions_for_user(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn metrics_for_fresh_user_use_catalog_defaults() {
    let h = harness(Arc::new(FailingGenerator::new()));
    let user_id = h.users.register(register_input("a@x.com")).await.unwrap();

    let metrics = h.metrics.dashboard_metrics(user_id).await.unwrap();
    assert_eq!(metrics.kpis.training_completion.completed, 0);
    assert_eq!(metrics.kpis.training_completion.total, 4);
    assert!((metrics.kpis.training_completion.percentage - 0.0).abs() < f64::EPSILON);
    assert!((metrics.kpis.average_quiz_score - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn metrics_for_unknown_user_is_not_found() {
    let h = harness(Arc::new(FailingGenerator::new()));
    let err = h
        .metrics
        .dashboard_metrics(cyber_core::model::UserId::new(7))
        .await
        .unwrap_err();
    assert!(matches!(err, MetricsError::UserNotFound));
}

#[tokio::test]
async fn seeded_demo_feeds_dashboard_metrics() {
    let h = harness(Arc::new(FailingGenerator::new()));
    let seeded = h.seed.seed_demo().await.unwrap();

    let metrics = h.metrics.dashboard_metrics(seeded.user_id).await.unwrap();
    assert_eq!(metrics.user.email, "alice.smith@syncflowsolutions.com");
    assert_eq!(metrics.kpis.training_completion.completed, 2);
    assert_eq!(metrics.kpis.training_completion.total, 4);
    assert!((metrics.kpis.training_completion.percentage - 50.0).abs() < f64::EPSILON);
    assert!((metrics.kpis.average_quiz_score - 86.5).abs() < f64::EPSILON);
    assert!((metrics.kpis.risk_score - 45.0).abs() < f64::EPSILON);
    assert_eq!(metrics.modules.len(), 4);
}
