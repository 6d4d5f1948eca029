use actix_cors::Cors;
use actix_web::web;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;

use cyber_core::model::{SessionId, TRAINING_MODULES, UserId};
use services::AppServices;
use services::metrics_service::MetricsService;
use services::user_service::NewUser;

use crate::error::ApiError;
use crate::request::{CompleteTrainingRequest, RegisterRequest, StartTrainingRequest};
use crate::response::{
    AlertsResponse, CompleteTrainingResponse, ModulesResponse, RegisterResponse, SeedResponse,
    StartTrainingResponse,
};

pub struct Server;

impl Server {
    /// Serves the JSON API until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the listen address cannot be bound.
    pub async fn run(services: AppServices, bind: &str) -> Result<(), std::io::Error> {
        let services = web::Data::new(services);
        log::info!("starting HTTP server on {bind}");
        HttpServer::new(move || {
            App::new()
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(services.clone())
                .configure(configure)
        })
        .bind(bind)?
        .run()
        .await
    }
}

/// Registers every API route; shared between the binary and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/user/register", web::post().to(register_user))
        .route(
            "/api/dashboard/metrics/{user_id}",
            web::get().to(dashboard_metrics),
        )
        .route("/api/dashboard/alerts", web::get().to(dashboard_alerts))
        .route(
            "/api/training/modules",
            web::get().to(list_training_modules),
        )
        .route("/api/training/start", web::post().to(start_training))
        .route("/api/training/complete", web::post().to(complete_training))
        .route("/api/seed-syncflow-demo", web::post().to(seed_syncflow_demo));
}

// Route handlers

async fn register_user(
    services: web::Data<AppServices>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    let user_id = services
        .users()
        .register(NewUser {
            email: req.email,
            organization: req.organization,
            industry: req.industry,
            role: req.role,
        })
        .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        user_id,
        message: "User created",
    }))
}

async fn dashboard_metrics(
    services: web::Data<AppServices>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let metrics = services
        .metrics()
        .dashboard_metrics(UserId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(metrics))
}

async fn dashboard_alerts() -> HttpResponse {
    HttpResponse::Ok().json(AlertsResponse {
        alerts: MetricsService::security_alerts(),
    })
}

async fn list_training_modules() -> HttpResponse {
    HttpResponse::Ok().json(ModulesResponse {
        modules: TRAINING_MODULES.to_vec(),
    })
}

async fn start_training(
    services: web::Data<AppServices>,
    req: web::Json<StartTrainingRequest>,
) -> Result<HttpResponse, ApiError> {
    let started = services
        .training()
        .start_training(UserId::new(req.user_id), &req.module_name)
        .await?;

    Ok(HttpResponse::Created().json(StartTrainingResponse {
        session_id: started.session_id,
        content: started.content,
    }))
}

async fn complete_training(
    services: web::Data<AppServices>,
    req: web::Json<CompleteTrainingRequest>,
) -> Result<HttpResponse, ApiError> {
    services
        .training()
        .complete_training(SessionId::new(req.session_id), req.quiz_score)
        .await?;

    Ok(HttpResponse::Ok().json(CompleteTrainingResponse {
        message: "Training completed",
        score: req.quiz_score,
    }))
}

async fn seed_syncflow_demo(services: web::Data<AppServices>) -> Result<HttpResponse, ApiError> {
    let seeded = services.seed().seed_demo().await?;

    Ok(HttpResponse::Created().json(SeedResponse {
        message: "SyncFlow demo data loaded",
        user_id: seeded.user_id,
        email: seeded.email,
    }))
}
