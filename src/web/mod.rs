// src/web/mod.rs
//! HTTP front end: queue workflow runs and poll their progress.

pub mod handlers;
pub mod jobs;
pub mod types;

pub use handlers::*;
pub use jobs::JobStore;
pub use types::*;

use crate::core::ConfigManager;
use crate::workflow::WorkflowResults;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::{error, info};

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[post("/run", data = "<request>")]
pub async fn run(
    request: Json<RunRequest>,
    jobs: &State<JobStore>,
    config: &State<ServerConfig>,
) -> Result<Json<RunResponse>, ApiError> {
    handlers::run_handler(request, jobs, config).await
}

#[get("/status/<job_id>")]
pub async fn status(job_id: &str, jobs: &State<JobStore>) -> Result<Json<JobState>, ApiError> {
    handlers::status_handler(job_id, jobs).await
}

#[get("/logs/<job_id>")]
pub async fn logs(job_id: &str, jobs: &State<JobStore>) -> Result<Json<LogsResponse>, ApiError> {
    handlers::logs_handler(job_id, jobs).await
}

#[get("/report/<job_id>")]
pub async fn report(job_id: &str, jobs: &State<JobStore>) -> ReportResponse {
    handlers::report_handler(job_id, jobs).await
}

#[get("/results/<job_id>")]
pub async fn results(
    job_id: &str,
    jobs: &State<JobStore>,
) -> Result<Json<WorkflowResults>, ApiError> {
    handlers::results_handler(job_id, jobs).await
}

#[get("/health")]
pub async fn health() -> Json<HealthResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid request format"))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Request body is missing required fields"))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error"))
}

/// Assemble the API without launching it
pub fn build_rocket(config: ConfigManager, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(ServerConfig { config })
        .manage(JobStore::new())
        .register("/api", catchers![bad_request, unprocessable, internal_error])
        .mount(
            "/api",
            routes![run, status, logs, report, results, health, options],
        )
}

pub async fn start_web_server(config: ConfigManager, port: u16) -> Result<()> {
    info!("Starting API server on http://0.0.0.0:{}", port);
    info!("Output directory: {}", config.environment.output_path.display());

    if let Err(e) = build_rocket(config, port).launch().await {
        error!("Rocket failed to launch: {}", e);
        return Err(anyhow::anyhow!("Rocket failed to launch: {}", e));
    }
    Ok(())
}
