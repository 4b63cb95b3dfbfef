// src/web/handlers/job_handlers.rs
use crate::web::jobs::{run_job, JobStore};
use crate::web::types::*;
use crate::workflow::WorkflowResults;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Responder, State};
use tracing::info;

pub type ApiError = (Status, Json<ErrorResponse>);

fn job_not_found() -> ApiError {
    (Status::NotFound, Json(ErrorResponse::new("job not found")))
}

#[derive(Responder)]
pub enum ReportResponse {
    #[response(status = 200, content_type = "text/plain")]
    Report(String),
    #[response(status = 404, content_type = "text/plain")]
    Unavailable(&'static str),
    #[response(status = 404)]
    UnknownJob(Json<ErrorResponse>),
}

pub async fn run_handler(
    request: Json<RunRequest>,
    jobs: &State<JobStore>,
    config: &State<ServerConfig>,
) -> Result<Json<RunResponse>, ApiError> {
    let input = request.input.trim();
    if input.is_empty() {
        return Err((
            Status::BadRequest,
            Json(ErrorResponse::new("input is required")),
        ));
    }

    let max_results = request.max_results.max(1);
    let job_id = jobs.create(input, max_results, request.verbose);
    info!("Queued job {} for: {}", job_id, input);

    tokio::spawn(run_job(
        jobs.inner().clone(),
        config.config.clone(),
        job_id.clone(),
    ));

    Ok(Json(RunResponse { job_id }))
}

pub async fn status_handler(
    job_id: &str,
    jobs: &State<JobStore>,
) -> Result<Json<JobState>, ApiError> {
    jobs.get(job_id).map(Json).ok_or_else(job_not_found)
}

pub async fn logs_handler(
    job_id: &str,
    jobs: &State<JobStore>,
) -> Result<Json<LogsResponse>, ApiError> {
    let job = jobs.get(job_id).ok_or_else(job_not_found)?;
    Ok(Json(LogsResponse {
        logs: job.logs,
        status: job.status,
        progress: job.progress,
    }))
}

pub async fn report_handler(job_id: &str, jobs: &State<JobStore>) -> ReportResponse {
    let Some(job) = jobs.get(job_id) else {
        return ReportResponse::UnknownJob(Json(ErrorResponse::new("job not found")));
    };
    match job.results.and_then(|r| r.final_report) {
        Some(report) => ReportResponse::Report(report),
        None => ReportResponse::Unavailable("Report not available"),
    }
}

pub async fn results_handler(
    job_id: &str,
    jobs: &State<JobStore>,
) -> Result<Json<WorkflowResults>, ApiError> {
    let job = jobs.get(job_id).ok_or_else(job_not_found)?;
    job.results.map(Json).ok_or_else(|| {
        (
            Status::NotFound,
            Json(ErrorResponse::new("Results not available")),
        )
    })
}
