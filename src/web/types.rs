// src/web/types.rs
use rocket::serde::{Deserialize, Serialize};

use crate::core::ConfigManager;
use crate::workflow::WorkflowResults;

pub struct ServerConfig {
    pub config: ConfigManager,
}

fn default_max_results() -> usize {
    10
}

fn default_verbose() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RunRequest {
    pub input: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct RunResponse {
    pub job_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct JobState {
    pub id: String,
    pub status: JobStatus,
    pub created_at: String,
    pub updated_at: String,
    pub input: String,
    pub max_results: usize,
    pub verbose: bool,
    pub progress: f64,
    pub logs: Vec<String>,
    pub results: Option<WorkflowResults>,
    pub error: Option<String>,
}

impl JobState {
    pub fn queued(id: String, input: &str, max_results: usize, verbose: bool) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id,
            status: JobStatus::Queued,
            created_at: now.clone(),
            updated_at: now,
            input: input.to_string(),
            max_results,
            verbose,
            progress: 0.0,
            logs: vec!["Job queued".to_string(), format!("Input: {}", input)],
            results: None,
            error: None,
        }
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct LogsResponse {
    pub logs: Vec<String>,
    pub status: JobStatus,
    pub progress: f64,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: &str) -> Self {
        Self {
            detail: detail.to_string(),
        }
    }
}
