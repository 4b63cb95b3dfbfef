// src/web/jobs.rs
//! In-memory job registry and the background runner behind `/api/run`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{error, info};

use super::types::{JobState, JobStatus};
use crate::core::ConfigManager;
use crate::workflow::{Console, ProgressHook, Workflow};

#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<String, JobState>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a queued job and return its id (12 hex chars)
    pub fn create(&self, input: &str, max_results: usize, verbose: bool) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string()[..12].to_string();
        let job = JobState::queued(id.clone(), input, max_results, verbose);
        self.write().insert(id.clone(), job);
        id
    }

    pub fn get(&self, id: &str) -> Option<JobState> {
        self.read().get(id).cloned()
    }

    /// Apply `f` to the job if it still exists
    pub fn update<F: FnOnce(&mut JobState)>(&self, id: &str, f: F) {
        if let Some(job) = self.write().get_mut(id) {
            f(job);
            job.touch();
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, JobState>> {
        self.jobs.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, JobState>> {
        self.jobs.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Drive one workflow to completion, mirroring progress into the job record
pub async fn run_job(jobs: JobStore, config: ConfigManager, job_id: String) {
    let Some(job) = jobs.get(&job_id) else {
        return;
    };
    jobs.update(&job_id, |job| {
        job.log("Job created");
        job.status = JobStatus::Running;
    });

    let hook_jobs = jobs.clone();
    let hook_id = job_id.clone();
    let hook: ProgressHook = Arc::new(move |line: &str, progress: f64| {
        hook_jobs.update(&hook_id, |job| {
            job.logs.push(line.to_string());
            job.progress = progress;
        });
    });

    let outcome = match Workflow::new(&config, Console::new(true, job.verbose)) {
        Ok(workflow) => {
            jobs.update(&job_id, |job| job.log("Workflow initialized"));
            let mut workflow = workflow.with_progress_hook(hook);
            workflow.execute(&job.input, Some(job.max_results)).await
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(results) => {
            info!("Job {} completed", job_id);
            jobs.update(&job_id, |job| {
                job.results = Some(results);
                job.status = JobStatus::Completed;
                job.progress = 100.0;
                job.log("Workflow completed");
            });
        }
        Err(e) => {
            error!("Job {} failed: {:#}", job_id, e);
            jobs.update(&job_id, |job| {
                job.status = JobStatus::Failed;
                job.error = Some(format!("{:#}", e));
                job.log(format!("Error: {:#}", e));
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_jobs_are_queued_with_short_ids() {
        let store = JobStore::new();
        let id = store.create("rust jobs", 5, true);

        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

        let job = store.get(&id).unwrap();
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.logs, vec!["Job queued", "Input: rust jobs"]);
    }

    #[test]
    fn updates_touch_only_existing_jobs() {
        let store = JobStore::new();
        let id = store.create("q", 1, false);
        store.update(&id, |job| job.progress = 42.0);
        store.update("missing", |job| job.progress = 1.0);

        assert_eq!(store.get(&id).unwrap().progress, 42.0);
        assert!(store.get("missing").is_none());
    }

    #[tokio::test]
    async fn missing_api_key_fails_the_job() {
        let store = JobStore::new();
        let id = store.create("average rust salary", 3, false);
        let config = ConfigManager::from_lookup(|_| None).unwrap();

        run_job(store.clone(), config, id.clone()).await;

        let job = store.get(&id).unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.unwrap().contains("GROQ_API_KEY"));
        assert!(job.logs.iter().any(|l| l.starts_with("Error:")));
    }
}
