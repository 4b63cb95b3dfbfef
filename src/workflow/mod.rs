// src/workflow/mod.rs
//! End-to-end run: task execution, table assembly, report generation.
//!
//! Each step is tracked in a [`TaskTracker`] and announced on the console.
//! Artifacts land under the output directory as the run progresses.

pub mod console;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::agents::requirements::{self, ParsedRequest};
use crate::agents::{SearchSettings, TaskExecutor, TaskStatus, TaskTracker, TaskType, TaskUpdate};
use crate::core::config_manager::LlmConfig;
use crate::core::{ConfigManager, OutputStore};
use crate::data::DataTable;
use crate::linkedin::{LinkedInProfiles, ProfileSource};
use crate::llm::{ChatBackend, GroqClient, RateLimiter};
use crate::report::{AnalysisWriter, ReportContext, ReportGenerator, NO_DATA_REPORT};
use crate::types::ScrapedRecord;

pub use console::{Console, StepStatus};

const FINAL_PREVIEW_CHARS: usize = 300;
const STEP_PREVIEW_CHARS: usize = 200;
const SAMPLE_RECORDS: usize = 3;

/// Called with each console message and the tracker's overall progress
pub type ProgressHook = Arc<dyn Fn(&str, f64) + Send + Sync>;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResults {
    pub user_input: String,
    pub scraped_data_count: usize,
    pub cleaned_data_count: usize,
    pub report_generated: bool,
    pub final_report: Option<String>,
    pub final_report_preview: Option<String>,
    pub workflow_status: String,
    pub timestamp: String,
    pub artifacts: Vec<PathBuf>,
}

pub struct Workflow {
    executor: TaskExecutor,
    reports: ReportGenerator,
    store: OutputStore,
    tracker: TaskTracker,
    console: Console,
    hook: Option<ProgressHook>,
    artifacts: Vec<PathBuf>,
}

impl Workflow {
    /// Wire the Groq client and the Chromium profile source from configuration
    pub fn new(config: &ConfigManager, console: Console) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let backend: Arc<dyn ChatBackend> = Arc::new(
            GroqClient::new(api_key, config.llm.base_url.clone(), config.llm.timeout)
                .context("Failed to create LLM client")?,
        );
        let profiles: Arc<dyn ProfileSource> =
            Arc::new(LinkedInProfiles::new(config.browser.clone()));
        let store = OutputStore::new(&config.environment.output_path);
        Ok(Self::with_backends(backend, profiles, store, &config.llm, console))
    }

    pub fn with_backends(
        backend: Arc<dyn ChatBackend>,
        profiles: Arc<dyn ProfileSource>,
        store: OutputStore,
        llm: &LlmConfig,
        console: Console,
    ) -> Self {
        let limiter = Arc::new(RateLimiter::new(llm.rate_limit_delay));
        let executor = TaskExecutor::new(
            backend.clone(),
            limiter.clone(),
            store.clone(),
            SearchSettings::from(llm),
            profiles,
        );
        let reports =
            ReportGenerator::new(AnalysisWriter::new(backend, limiter, &llm.analysis_model));
        Self {
            executor,
            reports,
            store,
            tracker: TaskTracker::new(),
            console,
            hook: None,
            artifacts: Vec::new(),
        }
    }

    pub fn with_progress_hook(mut self, hook: ProgressHook) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn tracker(&self) -> &TaskTracker {
        &self.tracker
    }

    /// `max_results` overrides any count named in the request itself
    pub async fn execute(
        &mut self,
        input: &str,
        max_results: Option<usize>,
    ) -> Result<WorkflowResults> {
        self.tracker.reset();
        self.artifacts.clear();

        let request = requirements::analyze(input);
        log_request(&request);
        let max_results = max_results.unwrap_or(request.max_results).max(1);

        self.console.header(input);

        match self.run_steps(input, max_results, &request).await {
            Ok(results) => {
                self.console.completion(&results);
                self.save_task_log(input).await;
                Ok(results)
            }
            Err(e) => {
                error!("Workflow execution failed: {:#}", e);
                self.announce("WORKFLOW", StepStatus::Failed, &format!("Error: {:#}", e));
                self.save_task_log(input).await;
                Err(e)
            }
        }
    }

    async fn run_steps(
        &mut self,
        input: &str,
        max_results: usize,
        request: &ParsedRequest,
    ) -> Result<WorkflowResults> {
        let records = self.step_task_execution(input, max_results).await?;
        let table = self.step_prepare_table(input, &records).await;
        let report = self.step_report_generation(input, &table, request).await;

        let preview = preview(&report, FINAL_PREVIEW_CHARS);
        Ok(WorkflowResults {
            user_input: input.to_string(),
            scraped_data_count: records.len(),
            cleaned_data_count: table.len(),
            report_generated: true,
            final_report: Some(report),
            final_report_preview: Some(preview),
            workflow_status: "completed".to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
            artifacts: self.artifacts.clone(),
        })
    }

    async fn step_task_execution(
        &mut self,
        input: &str,
        max_results: usize,
    ) -> Result<Vec<ScrapedRecord>> {
        let task_id = self.tracker.create("task_execution", TaskType::LinkedinScraping);
        self.announce("TASK EXECUTOR", StepStatus::Starting, "Initializing task execution...");
        self.tracker
            .update(&task_id, TaskStatus::InProgress, TaskUpdate::progress(0.0));

        if let Err(e) = self.store.ensure_tree().await {
            self.tracker.log_error(&task_id, &e, "Task execution");
            self.announce("TASK EXECUTOR", StepStatus::Failed, &format!("Error: {:#}", e));
            return Err(e);
        }

        self.console.detail("🔍 Analyzing task type...");
        self.console.detail("📝 Generating search queries...");
        self.console.detail("🌐 Executing web searches...");

        let records = self.executor.execute(input, max_results).await;
        self.console.detail(&format!(
            "🔗 {} unique search results",
            self.executor.search_results().len()
        ));
        if !records.is_empty() {
            let saved = self.store.save_raw(&records, "linkedin", input).await;
            self.artifacts.extend(saved);
        }

        self.tracker.update(
            &task_id,
            TaskStatus::Completed,
            TaskUpdate::progress(100.0).with_detail("scraped_records", records.len()),
        );
        self.announce(
            "TASK EXECUTOR",
            StepStatus::Completed,
            &format!("Successfully processed {} records", records.len()),
        );

        if !records.is_empty() {
            self.console.detail("📊 Sample records found:");
            for (i, record) in records.iter().take(SAMPLE_RECORDS).enumerate() {
                self.console.detail(&format!(
                    "   {}. {} - {} ({})",
                    i + 1,
                    record.name,
                    record.headline,
                    record.location
                ));
            }
            if records.len() > SAMPLE_RECORDS {
                self.console.detail(&format!(
                    "   ... and {} more records",
                    records.len() - SAMPLE_RECORDS
                ));
            }
        }
        Ok(records)
    }

    async fn step_prepare_table(&mut self, input: &str, records: &[ScrapedRecord]) -> DataTable {
        let task_id = self.tracker.create("prepare_dataframe", TaskType::DataCleaning);
        self.announce("DATAFRAME", StepStatus::Starting, "Converting scraped data to a table...");
        self.tracker
            .update(&task_id, TaskStatus::InProgress, TaskUpdate::progress(0.0));
        self.console.detail("🧾 Building record table...");

        let table = DataTable::from_records(records).with_answer_fallback(self.executor.context());
        if !table.is_empty() {
            let saved = self.store.save_cleaned(&table, input).await;
            self.artifacts.extend(saved);
        }

        self.tracker.update(
            &task_id,
            TaskStatus::Completed,
            TaskUpdate::progress(100.0).with_detail("cleaned_records", table.len()),
        );
        self.announce(
            "DATAFRAME",
            StepStatus::Completed,
            &format!("Prepared {} records for reporting", table.len()),
        );

        self.console.detail("📊 Table preview:");
        self.console.detail(&format!("   - Records: {}", table.len()));
        self.console
            .detail(&format!("   - Columns: {:?}", table.columns()));
        table
    }

    async fn step_report_generation(
        &mut self,
        input: &str,
        table: &DataTable,
        request: &ParsedRequest,
    ) -> String {
        let task_id = self.tracker.create("report_generation", TaskType::ReportGeneration);
        self.announce(
            "REPORT GENERATOR",
            StepStatus::Starting,
            "Initializing report generation...",
        );
        self.tracker
            .update(&task_id, TaskStatus::InProgress, TaskUpdate::progress(0.0));

        self.console.detail("🤖 Generating AI analysis...");
        self.console.detail("📊 Creating summary statistics...");

        let report = if table.is_empty() {
            warn!("No data available for report generation");
            NO_DATA_REPORT.to_string()
        } else {
            let context = ReportContext::new(input, self.executor.context());
            let report = self
                .reports
                .generate(table, &request.report_format, &context)
                .await;
            let saved = self.store.save_report(&report.markdown, input).await;
            self.artifacts.extend(saved);
            report.markdown
        };

        let length = report.chars().count();
        self.tracker.update(
            &task_id,
            TaskStatus::Completed,
            TaskUpdate::progress(100.0).with_detail("report_length", length),
        );
        self.announce(
            "REPORT GENERATOR",
            StepStatus::Completed,
            &format!("Successfully generated report ({} characters)", length),
        );

        self.console.detail("📄 Report preview:");
        self.console
            .detail(&format!("   {}", preview(&report, STEP_PREVIEW_CHARS)));
        report
    }

    fn announce(&self, agent: &str, status: StepStatus, message: &str) {
        self.console.status(agent, status, message);
        if let Some(hook) = &self.hook {
            let line = if message.is_empty() {
                format!("{}: {}", agent, status.as_str())
            } else {
                format!("{}: {} - {}", agent, status.as_str(), message)
            };
            hook(&line, self.tracker.overall_progress());
        }
    }

    async fn save_task_log(&mut self, input: &str) {
        let summary = self.tracker.summary();
        info!(
            "Tasks: {} total, {} completed, {} failed ({:.1}%)",
            summary.total_tasks,
            summary.completed_tasks,
            summary.failed_tasks,
            summary.overall_progress
        );
        let saved = self.store.save_task_log(&self.tracker.export_logs(), input).await;
        self.artifacts.extend(saved);
    }
}

fn log_request(request: &ParsedRequest) {
    let terms: Vec<&str> = request.search_terms.iter().map(|t| t.value.as_str()).collect();
    let sites: Vec<&str> = request.target_websites.iter().map(|s| s.name.as_str()).collect();
    let count_source = if request.max_results_explicit { "requested" } else { "default" };
    info!(
        "Parsed request: terms={:?} sites={:?} max_results={} ({}) contact_info={}",
        terms, sites, request.max_results, count_source, request.include_contact_info
    );
}

/// First `max` chars, with `...` when anything was cut
pub fn preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_long_text_only() {
        assert_eq!(preview("short", 300), "short");
        let long = "y".repeat(301);
        let cut = preview(&long, 300);
        assert_eq!(cut.len(), 303);
        assert!(cut.ends_with("..."));
    }
}
