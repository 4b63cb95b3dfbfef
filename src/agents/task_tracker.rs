// src/agents/task_tracker.rs
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::Failed | TaskStatus::Cancelled
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    WebSearch,
    LinkedinScraping,
    OtherScraping,
    DataCleaning,
    ReportGeneration,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::WebSearch => "web_search",
            TaskType::LinkedinScraping => "linkedin_scraping",
            TaskType::OtherScraping => "other_scraping",
            TaskType::DataCleaning => "data_cleaning",
            TaskType::ReportGeneration => "report_generation",
        }
    }

    /// Share of overall progress; search and scraping run as one step
    fn weight(&self) -> f64 {
        match self {
            TaskType::LinkedinScraping => 0.6,
            TaskType::OtherScraping => 0.2,
            TaskType::DataCleaning => 0.1,
            TaskType::ReportGeneration => 0.1,
            TaskType::WebSearch => 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskProgress {
    pub task_id: String,
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub progress_percentage: f64,
    pub start_time: DateTime<Local>,
    pub end_time: Option<DateTime<Local>>,
    pub error_message: Option<String>,
    pub details: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub progress: Option<f64>,
    pub error_message: Option<String>,
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TaskUpdate {
    pub fn progress(progress: f64) -> Self {
        Self {
            progress: Some(progress),
            ..Self::default()
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub failed_tasks: usize,
    pub in_progress_tasks: usize,
    pub overall_progress: f64,
    pub workflow_duration_seconds: f64,
    pub start_time: String,
    pub current_time: String,
}

/// Per-step status bookkeeping for one workflow run
#[derive(Debug, Clone)]
pub struct TaskTracker {
    tasks: Vec<TaskProgress>,
    workflow_start: DateTime<Local>,
    overall_progress: f64,
}

impl Default for TaskTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskTracker {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            workflow_start: Local::now(),
            overall_progress: 0.0,
        }
    }

    pub fn create(&mut self, task_id: &str, task_type: TaskType) -> String {
        self.tasks.retain(|t| t.task_id != task_id);
        self.tasks.push(TaskProgress {
            task_id: task_id.to_string(),
            task_type,
            status: TaskStatus::Pending,
            progress_percentage: 0.0,
            start_time: Local::now(),
            end_time: None,
            error_message: None,
            details: serde_json::Map::new(),
        });
        info!("Created task: {} ({})", task_id, task_type.as_str());
        self.recompute();
        task_id.to_string()
    }

    pub fn update(&mut self, task_id: &str, status: TaskStatus, update: TaskUpdate) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.task_id == task_id) else {
            warn!("Task {} not found", task_id);
            return;
        };

        task.status = status;
        if let Some(progress) = update.progress {
            task.progress_percentage = progress.clamp(0.0, 100.0);
        }
        if let Some(message) = update.error_message.filter(|m| !m.is_empty()) {
            error!("Task {} failed: {}", task_id, message);
            task.error_message = Some(message);
        }
        if let Some(details) = update.details {
            task.details.extend(details);
        }
        if status.is_terminal() {
            task.end_time = Some(Local::now());
        }

        info!(
            "Task {} status updated: {} ({:.1}%)",
            task_id,
            status.as_str(),
            task.progress_percentage
        );
        self.recompute();
    }

    /// Mark the task failed with the error text
    pub fn log_error(&mut self, task_id: &str, err: &anyhow::Error, context: &str) {
        if context.is_empty() {
            error!("Task {} error: {:#}", task_id, err);
        } else {
            error!("Task {} error: {:#} (Context: {})", task_id, err, context);
        }
        self.update(
            task_id,
            TaskStatus::Failed,
            TaskUpdate {
                error_message: Some(format!("{:#}", err)),
                ..TaskUpdate::default()
            },
        );
    }

    pub fn get(&self, task_id: &str) -> Option<&TaskProgress> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    pub fn all(&self) -> &[TaskProgress] {
        &self.tasks
    }

    pub fn failed(&self) -> Vec<&TaskProgress> {
        self.count_iter(TaskStatus::Failed).collect()
    }

    pub fn overall_progress(&self) -> f64 {
        self.overall_progress
    }

    pub fn summary(&self) -> WorkflowSummary {
        let now = Local::now();
        WorkflowSummary {
            total_tasks: self.tasks.len(),
            completed_tasks: self.count_iter(TaskStatus::Completed).count(),
            failed_tasks: self.count_iter(TaskStatus::Failed).count(),
            in_progress_tasks: self.count_iter(TaskStatus::InProgress).count(),
            overall_progress: self.overall_progress,
            workflow_duration_seconds: (now - self.workflow_start).num_milliseconds() as f64
                / 1000.0,
            start_time: self.workflow_start.to_rfc3339(),
            current_time: now.to_rfc3339(),
        }
    }

    pub fn reset(&mut self) {
        self.tasks.clear();
        self.workflow_start = Local::now();
        self.overall_progress = 0.0;
        info!("Workflow reset");
    }

    pub fn export_logs(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== TASK EXECUTION LOG ===");
        let _ = writeln!(
            out,
            "Workflow Start: {}",
            self.workflow_start.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(out, "Overall Progress: {:.1}%", self.overall_progress);
        let _ = writeln!(out);

        for task in &self.tasks {
            let _ = writeln!(out, "Task: {}", task.task_id);
            let _ = writeln!(out, "  Type: {}", task.task_type.as_str());
            let _ = writeln!(out, "  Status: {}", task.status.as_str());
            let _ = writeln!(out, "  Progress: {:.1}%", task.progress_percentage);
            let _ = writeln!(out, "  Start: {}", task.start_time.format("%Y-%m-%d %H:%M:%S"));
            if let Some(end) = task.end_time {
                let _ = writeln!(out, "  End: {}", end.format("%Y-%m-%d %H:%M:%S"));
                let secs = (end - task.start_time).num_milliseconds() as f64 / 1000.0;
                let _ = writeln!(out, "  Duration: {:.1}s", secs);
            }
            if let Some(message) = &task.error_message {
                let _ = writeln!(out, "  Error: {}", message);
            }
            if !task.details.is_empty() {
                let _ = writeln!(
                    out,
                    "  Details: {}",
                    serde_json::Value::Object(task.details.clone())
                );
            }
            let _ = writeln!(out);
        }

        out.trim_end_matches('\n').to_string()
    }

    fn count_iter(&self, status: TaskStatus) -> impl Iterator<Item = &TaskProgress> {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    fn recompute(&mut self) {
        let mut total_weight = 0.0;
        let mut weighted = 0.0;

        for task in &self.tasks {
            let weight = task.task_type.weight();
            total_weight += weight;
            weighted += weight
                * match task.status {
                    TaskStatus::Completed => 100.0,
                    TaskStatus::InProgress => task.progress_percentage,
                    TaskStatus::Failed => task.progress_percentage.min(50.0),
                    TaskStatus::Pending | TaskStatus::Cancelled => 0.0,
                };
        }

        self.overall_progress = if total_weight > 0.0 {
            weighted / total_weight
        } else {
            0.0
        };
    }
}
