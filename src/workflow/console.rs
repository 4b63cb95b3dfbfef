// src/workflow/console.rs
//! Human-facing progress lines on stdout; logging goes through tracing.

use super::WorkflowResults;

const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Starting,
    Running,
    Completed,
    Failed,
    Waiting,
}

impl StepStatus {
    fn icon(self) -> &'static str {
        match self {
            StepStatus::Starting => "🔄",
            StepStatus::Running => "⚡",
            StepStatus::Completed => "✅",
            StepStatus::Failed => "❌",
            StepStatus::Waiting => "⏳",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Starting => "starting",
            StepStatus::Running => "running",
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
            StepStatus::Waiting => "waiting",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    pub quiet: bool,
    pub verbose: bool,
}

impl Console {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }

    pub fn header(&self, input: &str) {
        if self.quiet {
            return;
        }
        println!("\n{}", "=".repeat(RULE_WIDTH));
        println!("🚀 PROSPECTOR - AI AGENT PIPELINE");
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("📅 Started at: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!("🎯 User Request: {}", input);
        println!("{}\n", "=".repeat(RULE_WIDTH));
    }

    pub fn status(&self, agent: &str, status: StepStatus, message: &str) {
        if self.quiet {
            return;
        }
        println!(
            "{} {}: {}",
            status.icon(),
            agent.to_uppercase(),
            status.as_str().to_uppercase()
        );
        if !message.is_empty() {
            println!("   └─ {}", message);
        }
        println!();
    }

    /// Only shown with `--verbose`
    pub fn detail(&self, line: &str) {
        if self.verbose && !self.quiet {
            println!("   {}", line);
        }
    }

    pub fn completion(&self, results: &WorkflowResults) {
        if self.quiet {
            return;
        }
        let report_len = results
            .final_report
            .as_ref()
            .map(|r| r.chars().count())
            .unwrap_or(0);
        println!("\n{}", "=".repeat(RULE_WIDTH));
        println!("🎉 WORKFLOW COMPLETED SUCCESSFULLY");
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("📊 Results Summary:");
        println!("   • Records scraped: {}", results.scraped_data_count);
        println!("   • Records cleaned: {}", results.cleaned_data_count);
        println!(
            "   • Report generated: {}",
            if results.report_generated { "✅ Yes" } else { "❌ No" }
        );
        println!("   • Report length: {} characters", report_len);
        println!(
            "   • Completion time: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        println!("{}\n", "=".repeat(RULE_WIDTH));
    }
}
