// src/report/generator.rs
use serde::Serialize;
use tracing::{debug, info};

use super::analysis::AnalysisWriter;
use super::stats::SummaryStats;
use super::template_engine::ReportView;
use super::ReportContext;
use crate::agents::requirements::ReportFormat;
use crate::agents::AiAnalysis;
use crate::data::DataTable;

pub const NO_DATA_REPORT: &str = "# No Data Report\n\nNo data was available for analysis.";

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub markdown: String,
    pub analysis: AiAnalysis,
    pub stats: SummaryStats,
}

pub struct ReportGenerator {
    writer: AnalysisWriter,
}

impl ReportGenerator {
    pub fn new(writer: AnalysisWriter) -> Self {
        Self { writer }
    }

    /// Analysis, statistics and the rendered markdown for one table
    pub async fn generate(
        &self,
        table: &DataTable,
        format: &ReportFormat,
        context: &ReportContext,
    ) -> Report {
        info!("Starting report generation");
        if format.include_charts {
            debug!("Charts requested but reports are text-only");
        }

        let analysis = self.writer.analyze(table, context).await;
        let stats = SummaryStats::from_table(table);
        debug!("Summary statistics: {:?}", stats);

        let markdown = ReportView {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            context,
            analysis: &analysis,
            table,
        }
        .render();

        info!("Report generation completed");
        Report {
            markdown,
            analysis,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatBackend, ChatRequest, RateLimiter};
    use crate::types::{RecordSource, ScrapedRecord};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct Bullets;

    #[async_trait]
    impl ChatBackend for Bullets {
        async fn complete(&self, _request: ChatRequest) -> Result<String> {
            Ok("Key insights:\n- Most profiles are senior\nTrends:\n- Remote work".to_string())
        }
    }

    #[tokio::test]
    async fn report_combines_analysis_stats_and_template() {
        let generator = ReportGenerator::new(AnalysisWriter::new(
            Arc::new(Bullets),
            Arc::new(RateLimiter::new(Duration::ZERO)),
            "analysis-model",
        ));
        let table = DataTable::from_records(&[ScrapedRecord {
            headline: "Senior Engineer".to_string(),
            source: RecordSource::LinkedIn,
            ..ScrapedRecord::web_source("https://www.linkedin.com/in/jane", "Jane", "")
        }]);
        let context = ReportContext {
            user_input: "senior engineers".to_string(),
            ..ReportContext::default()
        };

        let report = generator
            .generate(&table, &ReportFormat::default(), &context)
            .await;

        assert_eq!(report.analysis.key_insights, vec!["Most profiles are senior"]);
        assert_eq!(report.analysis.trends, vec!["Remote work"]);
        assert_eq!(report.stats.experience_levels.senior, 1);
        assert!(report.markdown.contains("- Most profiles are senior"));
        assert!(report.markdown.contains("| Jane | Senior Engineer | N/A | LinkedIn |"));
    }
}
