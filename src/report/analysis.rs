// src/report/analysis.rs
use std::sync::Arc;
use tracing::{error, info};

use super::stats::DataSummary;
use super::ReportContext;
use crate::agents::response_parser::{self, AiAnalysis};
use crate::data::DataTable;
use crate::llm::{ChatBackend, ChatMessage, ChatRequest, RateLimiter};

const ANALYSIS_MAX_TOKENS: u32 = 900;
const ANALYSIS_TEMPERATURE: f32 = 0.3;
const SAMPLE_RECORDS: usize = 3;

const ANALYST_SYSTEM_PROMPT: &str = "You are an expert analyst. Write a clear, human-readable, \
well-structured text-only report. No images. No tables. Base insights strictly on provided data; \
avoid speculation. Be concise, factual, and organized.";

pub const NO_DATA_INSIGHT: &str = "No data available for analysis";
pub const FAILED_INSIGHT: &str = "Unable to generate AI analysis due to technical issues";

/// Asks the analysis model for insights on the assembled table
pub struct AnalysisWriter {
    backend: Arc<dyn ChatBackend>,
    limiter: Arc<RateLimiter>,
    model: String,
}

impl AnalysisWriter {
    pub fn new(backend: Arc<dyn ChatBackend>, limiter: Arc<RateLimiter>, model: &str) -> Self {
        Self {
            backend,
            limiter,
            model: model.to_string(),
        }
    }

    pub async fn analyze(&self, table: &DataTable, context: &ReportContext) -> AiAnalysis {
        if table.is_empty() {
            return AiAnalysis::canned(NO_DATA_INSIGHT);
        }
        info!("Generating AI analysis with {}", self.model);

        let prompt = analysis_prompt(&DataSummary::from_table(table), table, context);
        let request = ChatRequest::new(
            &self.model,
            vec![
                ChatMessage::system(ANALYST_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            ANALYSIS_MAX_TOKENS,
            ANALYSIS_TEMPERATURE,
        );

        self.limiter.wait().await;
        match self.backend.complete(request).await {
            Ok(content) => response_parser::parse_analysis(&content),
            Err(e) => {
                error!("Error in AI analysis: {:#}", e);
                AiAnalysis::canned(FAILED_INSIGHT)
            }
        }
    }
}

pub fn analysis_prompt(
    summary: &DataSummary,
    table: &DataTable,
    context: &ReportContext,
) -> String {
    let data_types = summary
        .data_types
        .iter()
        .map(|(column, kind)| format!("{}: {}", column, kind))
        .collect::<Vec<_>>()
        .join(", ");
    let sample = table
        .rows()
        .iter()
        .take(SAMPLE_RECORDS)
        .map(|row| serde_json::to_string(row).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Task: Draft an Executive Summary and 4-6 bullet Key Findings for a factual, text-only report.
Base your analysis strictly on the dataset and the search answer below; avoid speculation.

User Query: {query}
Search Answer (if any): {answer}
Sources: {sources:?}

Dataset Summary:
- Total records: {total}
- Columns: {columns:?}
- Data types: {{{data_types}}}

Sample data (first 3 records):
{sample}

Return JSON with exactly these keys:
{{
    \"key_insights\": [\"...\", \"...\"],
    \"trends\": [],
    \"recommendations\": []
}}",
        query = context.user_input,
        answer = context.answer,
        sources = context.sources,
        total = summary.total_records,
        columns = summary.columns,
        data_types = data_types,
        sample = sample,
    )
}
