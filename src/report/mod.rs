// src/report/mod.rs
pub mod analysis;
pub mod generator;
pub mod stats;
pub mod template_engine;

use serde::Serialize;

use crate::types::SearchContext;

pub use analysis::AnalysisWriter;
pub use generator::{Report, ReportGenerator, NO_DATA_REPORT};
pub use stats::{DataSummary, SummaryStats};

/// What the report knows about the request beyond the table itself
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportContext {
    pub user_input: String,
    pub answer: String,
    pub sources: Vec<String>,
    pub linkedin_profiles: Vec<String>,
}

impl ReportContext {
    pub fn new(user_input: &str, search: &SearchContext) -> Self {
        Self {
            user_input: user_input.to_string(),
            answer: search.answer.clone(),
            sources: search.sources.clone(),
            linkedin_profiles: search.linkedin_profiles.clone(),
        }
    }
}
