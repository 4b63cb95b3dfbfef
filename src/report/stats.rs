// src/report/stats.rs
//! Aggregate statistics over the assembled table.

use serde::Serialize;
use std::collections::HashSet;

use crate::data::DataTable;

const TOP_LOCATIONS: usize = 10;
const SUMMARY_LOCATIONS: usize = 5;
const COMMON_SKILLS: usize = 10;

const SENIOR_WORDS: &[&str] = &["senior", "lead", "principal"];
const ENTRY_WORDS: &[&str] = &["junior", "entry", "associate"];
const EXECUTIVE_WORDS: &[&str] = &["director", "vp", "cto", "ceo"];
const MID_WORDS: &[&str] = &["engineer", "developer", "analyst"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperienceLevels {
    pub entry: usize,
    pub mid: usize,
    pub senior: usize,
    pub executive: usize,
    pub unknown: usize,
}

impl ExperienceLevels {
    /// Headline keywords, checked from most to least senior-specific
    pub fn classify<'a>(headlines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut levels = Self::default();
        for headline in headlines {
            let lower = headline.to_lowercase();
            let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
            if has(SENIOR_WORDS) {
                levels.senior += 1;
            } else if has(ENTRY_WORDS) {
                levels.entry += 1;
            } else if has(EXECUTIVE_WORDS) {
                levels.executive += 1;
            } else if has(MID_WORDS) {
                levels.mid += 1;
            } else {
                levels.unknown += 1;
            }
        }
        levels
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_records: usize,
    pub unique_locations: usize,
    pub records_with_skills: usize,
    pub records_with_experience: usize,
    pub avg_skills_per_record: f64,
    pub top_locations: Vec<(String, usize)>,
    pub source_distribution: Vec<(String, usize)>,
    pub experience_levels: ExperienceLevels,
}

impl SummaryStats {
    pub fn from_table(table: &DataTable) -> Self {
        if table.is_empty() {
            return Self::default();
        }
        let rows = table.rows();

        let unique_locations = rows
            .iter()
            .map(|r| r.location.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_records: rows.len(),
            unique_locations,
            records_with_skills: rows.iter().filter(|r| !r.all_skills.is_empty()).count(),
            records_with_experience: rows.iter().filter(|r| !r.experience.is_empty()).count(),
            avg_skills_per_record: avg_skills(table),
            top_locations: value_counts(rows.iter().map(|r| r.location.clone()))
                .into_iter()
                .take(TOP_LOCATIONS)
                .collect(),
            source_distribution: value_counts(rows.iter().map(|r| r.source.to_string())),
            experience_levels: ExperienceLevels::classify(rows.iter().map(|r| r.headline.as_str())),
        }
    }
}

/// What the analysis prompt is told about the table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataSummary {
    pub total_records: usize,
    pub columns: Vec<String>,
    pub data_types: Vec<(String, &'static str)>,
    pub top_locations: Vec<(String, usize)>,
    pub common_skills: Vec<(String, usize)>,
    pub avg_skills_per_record: f64,
    pub records_with_experience: usize,
    pub sources: Vec<(String, usize)>,
}

impl DataSummary {
    pub fn from_table(table: &DataTable) -> Self {
        let rows = table.rows();
        Self {
            total_records: rows.len(),
            columns: table.columns(),
            data_types: table.column_types(),
            top_locations: value_counts(rows.iter().map(|r| r.location.clone()))
                .into_iter()
                .take(SUMMARY_LOCATIONS)
                .collect(),
            common_skills: common_skills(table, COMMON_SKILLS),
            avg_skills_per_record: avg_skills(table),
            records_with_experience: rows.iter().filter(|r| !r.experience.is_empty()).count(),
            sources: value_counts(rows.iter().map(|r| r.source.to_string())),
        }
    }
}

/// Most frequent skills across every row
pub fn common_skills(table: &DataTable, top_n: usize) -> Vec<(String, usize)> {
    value_counts(table.rows().iter().flat_map(|r| r.all_skills.iter().cloned()))
        .into_iter()
        .take(top_n)
        .collect()
}

fn avg_skills(table: &DataTable) -> f64 {
    if table.is_empty() {
        return 0.0;
    }
    let total: usize = table.rows().iter().map(|r| r.all_skills.len()).sum();
    total as f64 / table.len() as f64
}

// Descending by count; equal counts keep first-seen order
fn value_counts(values: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
