// src/data/table.rs
use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::{EducationEntry, ExperienceEntry, RecordSource, ScrapedRecord, SearchContext};

pub const COLUMNS: &[&str] = &[
    "profile_url",
    "name",
    "headline",
    "location",
    "summary",
    "experience",
    "skills",
    "education",
    "source",
    "all_skills",
];

const LIST_COLUMNS: &[&str] = &["experience", "skills", "education", "all_skills"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataRow {
    pub profile_url: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub source: RecordSource,
    pub all_skills: Vec<String>,
}

impl DataRow {
    fn from_record(record: &ScrapedRecord) -> Self {
        let name = record.name.trim();
        Self {
            profile_url: record.profile_url.clone(),
            name: if name.is_empty() { "Unknown" } else { name }.to_string(),
            headline: record.headline.trim().to_string(),
            location: record.location.trim().to_string(),
            summary: record.summary.clone(),
            experience: record.experience.clone(),
            skills: record.skills.clone(),
            education: record.education.clone(),
            source: record.source,
            all_skills: record.skills.clone(),
        }
    }

    fn web_answer(answer: &str) -> Self {
        Self {
            profile_url: String::new(),
            name: "Web Answer".to_string(),
            headline: String::new(),
            location: String::new(),
            summary: answer.to_string(),
            experience: Vec::new(),
            skills: Vec::new(),
            education: Vec::new(),
            source: RecordSource::CompoundBeta,
            all_skills: Vec::new(),
        }
    }

    fn csv_fields(&self) -> Result<Vec<String>> {
        Ok(vec![
            self.profile_url.clone(),
            self.name.clone(),
            self.headline.clone(),
            self.location.clone(),
            self.summary.clone(),
            serde_json::to_string(&self.experience)?,
            serde_json::to_string(&self.skills)?,
            serde_json::to_string(&self.education)?,
            self.source.to_string(),
            serde_json::to_string(&self.all_skills)?,
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    rows: Vec<DataRow>,
}

impl DataTable {
    pub fn from_records(records: &[ScrapedRecord]) -> Self {
        Self {
            rows: records.iter().map(DataRow::from_record).collect(),
        }
    }

    /// An empty table still reports the narrative answer as a single row
    pub fn with_answer_fallback(mut self, context: &SearchContext) -> Self {
        if self.rows.is_empty() && !context.answer.is_empty() {
            self.rows.push(DataRow::web_answer(&context.answer));
        }
        self
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> Vec<String> {
        COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    /// Column name paired with `list` or `text`
    pub fn column_types(&self) -> Vec<(String, &'static str)> {
        COLUMNS
            .iter()
            .map(|c| {
                let kind = if LIST_COLUMNS.contains(c) { "list" } else { "text" };
                (c.to_string(), kind)
            })
            .collect()
    }

    /// One line per row, list columns JSON encoded
    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(COLUMNS)
            .context("Failed to write CSV header")?;
        for row in &self.rows {
            writer
                .write_record(row.csv_fields()?)
                .with_context(|| format!("Failed to write CSV row for {}", row.name))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
        String::from_utf8(bytes).context("CSV output was not valid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, source: RecordSource) -> ScrapedRecord {
        ScrapedRecord {
            source,
            location: "  Berlin ".to_string(),
            skills: vec!["rust".to_string(), "sql".to_string()],
            ..ScrapedRecord::web_source("https://example.com", name, "summary")
        }
    }

    #[test]
    fn rows_are_trimmed_and_defaulted() {
        let table = DataTable::from_records(&[
            record("  Jane ", RecordSource::LinkedIn),
            record("", RecordSource::CompoundBeta),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].name, "Jane");
        assert_eq!(table.rows()[0].location, "Berlin");
        assert_eq!(table.rows()[1].name, "Unknown");
        assert_eq!(table.rows()[0].all_skills, vec!["rust", "sql"]);
    }

    #[test]
    fn answer_row_only_fills_an_empty_table() {
        let context = SearchContext {
            answer: "Rust is popular".to_string(),
            ..SearchContext::default()
        };
        let table = DataTable::from_records(&[]).with_answer_fallback(&context);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].name, "Web Answer");
        assert_eq!(table.rows()[0].source, RecordSource::CompoundBeta);

        let full = DataTable::from_records(&[record("Jane", RecordSource::LinkedIn)])
            .with_answer_fallback(&context);
        assert_eq!(full.rows()[0].name, "Jane");

        assert!(DataTable::default()
            .with_answer_fallback(&SearchContext::default())
            .is_empty());
    }

    #[test]
    fn csv_encodes_lists_as_json() {
        let table = DataTable::from_records(&[record("Jane", RecordSource::LinkedIn)]);
        let csv = table.to_csv_string().unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), COLUMNS.len());

        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[1], "Jane");
        assert_eq!(&row[6], r#"["rust","sql"]"#);
        assert_eq!(&row[8], "LinkedIn");
    }
}
