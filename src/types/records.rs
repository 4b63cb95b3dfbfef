// src/types/records.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// One hit returned by the search executor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source: String,
    pub relevance_score: f64,
}

impl SearchResult {
    pub fn web(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            source: "web".to_string(),
            relevance_score: score,
        }
    }

    pub fn is_linkedin_profile(&self) -> bool {
        is_linkedin_profile_url(&self.url)
    }
}

pub fn is_linkedin_profile_url(url: &str) -> bool {
    url.contains("linkedin.com/in/")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordSource {
    #[serde(rename = "LinkedIn")]
    LinkedIn,
    #[serde(rename = "Compound-Beta")]
    CompoundBeta,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::LinkedIn => "LinkedIn",
            RecordSource::CompoundBeta => "Compound-Beta",
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// A record produced by the task executor, either a scraped profile or a web source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedRecord {
    pub profile_url: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub contact_info: serde_json::Map<String, serde_json::Value>,
    pub scraped_at: String,
    pub source: RecordSource,
}

impl ScrapedRecord {
    /// Minimal record for a non-profile web source
    pub fn web_source(url: &str, name: &str, summary: &str) -> Self {
        Self {
            profile_url: url.to_string(),
            name: name.to_string(),
            headline: String::new(),
            location: String::new(),
            summary: summary.to_string(),
            experience: Vec::new(),
            skills: Vec::new(),
            education: Vec::new(),
            contact_info: serde_json::Map::new(),
            scraped_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: RecordSource::CompoundBeta,
        }
    }
}

/// Narrative context accumulated across search calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchContext {
    pub answer: String,
    pub sources: Vec<String>,
    pub linkedin_profiles: Vec<String>,
}

impl SearchContext {
    /// Latest non-empty answer wins; URL lists are merged uniquely in order
    pub fn merge(&mut self, answer: &str, sources: &[String], linkedin_profiles: &[String]) {
        if !answer.is_empty() {
            self.answer = answer.to_string();
        }
        merge_unique(&mut self.sources, sources);
        merge_unique(&mut self.linkedin_profiles, linkedin_profiles);
    }
}

fn merge_unique(target: &mut Vec<String>, incoming: &[String]) {
    for url in incoming {
        if !url.is_empty() && !target.contains(url) {
            target.push(url.clone());
        }
    }
}
