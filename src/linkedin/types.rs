// src/linkedin/types.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{EducationEntry, ExperienceEntry, RecordSource, ScrapedRecord};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Not a valid LinkedIn profile URL: {0}")]
    InvalidUrl(String),
    #[error("LINKEDIN_EMAIL and LINKEDIN_PASSWORD must be set")]
    MissingCredentials,
    #[error("Failed to login to LinkedIn")]
    LoginFailed,
    #[error("Browser error: {0}")]
    Browser(String),
}

/// A validated `linkedin.com/in/<handle>` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUrl(String);

impl ProfileUrl {
    pub fn parse(url: &str) -> Result<Self, ScrapeError> {
        let url = url.trim();
        if !url.contains("linkedin.com/in/") || url.contains("/company/") {
            return Err(ScrapeError::InvalidUrl(url.to_string()));
        }
        Ok(Self(url.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn root(&self) -> String {
        profile_root(&self.0)
    }
}

/// Canonical `scheme://host/in/<handle>/` form with query and fragment dropped
pub fn profile_root(url: &str) -> String {
    let stripped = url.split(['?', '#']).next().unwrap_or(url);
    if let Ok(parsed) = reqwest::Url::parse(stripped) {
        let parts: Vec<&str> = parsed.path().split('/').filter(|p| !p.is_empty()).collect();
        if let Some(idx) = parts.iter().position(|p| *p == "in") {
            let handle = parts.get(idx + 1).copied().unwrap_or_default();
            let host = match parsed.port() {
                Some(port) => format!("{}:{}", parsed.host_str().unwrap_or_default(), port),
                None => parsed.host_str().unwrap_or_default().to_string(),
            };
            return format!("{}://{}/in/{}/", parsed.scheme(), host, handle);
        }
    }
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub headline: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommender_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_text: Option<String>,
}

/// Everything read from one profile and its detail pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(flatten)]
    pub basic: BasicInfo,
    pub about: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub activity_posts: Vec<ActivityPost>,
    pub recommendations: Vec<Recommendation>,
    pub source_url: String,
    pub scraped_at: String,
}

impl ProfileData {
    pub fn into_record(self) -> ScrapedRecord {
        let skills = super::skills::infer_skills(
            &self.basic.headline,
            &self.about,
            self.experience.iter().filter_map(|e| e.title.as_deref()),
        );
        let name = if self.basic.name.is_empty() {
            "Unknown".to_string()
        } else {
            self.basic.name
        };

        ScrapedRecord {
            profile_url: self.source_url,
            name,
            headline: self.basic.headline,
            location: self.basic.location,
            summary: self.about,
            experience: self.experience,
            skills,
            education: self.education,
            contact_info: serde_json::Map::new(),
            scraped_at: self.scraped_at,
            source: RecordSource::LinkedIn,
        }
    }
}
