// src/core/config_manager.rs
//! Unified configuration: environment variables with an optional YAML overlay

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::core::OutputStore;

pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_SEARCH_MODEL: &str = "compound-beta";
pub const DEFAULT_ANALYSIS_MODEL: &str = "meta-llama/llama-4-maverick-17b-128e-instruct";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub llm: LlmConfig,
    pub browser: BrowserConfig,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub name: String,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub search_model: String,
    pub analysis_model: String,
    pub rate_limit_delay: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub query_delay: Duration,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub timeout: Duration,
    pub linkedin_email: Option<String>,
    pub linkedin_password: Option<String>,
}

/// Optional `prospector.yaml` overlay. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    output_path: Option<PathBuf>,
    search_model: Option<String>,
    analysis_model: Option<String>,
    rate_limit_seconds: Option<f64>,
    max_retries: Option<u32>,
    retry_delay_seconds: Option<f64>,
    query_delay_seconds: Option<f64>,
    http_timeout_seconds: Option<u64>,
    headless: Option<bool>,
    browser_timeout_seconds: Option<u64>,
}

impl ConfigManager {
    /// Load all configuration from the process environment
    pub fn load() -> Result<Self> {
        let overlay_path = std::env::var("PROSPECTOR_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("prospector.yaml"));
        let overlay = Self::load_overlay(&overlay_path)?;
        Self::from_sources(|key| std::env::var(key).ok(), overlay)
    }

    /// Build from an arbitrary variable lookup and no overlay file
    pub fn from_lookup<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_sources(env, ConfigFile::default())
    }

    fn load_overlay(path: &Path) -> Result<ConfigFile> {
        if !path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let overlay: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!("Loaded configuration overlay from {}", path.display());
        Ok(overlay)
    }

    fn from_sources<F>(env: F, overlay: ConfigFile) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = env("PROSPECTOR_ENV")
            .or_else(|| env("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string());
        info!("Loading configuration for environment: {}", name);

        let output_path = env("PROSPECTOR_OUTPUT_DIR")
            .map(PathBuf::from)
            .or(overlay.output_path)
            .unwrap_or_else(|| PathBuf::from("output"));

        let llm = LlmConfig {
            api_key: env("GROQ_API_KEY").filter(|k| !k.trim().is_empty()),
            base_url: env("GROQ_API_URL").unwrap_or_else(|| DEFAULT_GROQ_URL.to_string()),
            search_model: overlay
                .search_model
                .unwrap_or_else(|| DEFAULT_SEARCH_MODEL.to_string()),
            analysis_model: overlay
                .analysis_model
                .unwrap_or_else(|| DEFAULT_ANALYSIS_MODEL.to_string()),
            rate_limit_delay: secs(overlay.rate_limit_seconds, 3.0),
            max_retries: overlay.max_retries.unwrap_or(2).max(1),
            retry_delay: secs(overlay.retry_delay_seconds, 2.0),
            query_delay: secs(overlay.query_delay_seconds, 1.0),
            timeout: Duration::from_secs(overlay.http_timeout_seconds.unwrap_or(60)),
        };

        let browser = BrowserConfig {
            headless: overlay.headless.unwrap_or(true),
            timeout: Duration::from_secs(overlay.browser_timeout_seconds.unwrap_or(30)),
            linkedin_email: env("LINKEDIN_EMAIL").filter(|v| !v.is_empty()),
            linkedin_password: env("LINKEDIN_PASSWORD").filter(|v| !v.is_empty()),
        };

        Ok(Self {
            environment: EnvironmentConfig { name, output_path },
            llm,
            browser,
        })
    }

    /// Fail early when the LLM key is missing
    pub fn require_api_key(&self) -> Result<String> {
        self.llm
            .api_key
            .clone()
            .context("GROQ_API_KEY environment variable is required")
    }

    /// Ensure the output tree exists
    pub async fn ensure_directories(&self) -> Result<()> {
        OutputStore::new(&self.environment.output_path)
            .ensure_tree()
            .await
    }
}

pub const OUTPUT_SUBDIRS: &[&str] = &[
    "",
    "raw_data",
    "raw_data/linkedin",
    "raw_data/compound_beta",
    "raw_data/compound_beta_enriched",
    "cleaned_data",
    "reports",
    "logs",
];

fn secs(value: Option<f64>, default: f64) -> Duration {
    Duration::from_secs_f64(value.filter(|v| *v >= 0.0).unwrap_or(default))
}
