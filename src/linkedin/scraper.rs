// src/linkedin/scraper.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::Html;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::browser::{ChromeBrowser, ProfileBrowser};
use super::extractor;
use super::types::{ProfileData, ProfileUrl, ScrapeError};
use crate::core::config_manager::BrowserConfig;
use crate::core::FsOps;
use crate::types::ScrapedRecord;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn from_config(config: &BrowserConfig) -> Result<Self, ScrapeError> {
        match (&config.linkedin_email, &config.linkedin_password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok(Self {
                    email: email.clone(),
                    password: password.clone(),
                })
            }
            _ => Err(ScrapeError::MissingCredentials),
        }
    }
}

/// Logs in once, then walks each profile and its detail pages
pub struct LinkedInScraper<B: ProfileBrowser> {
    browser: B,
    credentials: Credentials,
    logged_in: bool,
}

impl LinkedInScraper<ChromeBrowser> {
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let credentials = Credentials::from_config(config)?;
        let browser = ChromeBrowser::launch(config).await?;
        Ok(Self::new(browser, credentials))
    }
}

impl<B: ProfileBrowser> LinkedInScraper<B> {
    pub fn new(browser: B, credentials: Credentials) -> Self {
        Self {
            browser,
            credentials,
            logged_in: false,
        }
    }

    pub async fn scrape_profile(&mut self, url: &str) -> Result<ProfileData> {
        let profile_url = ProfileUrl::parse(url)?;
        info!("Scraping LinkedIn profile: {}", profile_url.as_str());

        if !self.logged_in {
            let ok = self
                .browser
                .login(&self.credentials.email, &self.credentials.password)
                .await?;
            if !ok {
                return Err(ScrapeError::LoginFailed.into());
            }
            self.logged_in = true;
        }

        self.browser.open(profile_url.as_str()).await?;
        let landed = self.browser.current_url().await.unwrap_or_default();
        let root = if landed.contains("linkedin.com/in/") {
            super::types::profile_root(&landed)
        } else {
            profile_url.root()
        };

        // One short scroll brings the about card into the DOM
        self.browser.scroll(1).await?;
        let main = self.browser.html().await?;

        let (basic, about, mut experience, mut education) = {
            let doc = Html::parse_document(&main);
            (
                extractor::basic_info(&doc),
                extractor::about(&doc),
                extractor::experience_exact(&doc),
                extractor::education_exact(&doc),
            )
        };

        if experience.is_empty() {
            if let Some(page) = self.detail_page(&root, "details/experience/").await {
                experience = extractor::experience_details(&Html::parse_document(&page));
            }
        }
        if education.is_empty() {
            if let Some(page) = self.detail_page(&root, "details/education/").await {
                education = extractor::education_details(&Html::parse_document(&page));
            }
        }

        let activity_posts = match self.detail_page(&root, "recent-activity/all/").await {
            Some(page) => extractor::activity_posts(&Html::parse_document(&page)),
            None => Vec::new(),
        };
        let recommendations = match self.detail_page(&root, "details/recommendations/").await {
            Some(page) => extractor::recommendations(&Html::parse_document(&page)),
            None => Vec::new(),
        };

        Ok(ProfileData {
            basic,
            about,
            experience,
            education,
            activity_posts,
            recommendations,
            source_url: url.to_string(),
            scraped_at: chrono::Local::now().to_rfc3339(),
        })
    }

    /// A detail page that fails to load leaves its section empty
    async fn detail_page(&mut self, root: &str, suffix: &str) -> Option<String> {
        let url = format!("{}{}", root, suffix);
        let loaded = async {
            self.browser.open(&url).await?;
            self.browser.scroll(6).await?;
            self.browser.html().await
        }
        .await;

        match loaded {
            Ok(page) => Some(page),
            Err(e) => {
                warn!("Could not load {}: {:#}", url, e);
                None
            }
        }
    }

    pub async fn close(&mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Error closing browser: {:#}", e);
        }
    }
}

/// Where the task executor gets profile records from
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Scrape each URL in turn; individual failures are logged and skipped
    async fn scrape_profiles(&self, urls: &[String]) -> Result<Vec<ScrapedRecord>>;
}

/// Profile source backed by a fresh Chromium session per batch
pub struct LinkedInProfiles {
    config: BrowserConfig,
}

impl LinkedInProfiles {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProfileSource for LinkedInProfiles {
    async fn scrape_profiles(&self, urls: &[String]) -> Result<Vec<ScrapedRecord>> {
        let mut scraper = LinkedInScraper::launch(&self.config).await?;
        let records = scrape_all(&mut scraper, urls).await;
        scraper.close().await;
        Ok(records)
    }
}

pub async fn scrape_all<B: ProfileBrowser>(
    scraper: &mut LinkedInScraper<B>,
    urls: &[String],
) -> Vec<ScrapedRecord> {
    let mut records = Vec::new();
    for url in urls {
        match scraper.scrape_profile(url).await {
            Ok(profile) => records.push(profile.into_record()),
            Err(e) => {
                error!("Error scraping LinkedIn profile {}: {:#}", url, e);
                if matches!(e.downcast_ref::<ScrapeError>(), Some(ScrapeError::LoginFailed)) {
                    break;
                }
            }
        }
    }
    info!("LinkedIn scraping completed. Scraped {} profiles", records.len());
    records
}

/// `scraped_profiles/linkedin_profile_<name>_<ts>.json` under `dir`
pub async fn save_profile(dir: &Path, profile: &ProfileData) -> Result<PathBuf> {
    let name = FsOps::slugify(&profile.basic.name);
    let path = dir.join("scraped_profiles").join(format!(
        "linkedin_profile_{}_{}.json",
        name,
        FsOps::file_timestamp()
    ));
    FsOps::write_json_pretty(&path, profile)
        .await
        .with_context(|| format!("Failed to save profile data to {}", path.display()))?;
    info!("Profile data saved to: {}", path.display());
    Ok(path)
}
