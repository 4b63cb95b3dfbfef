// src/linkedin/mod.rs
pub mod browser;
pub mod extractor;
pub mod scraper;
pub mod skills;
pub mod types;

pub use browser::{ChromeBrowser, ProfileBrowser};
pub use scraper::{save_profile, Credentials, LinkedInProfiles, LinkedInScraper, ProfileSource};
pub use types::{ProfileData, ProfileUrl, ScrapeError};
