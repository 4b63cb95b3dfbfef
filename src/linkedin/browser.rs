// src/linkedin/browser.rs
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::{Browser, BrowserConfig as ChromeConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::types::ScrapeError;
use crate::core::config_manager::BrowserConfig;

const LOGIN_URL: &str = "https://www.linkedin.com/login";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const CHROME_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-web-security",
    "--disable-features=VizDisplayCompositor",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-renderer-backgrounding",
];

const SETTLE_DELAY: Duration = Duration::from_millis(2500);
const LOGIN_DELAY: Duration = Duration::from_secs(5);
const SCROLL_DELAY: Duration = Duration::from_millis(600);

/// The page operations profile scraping needs
#[async_trait]
pub trait ProfileBrowser: Send {
    /// Submit the login form; true when LinkedIn lands on the feed
    async fn login(&mut self, email: &str, password: &str) -> Result<bool>;
    async fn open(&mut self, url: &str) -> Result<()>;
    /// Scroll a third of the page per step so lazy sections render
    async fn scroll(&mut self, steps: u32) -> Result<()>;
    async fn html(&mut self) -> Result<String>;
    async fn current_url(&mut self) -> Result<String>;
    async fn close(&mut self) -> Result<()>;
}

/// Chromium driven over CDP
pub struct ChromeBrowser {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    timeout: Duration,
}

impl ChromeBrowser {
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let mut builder = ChromeConfig::builder()
            .args(CHROME_ARGS.iter().map(|a| a.to_string()))
            .request_timeout(config.timeout);
        if !config.headless {
            builder = builder.with_head();
        }
        let chrome_config = builder
            .build()
            .map_err(|e| ScrapeError::Browser(format!("Config failed: {}", e)))?;

        info!("Launching chromium (headless: {})", config.headless);
        let (browser, mut handler) = Browser::launch(chrome_config)
            .await
            .map_err(|e| ScrapeError::Browser(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Chromium handler event error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to create page: {}", e)))?;
        page.set_user_agent(SetUserAgentOverrideParams::new(USER_AGENT))
            .await
            .map_err(|e| ScrapeError::Browser(e.to_string()))?;

        Ok(Self {
            browser,
            page,
            handler,
            timeout: config.timeout,
        })
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.page
            .find_element(selector)
            .await
            .with_context(|| format!("Element not found: {}", selector))?
            .click()
            .await
            .with_context(|| format!("Click failed: {}", selector))?
            .type_str(value)
            .await
            .with_context(|| format!("Typing failed: {}", selector))?;
        Ok(())
    }
}

#[async_trait]
impl ProfileBrowser for ChromeBrowser {
    async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        info!("Logging in with: {}", email);
        self.open(LOGIN_URL).await?;

        self.fill("#username", email).await?;
        self.fill("#password", password).await?;
        self.page
            .find_element("button[type=\"submit\"]")
            .await
            .context("Login button not found")?
            .click()
            .await
            .context("Login click failed")?;

        tokio::time::sleep(LOGIN_DELAY).await;

        let landed = self.current_url().await?;
        let success = landed.contains("feed") || landed.contains("mynetwork");
        if success {
            info!("Login successful");
        } else {
            warn!("Login failed, landed on {}", landed);
        }
        Ok(success)
    }

    async fn open(&mut self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        let navigation = async {
            self.page.goto(url).await?.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };
        tokio::time::timeout(self.timeout, navigation)
            .await
            .map_err(|_| anyhow!("Navigation to {} timed out", url))?
            .with_context(|| format!("Navigation to {} failed", url))?;

        tokio::time::sleep(SETTLE_DELAY).await;
        Ok(())
    }

    async fn scroll(&mut self, steps: u32) -> Result<()> {
        for _ in 0..steps {
            self.page
                .evaluate("window.scrollBy(0, document.body.scrollHeight/3)")
                .await
                .context("Scroll failed")?;
            tokio::time::sleep(SCROLL_DELAY).await;
        }
        Ok(())
    }

    async fn html(&mut self) -> Result<String> {
        self.page.content().await.context("Failed to read page content")
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self
            .page
            .url()
            .await
            .context("Failed to read page URL")?
            .unwrap_or_default())
    }

    async fn close(&mut self) -> Result<()> {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
        Ok(())
    }
}
