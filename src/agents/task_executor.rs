// src/agents/task_executor.rs
//! Turns a classified request into records: searches, LinkedIn scraping and
//! LLM enrichment of plain web sources.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::intent::{self, TaskKind};
use super::query_generator::{generate_queries, QueryFlavor};
use super::web_search::{SearchSettings, WebSearcher};
use crate::core::OutputStore;
use crate::linkedin::ProfileSource;
use crate::llm::{ChatBackend, ChatMessage, ChatRequest, RateLimiter};
use crate::types::{is_linkedin_profile_url, ScrapedRecord, SearchContext, SearchResult};

const ENRICH_MAX_TOKENS: u32 = 300;
const ENRICH_TEMPERATURE: f32 = 0.2;
const SUMMARY_CHARS: usize = 300;

pub struct TaskExecutor {
    backend: Arc<dyn ChatBackend>,
    limiter: Arc<RateLimiter>,
    store: OutputStore,
    model: String,
    searcher: WebSearcher,
    profiles: Arc<dyn ProfileSource>,
    search_results: Vec<SearchResult>,
    scraped: Vec<ScrapedRecord>,
    context: SearchContext,
}

impl TaskExecutor {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        limiter: Arc<RateLimiter>,
        store: OutputStore,
        settings: SearchSettings,
        profiles: Arc<dyn ProfileSource>,
    ) -> Self {
        let model = settings.model.clone();
        let searcher = WebSearcher::new(backend.clone(), limiter.clone(), store.clone(), settings);
        Self {
            backend,
            limiter,
            store,
            model,
            searcher,
            profiles,
            search_results: Vec::new(),
            scraped: Vec::new(),
            context: SearchContext::default(),
        }
    }

    /// Answer, sources and LinkedIn links gathered by the last run
    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.search_results
    }

    pub async fn execute(&mut self, input: &str, max_results: usize) -> Vec<ScrapedRecord> {
        info!("Starting task execution");
        self.search_results.clear();
        self.scraped.clear();
        self.context = SearchContext::default();

        let kind = intent::classify(input);
        info!("Task type: {:?}", kind);

        let outcome = match kind {
            TaskKind::LinkedinSearch => self.linkedin_search(input, max_results).await,
            TaskKind::WebSearch => self.flavored_search(input, max_results, QueryFlavor::Web).await,
            TaskKind::DataScraping => self.data_scraping(input, max_results).await,
            TaskKind::WebOnly => self.web_only(input, max_results).await,
        };
        if let Err(e) = outcome {
            error!("Error in task execution: {:#}", e);
        }

        info!("Task execution completed. Found {} results", self.scraped.len());
        self.scraped.clone()
    }

    async fn linkedin_search(&mut self, input: &str, max_results: usize) -> Result<()> {
        let queries = self.queries(input, QueryFlavor::Linkedin).await;
        self.run_search(&queries, max_results).await;
        self.scrape_linkedin(max_results).await;

        if !self.search_results.iter().any(SearchResult::is_linkedin_profile) {
            info!("No LinkedIn URLs from first pass. Running site:linkedin.com secondary search.");
            let site_queries = vec![
                format!("site:linkedin.com/in {}", input),
                format!("{} site:linkedin.com/in", input),
            ];
            self.run_search(&site_queries, max_results).await;
            self.scrape_linkedin(max_results).await;
        }

        self.enrich_other_results(max_results).await;
        Ok(())
    }

    async fn flavored_search(
        &mut self,
        input: &str,
        max_results: usize,
        flavor: QueryFlavor,
    ) -> Result<()> {
        let queries = self.queries(input, flavor).await;
        self.run_search(&queries, max_results).await;
        self.enrich_other_results(max_results).await;
        Ok(())
    }

    async fn data_scraping(&mut self, input: &str, max_results: usize) -> Result<()> {
        let urls = intent::extract_urls(input);
        if urls.is_empty() {
            return self
                .flavored_search(input, max_results, QueryFlavor::Generic)
                .await;
        }

        info!("Scraping specific URLs: {:?}", urls);
        let urls: Vec<String> = urls.into_iter().take(max_results).collect();
        let (profiles, others): (Vec<String>, Vec<String>) =
            urls.into_iter().partition(|u| is_linkedin_profile_url(u));

        if !profiles.is_empty() {
            match self.profiles.scrape_profiles(&profiles).await {
                Ok(records) => self.scraped.extend(records),
                Err(e) => error!("Error scraping LinkedIn URLs: {:#}", e),
            }
        }
        self.enrich_urls(&others, max_results).await;
        Ok(())
    }

    async fn web_only(&mut self, input: &str, max_results: usize) -> Result<()> {
        let queries = self.queries(input, QueryFlavor::Web).await;
        self.run_search(&queries, max_results).await;

        if self.search_results.iter().any(SearchResult::is_linkedin_profile) {
            self.scrape_linkedin(max_results).await;
        }

        // Profiles were scraped above, the rest become lightweight fact records
        let minimal: Vec<ScrapedRecord> = self
            .search_results
            .iter()
            .filter(|r| !r.url.is_empty() && !r.is_linkedin_profile())
            .take(max_results)
            .map(|r| {
                let name = if r.title.is_empty() { "Unknown" } else { r.title.as_str() };
                ScrapedRecord::web_source(&r.url, name, &r.snippet)
            })
            .collect();
        self.scraped.extend(minimal);
        Ok(())
    }

    async fn queries(&self, input: &str, flavor: QueryFlavor) -> Vec<String> {
        generate_queries(
            self.backend.as_ref(),
            &self.limiter,
            &self.model,
            input,
            flavor,
        )
        .await
    }

    async fn run_search(&mut self, queries: &[String], max_results: usize) {
        self.search_results = self
            .searcher
            .search(queries, max_results, &mut self.context)
            .await;
    }

    async fn scrape_linkedin(&mut self, max_results: usize) {
        info!("Starting LinkedIn profile scraping");
        let urls: Vec<String> = self
            .search_results
            .iter()
            .filter(|r| r.is_linkedin_profile())
            .map(|r| r.url.clone())
            .take(max_results)
            .collect();

        if urls.is_empty() {
            warn!("No LinkedIn URLs found in search results");
            return;
        }

        match self.profiles.scrape_profiles(&urls).await {
            Ok(records) => self.scraped.extend(records),
            Err(e) => error!("Error in LinkedIn scraping: {:#}", e),
        }
    }

    async fn enrich_other_results(&mut self, max_results: usize) {
        let others: Vec<String> = self
            .search_results
            .iter()
            .filter(|r| !r.url.is_empty() && !r.is_linkedin_profile())
            .map(|r| r.url.clone())
            .collect();
        self.enrich_urls(&others, max_results).await;
    }

    async fn enrich_urls(&mut self, urls: &[String], max_results: usize) {
        for url in urls.iter().take(max_results) {
            let enriched = self.enrich_url(url).await;
            let (title, summary) = match &enriched {
                Some(data) => (
                    text_field(data, "title").unwrap_or_else(|| url.clone()),
                    text_field(data, "summary").unwrap_or_default(),
                ),
                None => (url.clone(), String::new()),
            };
            self.scraped
                .push(ScrapedRecord::web_source(url, &title, &truncate_summary(&summary)));
        }
    }

    /// Title and summary guessed from the URL text alone, the page is never fetched
    async fn enrich_url(&self, url: &str) -> Option<serde_json::Value> {
        self.limiter.wait().await;

        let prompt = format!(
            "Given this URL, infer a concise title and summary from the URL text and path only. \
             Return JSON with keys: title, summary. URL: {}",
            url
        );
        let request = ChatRequest::new(
            &self.model,
            vec![ChatMessage::user(prompt)],
            ENRICH_MAX_TOKENS,
            ENRICH_TEMPERATURE,
        );

        let content = match self.backend.complete(request).await {
            Ok(content) => content,
            Err(e) => {
                warn!("URL enrichment failed for {}: {:#}", url, e);
                return None;
            }
        };

        let data = match serde_json::from_str::<serde_json::Value>(content.trim()) {
            Ok(value) if value.is_object() => value,
            Ok(_) => return None,
            Err(_) => serde_json::json!({ "title": url_host(url), "summary": content }),
        };
        self.store.save_enriched(url, &data).await;
        Some(data)
    }
}

fn text_field(data: &serde_json::Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn url_host(url: &str) -> String {
    if url.contains("://") {
        url.split('/').nth(2).unwrap_or(url).to_string()
    } else {
        url.to_string()
    }
}

fn truncate_summary(summary: &str) -> String {
    if summary.chars().count() > SUMMARY_CHARS {
        let head: String = summary.chars().take(SUMMARY_CHARS).collect();
        format!("{}...", head)
    } else {
        summary.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordSource;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    type Reply = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

    struct Responder {
        reply: Reply,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatBackend for Responder {
        async fn complete(&self, request: ChatRequest) -> Result<String> {
            let prompt = request.last_user_content().to_string();
            self.prompts.lock().unwrap().push(prompt.clone());
            (self.reply)(&prompt)
        }
    }

    #[derive(Default)]
    struct StubProfiles {
        requested: Mutex<Vec<String>>,
        unavailable: bool,
    }

    #[async_trait]
    impl ProfileSource for StubProfiles {
        async fn scrape_profiles(&self, urls: &[String]) -> Result<Vec<ScrapedRecord>> {
            self.requested.lock().unwrap().extend(urls.iter().cloned());
            if self.unavailable {
                anyhow::bail!("LINKEDIN_EMAIL and LINKEDIN_PASSWORD are required");
            }
            Ok(urls
                .iter()
                .map(|u| ScrapedRecord {
                    source: RecordSource::LinkedIn,
                    headline: "Engineer".to_string(),
                    ..ScrapedRecord::web_source(u, "Profile", "")
                })
                .collect())
        }
    }

    fn executor(
        reply: Reply,
        profiles: Arc<StubProfiles>,
        dir: &std::path::Path,
    ) -> (TaskExecutor, Arc<Responder>) {
        let backend = Arc::new(Responder {
            reply,
            prompts: Mutex::new(Vec::new()),
        });
        let executor = TaskExecutor::new(
            backend.clone(),
            Arc::new(RateLimiter::new(Duration::ZERO)),
            OutputStore::new(dir),
            SearchSettings {
                model: "compound-beta".to_string(),
                max_retries: 1,
                retry_delay: Duration::ZERO,
                query_delay: Duration::ZERO,
            },
            profiles,
        );
        (executor, backend)
    }

    #[tokio::test]
    async fn web_only_builds_minimal_records_and_scrapes_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = Arc::new(StubProfiles::default());
        let reply: Reply = Box::new(|prompt| {
            if prompt.starts_with("Generate") {
                Ok(r#"["rust salaries"]"#.to_string())
            } else {
                Ok(concat!(
                    "Answer: about 120k\n",
                    "Sources:\n- https://stats.example.com/rust\n",
                    "LinkedIn Profiles:\n- https://www.linkedin.com/in/ferris",
                )
                .to_string())
            }
        });
        let (mut exec, _) = executor(reply, profiles.clone(), dir.path());

        let records = exec.execute("average rust salary", 10).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, RecordSource::LinkedIn);
        assert_eq!(records[1].profile_url, "https://stats.example.com/rust");
        assert_eq!(records[1].summary, "about 120k");
        assert_eq!(exec.context().answer, "about 120k");
        assert_eq!(
            *profiles.requested.lock().unwrap(),
            vec!["https://www.linkedin.com/in/ferris"]
        );
    }

    #[tokio::test]
    async fn linkedin_search_falls_back_to_site_queries() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = Arc::new(StubProfiles::default());
        let reply: Reply = Box::new(|prompt| {
            if prompt.starts_with("Generate") {
                Err(anyhow::anyhow!("offline"))
            } else if prompt.contains("site:linkedin.com/in") {
                Ok(
                    "Answer: found\nLinkedIn Profiles:\n- https://www.linkedin.com/in/jane"
                        .to_string(),
                )
            } else {
                Ok("Answer: nothing useful".to_string())
            }
        });
        let (mut exec, backend) = executor(reply, profiles.clone(), dir.path());

        let records = exec.execute("rust developers linkedin", 4).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].profile_url, "https://www.linkedin.com/in/jane");
        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts.contains(&"rust developers linkedin LinkedIn".to_string()));
        assert!(prompts.contains(&"site:linkedin.com/in rust developers linkedin".to_string()));
    }

    #[tokio::test]
    async fn explicit_urls_are_scraped_or_enriched() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = Arc::new(StubProfiles::default());
        let reply: Reply = Box::new(|_| Ok("A blog about async Rust".to_string()));
        let (mut exec, _) = executor(reply, profiles.clone(), dir.path());

        exec.data_scraping(
            "scrape https://www.linkedin.com/in/jane and https://blog.example.com/async",
            10,
        )
        .await
        .unwrap();

        let records = &exec.scraped;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, RecordSource::LinkedIn);
        assert_eq!(records[1].name, "blog.example.com");
        assert_eq!(records[1].summary, "A blog about async Rust");
        assert!(dir.path().join("raw_data/compound_beta_enriched").exists());
    }

    #[tokio::test]
    async fn other_urls_are_enriched_when_linkedin_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = Arc::new(StubProfiles {
            unavailable: true,
            ..StubProfiles::default()
        });
        let reply: Reply = Box::new(|_| Ok("A blog about async Rust".to_string()));
        let (mut exec, _) = executor(reply, profiles.clone(), dir.path());

        exec.data_scraping(
            "scrape https://www.linkedin.com/in/jane and https://blog.example.com/async",
            10,
        )
        .await
        .unwrap();

        assert_eq!(exec.scraped.len(), 1);
        assert_eq!(exec.scraped[0].profile_url, "https://blog.example.com/async");
        assert_eq!(profiles.requested.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn enrichment_json_is_used_and_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let long = "x".repeat(400);
        let reply: Reply = Box::new(move |_| {
            Ok(serde_json::json!({"title": "Async Book", "summary": long}).to_string())
        });
        let (mut exec, _) = executor(reply, Arc::new(StubProfiles::default()), dir.path());

        exec.enrich_urls(&["https://book.example.com".to_string()], 5).await;

        assert_eq!(exec.scraped[0].name, "Async Book");
        assert_eq!(exec.scraped[0].summary.chars().count(), 303);
        assert!(exec.scraped[0].summary.ends_with("..."));
    }

    #[test]
    fn host_comes_from_url_authority() {
        assert_eq!(url_host("https://a.example.com/x/y"), "a.example.com");
        assert_eq!(url_host("plain"), "plain");
    }
}
