// src/agents/web_search.rs
//! Web search through the LLM's browsing model.
//!
//! The model answers in a loose sectioned layout; each reply is persisted
//! verbatim, merged into the running [`SearchContext`] and turned into
//! [`SearchResult`]s by the most structured form it offers.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::response_parser::{self, SearchSections};
use crate::core::config_manager::LlmConfig;
use crate::core::OutputStore;
use crate::llm::{ChatBackend, ChatMessage, ChatRequest, RateLimiter};
use crate::types::{SearchContext, SearchResult};

const SEARCH_MAX_TOKENS: u32 = 900;
const SEARCH_TEMPERATURE: f32 = 0.2;
const ANSWER_SNIPPET_CHARS: usize = 160;

const SEARCH_SYSTEM_PROMPT: &str = "You are a comprehensive web search assistant.

Response requirements:
Perform a thorough web search to find the most relevant and up-to-date information.
Include a \"Sources\" section with at least two reputable URLs.
Look for LinkedIn profile URLs and include them in a separate \"LinkedIn Profiles\" section if found.
Format your response clearly with proper sections and structure.

Response Format:
Answer: [Detailed answer based on reputable sources]
Sources:
• [Reputable URL 1]
• [Optional additional reputable URL]
LinkedIn Profiles (if found):
• [LinkedIn profile URL 1]

Additionally, at the end of your response, include a machine-readable JSON block labeled 'RESULTS_JSON'
that contains: {\"results\": [{\"title\": str, \"url\": str, \"snippet\": str} ...]}.
Ensure the JSON is valid and includes 2-5 high-quality results with meaningful snippets.";

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub model: String,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub query_delay: Duration,
}

impl From<&LlmConfig> for SearchSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.search_model.clone(),
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
            query_delay: config.query_delay,
        }
    }
}

pub struct WebSearcher {
    backend: Arc<dyn ChatBackend>,
    limiter: Arc<RateLimiter>,
    store: OutputStore,
    settings: SearchSettings,
}

impl WebSearcher {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        limiter: Arc<RateLimiter>,
        store: OutputStore,
        settings: SearchSettings,
    ) -> Self {
        Self {
            backend,
            limiter,
            store,
            settings,
        }
    }

    /// Run every query in turn and return the URL-deduplicated union
    pub async fn search(
        &self,
        queries: &[String],
        max_results: usize,
        context: &mut SearchContext,
    ) -> Vec<SearchResult> {
        if queries.is_empty() {
            return placeholder("fallback");
        }
        info!("Executing web searches for {} queries", queries.len());

        let per_query = max_results / queries.len();
        let mut all_results = Vec::new();

        for (i, query) in queries.iter().enumerate() {
            info!("Searching query {}/{}: {}", i + 1, queries.len(), query);

            let mut results = self.search_with_retry(query, per_query, context).await;
            if results.is_empty() {
                results = placeholder(query);
            }
            self.store.save_search_results(query, &results).await;
            all_results.extend(results);

            if i + 1 < queries.len() {
                tokio::time::sleep(self.settings.query_delay).await;
            }
        }

        let unique = dedup_by_url(all_results);
        info!("Web search completed. Found {} results", unique.len());
        unique
    }

    async fn search_with_retry(
        &self,
        query: &str,
        limit: usize,
        context: &mut SearchContext,
    ) -> Vec<SearchResult> {
        for attempt in 1..=self.settings.max_retries {
            self.limiter.wait().await;

            let request = ChatRequest::new(
                &self.settings.model,
                vec![
                    ChatMessage::system(SEARCH_SYSTEM_PROMPT),
                    ChatMessage::user(query),
                ],
                SEARCH_MAX_TOKENS,
                SEARCH_TEMPERATURE,
            );

            match self.backend.complete(request).await {
                Ok(content) => {
                    self.store.save_search_raw(query, &content).await;
                    let sections = response_parser::parse_sections(&content);
                    context.merge(
                        &sections.answer,
                        &sections.sources,
                        &sections.linkedin_profiles,
                    );
                    return results_from_reply(&content, &sections, limit);
                }
                Err(e) => {
                    warn!("Web search attempt {} failed: {:#}", attempt, e);
                    if attempt < self.settings.max_retries {
                        tokio::time::sleep(self.settings.retry_delay).await;
                    }
                }
            }
        }
        Vec::new()
    }
}

/// Pick the most structured result form present in one reply
pub fn results_from_reply(
    content: &str,
    sections: &SearchSections,
    limit: usize,
) -> Vec<SearchResult> {
    let json_cap = if limit == 0 { 5 } else { limit };
    let list_cap = if limit == 0 { 3 } else { limit };

    let mut results: Vec<SearchResult> = response_parser::extract_results_json(content)
        .into_iter()
        .take(json_cap)
        .map(|item| {
            let title = if item.title.is_empty() {
                item.url.clone()
            } else {
                item.title
            };
            SearchResult::web(title, item.url, item.snippet, 0.7)
        })
        .collect();

    if results.is_empty() {
        let snippet: String = sections.answer.chars().take(ANSWER_SNIPPET_CHARS).collect();
        results.extend(
            sections
                .sources
                .iter()
                .take(list_cap)
                .map(|u| SearchResult::web(u.as_str(), u.as_str(), snippet.as_str(), 0.6)),
        );
        results.extend(
            sections
                .linkedin_profiles
                .iter()
                .take(list_cap)
                .map(|u| SearchResult::web(u.as_str(), u.as_str(), "LinkedIn profile", 0.7)),
        );
    }

    results.retain(|r| !r.url.is_empty());
    if !results.is_empty() {
        return results;
    }

    response_parser::extract_urls(content, 3)
        .into_iter()
        .map(|u| SearchResult::web(u.as_str(), u.as_str(), "", 0.3))
        .collect()
}

pub fn placeholder(query: &str) -> Vec<SearchResult> {
    vec![SearchResult {
        title: format!("Search result for: {}", query),
        url: String::new(),
        snippet: format!("Search result for {}", query),
        source: "search".to_string(),
        relevance_score: 0.3,
    }]
}

/// First occurrence of each URL wins; URL-less entries are all kept
pub fn dedup_by_url(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| r.url.is_empty() || seen.insert(r.url.clone()))
        .collect()
}
