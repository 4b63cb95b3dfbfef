// src/agents/query_generator.rs
use tracing::{info, warn};

use crate::llm::{ChatBackend, ChatMessage, ChatRequest, RateLimiter};

const QUERY_MAX_TOKENS: u32 = 150;
const QUERY_TEMPERATURE: f32 = 0.1;
const QUERY_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFlavor {
    Linkedin,
    Web,
    Generic,
}

impl QueryFlavor {
    fn prompt(self, input: &str) -> String {
        let lead = match self {
            QueryFlavor::Linkedin => "Generate 2 queries to find LinkedIn profiles relevant to: ",
            QueryFlavor::Web => "Generate 2 web search queries relevant to: ",
            QueryFlavor::Generic => "Generate 2 search queries relevant to: ",
        };
        format!("{lead}{input}. Keep them concise. Return JSON array of strings.")
    }

    pub fn fallback(self, input: &str) -> Vec<String> {
        match self {
            QueryFlavor::Linkedin => vec![
                format!("{input} LinkedIn"),
                format!("{input} professional profile"),
            ],
            QueryFlavor::Web | QueryFlavor::Generic => {
                vec![input.to_string(), format!("{input} information")]
            }
        }
    }
}

/// Ask the model for two concise search queries, falling back to templated ones
pub async fn generate_queries(
    backend: &dyn ChatBackend,
    limiter: &RateLimiter,
    model: &str,
    input: &str,
    flavor: QueryFlavor,
) -> Vec<String> {
    limiter.wait().await;

    let request = ChatRequest::new(
        model,
        vec![ChatMessage::user(flavor.prompt(input))],
        QUERY_MAX_TOKENS,
        QUERY_TEMPERATURE,
    );

    match backend.complete(request).await {
        Ok(content) => match parse_query_list(&content) {
            Some(queries) => {
                info!("Generated {} search queries", queries.len());
                queries
            }
            None => {
                warn!("Query generation reply was not a JSON array, using fallback queries");
                flavor.fallback(input)
            }
        },
        Err(e) => {
            warn!("API failed, using fallback queries: {:#}", e);
            flavor.fallback(input)
        }
    }
}

fn parse_query_list(content: &str) -> Option<Vec<String>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content.trim()).ok()?;
    let queries: Vec<String> = values
        .into_iter()
        .take(QUERY_COUNT)
        .map(|value| match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .collect();
    (!queries.is_empty()).then_some(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct Canned {
        reply: Result<String, String>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    #[async_trait]
    impl ChatBackend for Canned {
        async fn complete(&self, request: ChatRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone().map_err(|e| anyhow!(e))
        }
    }

    fn canned(reply: Result<&str, &str>) -> Canned {
        Canned {
            reply: reply.map(str::to_string).map_err(str::to_string),
            seen: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn json_array_is_cut_to_two_queries() {
        let backend = canned(Ok(r#"["a", "b", "c"]"#));
        let limiter = RateLimiter::new(Duration::ZERO);

        let queries = generate_queries(
            &backend,
            &limiter,
            "compound-beta",
            "rust jobs",
            QueryFlavor::Web,
        )
        .await;
        assert_eq!(queries, vec!["a", "b"]);

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].max_tokens, 150);
        assert!(seen[0]
            .last_user_content()
            .starts_with("Generate 2 web search queries relevant to: rust jobs."));
    }

    #[tokio::test]
    async fn prose_reply_uses_linkedin_fallback() {
        let backend = canned(Ok("Here are some queries: ..."));
        let limiter = RateLimiter::new(Duration::ZERO);

        let queries = generate_queries(
            &backend,
            &limiter,
            "m",
            "nurses in Lyon",
            QueryFlavor::Linkedin,
        )
        .await;
        assert_eq!(
            queries,
            vec!["nurses in Lyon LinkedIn", "nurses in Lyon professional profile"]
        );
    }

    #[tokio::test]
    async fn backend_error_uses_generic_fallback() {
        let backend = canned(Err("503"));
        let limiter = RateLimiter::new(Duration::ZERO);

        let queries =
            generate_queries(&backend, &limiter, "m", "widgets", QueryFlavor::Generic).await;
        assert_eq!(queries, vec!["widgets", "widgets information"]);
    }
}
