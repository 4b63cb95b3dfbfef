// tests/pipeline_tests.rs
use anyhow::Result;
use async_trait::async_trait;
use prospector::core::config_manager::LlmConfig;
use prospector::core::OutputStore;
use prospector::linkedin::ProfileSource;
use prospector::llm::{ChatBackend, ChatRequest};
use prospector::types::{RecordSource, ScrapedRecord};
use prospector::workflow::{Console, Workflow};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

const SEARCH_REPLY: &str = "Answer: Several senior Rust engineers are based in Berlin.\n\
    Sources:\n\
    • https://rust-berlin.example.org/meetup\n\
    LinkedIn Profiles (if found):\n\
    • https://www.linkedin.com/in/jane-doe\n\
    \n\
    RESULTS_JSON\n\
    {\"results\": [\
    {\"title\": \"Jane Doe\", \"url\": \"https://www.linkedin.com/in/jane-doe\", \"snippet\": \"Senior Rust Engineer\"},\
    {\"title\": \"Rust Berlin\", \"url\": \"https://rust-berlin.example.org/meetup\", \"snippet\": \"Monthly meetup\"}\
    ]}";

const ANALYSIS_REPLY: &str = r#"{"key_insights": ["Senior talent concentrates in Berlin"], "trends": ["Async Rust adoption"], "recommendations": ["Reach out through the meetup"]}"#;

/// Answers by prompt shape, the way the live model is addressed
struct ScriptedModel {
    calls: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == prefix)
            .count()
    }
}

#[async_trait]
impl ChatBackend for ScriptedModel {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let user = request.last_user_content().to_string();
        let is_search = request
            .messages
            .first()
            .map(|m| m.role == "system" && m.content.contains("web search assistant"))
            .unwrap_or(false);

        let (kind, reply) = if is_search {
            ("search", SEARCH_REPLY.to_string())
        } else if user.starts_with("Generate 2") {
            ("queries", r#"["rust engineers berlin", "senior rust developer"]"#.to_string())
        } else if user.starts_with("Given this URL") {
            (
                "enrich",
                r#"{"title": "Rust Berlin Meetup", "summary": "Community meetup for Rust developers"}"#
                    .to_string(),
            )
        } else {
            ("analysis", ANALYSIS_REPLY.to_string())
        };
        self.calls.lock().unwrap().push(kind.to_string());
        Ok(reply)
    }
}

struct StubProfiles {
    requested: Mutex<Vec<String>>,
}

#[async_trait]
impl ProfileSource for StubProfiles {
    async fn scrape_profiles(&self, urls: &[String]) -> Result<Vec<ScrapedRecord>> {
        self.requested.lock().unwrap().extend(urls.iter().cloned());
        Ok(urls
            .iter()
            .map(|url| ScrapedRecord {
                headline: "Senior Rust Engineer".to_string(),
                location: "Berlin, Germany".to_string(),
                skills: vec!["Rust".to_string(), "Tokio".to_string()],
                source: RecordSource::LinkedIn,
                ..ScrapedRecord::web_source(url, "Jane Doe", "Builds async services")
            })
            .collect())
    }
}

fn fast_llm() -> LlmConfig {
    LlmConfig {
        api_key: Some("test".to_string()),
        base_url: "http://localhost".to_string(),
        search_model: "compound-beta".to_string(),
        analysis_model: "analysis".to_string(),
        rate_limit_delay: Duration::ZERO,
        max_retries: 1,
        retry_delay: Duration::ZERO,
        query_delay: Duration::ZERO,
        timeout: Duration::from_secs(5),
    }
}

fn files_in(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn linkedin_request_runs_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::new());
    let profiles = Arc::new(StubProfiles {
        requested: Mutex::new(Vec::new()),
    });

    let mut workflow = Workflow::with_backends(
        model.clone(),
        profiles.clone(),
        OutputStore::new(tmp.path()),
        &fast_llm(),
        Console::new(true, false),
    );

    let results = workflow
        .execute("Find LinkedIn profiles of senior Rust engineers in Berlin", None)
        .await
        .unwrap();

    assert_eq!(results.workflow_status, "completed");
    assert_eq!(results.scraped_data_count, 2);
    assert_eq!(results.cleaned_data_count, 2);
    assert!(results.report_generated);

    // Profiles came from the first pass, so no site: retry was needed
    assert_eq!(
        *profiles.requested.lock().unwrap(),
        vec!["https://www.linkedin.com/in/jane-doe"]
    );
    assert_eq!(model.count("queries"), 1);
    assert_eq!(model.count("search"), 2);
    assert_eq!(model.count("enrich"), 1);
    assert_eq!(model.count("analysis"), 1);

    let report = results.final_report.unwrap();
    assert!(report.contains("# Research Report"));
    assert!(report.contains("Several senior Rust engineers are based in Berlin."));
    assert!(report.contains("## 3A. Core Data – LinkedIn Profiles"));
    assert!(report.contains("| Jane Doe | Senior Rust Engineer | Berlin, Germany | LinkedIn |"));
    assert!(report.contains("## 3B. Core Data – Web Sources"));
    assert!(report.contains("Rust Berlin Meetup"));
    assert!(report.contains("- https://rust-berlin.example.org/meetup"));
    assert!(results.final_report_preview.unwrap().ends_with("..."));

    assert_eq!(files_in(&tmp.path().join("raw_data/linkedin")).len(), 1);
    assert_eq!(files_in(&tmp.path().join("raw_data/compound_beta_enriched")).len(), 1);
    assert_eq!(files_in(&tmp.path().join("cleaned_data")).len(), 1);
    assert_eq!(files_in(&tmp.path().join("reports")).len(), 1);
    assert!(files_in(&tmp.path().join("logs"))
        .iter()
        .any(|f| f.starts_with("tasks_")));
    assert!(results.artifacts.iter().all(|p| p.exists()));

    let summary = workflow.tracker().summary();
    assert_eq!(summary.total_tasks, 3);
    assert_eq!(summary.completed_tasks, 3);
    assert_eq!(summary.failed_tasks, 0);
}

#[tokio::test]
async fn fact_question_without_sources_yields_answer_row() {
    struct AnswerOnly;

    #[async_trait]
    impl ChatBackend for AnswerOnly {
        async fn complete(&self, request: ChatRequest) -> Result<String> {
            if request.last_user_content().starts_with("Generate 2") {
                return Ok("not json".to_string());
            }
            Ok("Answer: The average salary is 85k EUR.".to_string())
        }
    }

    let tmp = TempDir::new().unwrap();
    let mut workflow = Workflow::with_backends(
        Arc::new(AnswerOnly),
        Arc::new(StubProfiles {
            requested: Mutex::new(Vec::new()),
        }),
        OutputStore::new(tmp.path()),
        &fast_llm(),
        Console::new(true, false),
    );

    let results = workflow
        .execute("What is the average salary of a Rust developer?", Some(3))
        .await
        .unwrap();

    // Nothing linkable came back, only the synthesized answer row
    assert_eq!(results.scraped_data_count, 0);
    assert_eq!(results.cleaned_data_count, 1);
    let report = results.final_report.unwrap();
    assert!(report.contains("The average salary is 85k EUR."));
    assert!(report.contains("| Web Answer |"));
    assert!(!report.contains("3A."));
}

#[tokio::test]
async fn empty_results_produce_no_data_report() {
    struct Silent;

    #[async_trait]
    impl ChatBackend for Silent {
        async fn complete(&self, _request: ChatRequest) -> Result<String> {
            anyhow::bail!("service unavailable")
        }
    }

    let tmp = TempDir::new().unwrap();
    let mut workflow = Workflow::with_backends(
        Arc::new(Silent),
        Arc::new(StubProfiles {
            requested: Mutex::new(Vec::new()),
        }),
        OutputStore::new(tmp.path()),
        &fast_llm(),
        Console::new(true, false),
    );

    let results = workflow.execute("tell me something", Some(2)).await.unwrap();

    assert_eq!(results.scraped_data_count, 0);
    assert_eq!(results.cleaned_data_count, 0);
    assert!(results.report_generated);
    assert_eq!(
        results.final_report.as_deref(),
        Some("# No Data Report\n\nNo data was available for analysis.")
    );
    assert!(files_in(&tmp.path().join("reports")).is_empty());
    assert!(files_in(&tmp.path().join("cleaned_data")).is_empty());
}
