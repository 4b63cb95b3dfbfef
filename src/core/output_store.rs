// src/core/output_store.rs
//! Artifact persistence under the output directory.
//!
//! Every save is best effort: failures are logged and reported as `None`
//! so that a full disk never aborts a run that already paid for LLM calls.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::core::config_manager::OUTPUT_SUBDIRS;
use crate::core::FsOps;
use crate::data::DataTable;
use crate::types::SearchResult;

#[derive(Debug, Clone)]
pub struct OutputStore {
    base: PathBuf,
}

#[derive(Serialize)]
struct RawDump<'a, T: Serialize> {
    query: &'a str,
    timestamp: String,
    source: &'a str,
    data_count: usize,
    data: &'a [T],
}

#[derive(Serialize)]
struct SearchDump<'a> {
    query: &'a str,
    timestamp: String,
    source: &'static str,
    results_count: usize,
    results: &'a [SearchResult],
}

#[derive(Serialize)]
struct EnrichedDump<'a> {
    url: &'a str,
    timestamp: String,
    source: &'static str,
    data: &'a serde_json::Value,
}

impl OutputStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// `raw_data/<source>/<source>_<ts>_<hash>.json`
    pub async fn save_raw<T: Serialize>(
        &self,
        data: &[T],
        source: &str,
        query: &str,
    ) -> Option<PathBuf> {
        let path = self.base.join("raw_data").join(source).join(format!(
            "{}_{}_{}.json",
            source,
            FsOps::file_timestamp(),
            FsOps::query_hash(query)
        ));
        let dump = RawDump {
            query,
            timestamp: now_iso(),
            source,
            data_count: data.len(),
            data,
        };
        self.finish("raw data", &path, FsOps::write_json_pretty(&path, &dump).await)
    }

    /// `cleaned_data/cleaned_<ts>_<hash>.csv`
    pub async fn save_cleaned(&self, table: &DataTable, query: &str) -> Option<PathBuf> {
        let path = self.base.join("cleaned_data").join(format!(
            "cleaned_{}_{}.csv",
            FsOps::file_timestamp(),
            FsOps::query_hash(query)
        ));
        let outcome = match table.to_csv_string() {
            Ok(csv) => FsOps::write_file_safe(&path, &csv).await,
            Err(e) => Err(e),
        };
        self.finish("cleaned data", &path, outcome)
    }

    /// `reports/report_<ts>_<hash>.md`
    pub async fn save_report(&self, report: &str, query: &str) -> Option<PathBuf> {
        let path = self.base.join("reports").join(format!(
            "report_{}_{}.md",
            FsOps::file_timestamp(),
            FsOps::query_hash(query)
        ));
        self.finish("report", &path, FsOps::write_file_safe(&path, report).await)
    }

    /// Verbatim LLM search reply, kept for traceability
    pub async fn save_search_raw(&self, query: &str, content: &str) -> Option<PathBuf> {
        let path = self.compound_dir().join(format!(
            "compound_beta_{}_{}_raw.txt",
            FsOps::file_timestamp(),
            FsOps::query_hash(query)
        ));
        self.finish("raw search reply", &path, FsOps::write_file_safe(&path, content).await)
    }

    pub async fn save_search_results(
        &self,
        query: &str,
        results: &[SearchResult],
    ) -> Option<PathBuf> {
        let path = self.compound_dir().join(format!(
            "compound_beta_{}_{}.json",
            FsOps::file_timestamp(),
            FsOps::query_hash(query)
        ));
        let dump = SearchDump {
            query,
            timestamp: now_iso(),
            source: "compound_beta",
            results_count: results.len(),
            results,
        };
        self.finish("search results", &path, FsOps::write_json_pretty(&path, &dump).await)
    }

    pub async fn save_enriched(&self, url: &str, data: &serde_json::Value) -> Option<PathBuf> {
        let path = self
            .base
            .join("raw_data")
            .join("compound_beta_enriched")
            .join(format!(
                "enriched_{}_{}.json",
                FsOps::file_timestamp(),
                FsOps::query_hash(url)
            ));
        let dump = EnrichedDump {
            url,
            timestamp: now_iso(),
            source: "compound_beta_enriched",
            data,
        };
        self.finish("enriched metadata", &path, FsOps::write_json_pretty(&path, &dump).await)
    }

    /// Create every artifact directory up front
    pub async fn ensure_tree(&self) -> Result<()> {
        for sub in OUTPUT_SUBDIRS {
            FsOps::ensure_dir_exists(&self.base.join(sub)).await?;
        }
        Ok(())
    }

    /// `logs/tasks_<ts>_<hash>.log`, the tracker's plain-text export
    pub async fn save_task_log(&self, log: &str, query: &str) -> Option<PathBuf> {
        let path = self.base.join("logs").join(format!(
            "tasks_{}_{}.log",
            FsOps::file_timestamp(),
            FsOps::query_hash(query)
        ));
        self.finish("task log", &path, FsOps::write_file_safe(&path, log).await)
    }

    fn compound_dir(&self) -> PathBuf {
        self.base.join("raw_data").join("compound_beta")
    }

    fn finish(&self, what: &str, path: &Path, outcome: Result<()>) -> Option<PathBuf> {
        match outcome {
            Ok(()) => {
                info!("Saved {} to: {}", what, path.display());
                Some(path.to_path_buf())
            }
            Err(e) => {
                error!("Error saving {}: {:#}", what, e);
                None
            }
        }
    }
}

fn now_iso() -> String {
    chrono::Local::now().to_rfc3339()
}
