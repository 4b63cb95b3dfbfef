// src/core/fs_ops.rs
//! File system helpers shared by the persistence layer

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            debug!("Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Write a file, creating its parent directory first
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("Written file: {}", path.display());
        Ok(())
    }

    pub async fn write_json_pretty<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
        let content =
            serde_json::to_string_pretty(value).context("Failed to serialize JSON payload")?;
        Self::write_file_safe(path, &content).await
    }

    /// Short stable hash used in artifact file names
    pub fn query_hash(query: &str) -> String {
        let digest = Sha256::digest(query.as_bytes());
        digest
            .iter()
            .take(4)
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Timestamp fragment used in artifact file names
    pub fn file_timestamp() -> String {
        chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
    }

    pub fn slugify(name: &str) -> String {
        let slug = name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect::<String>();
        let slug = slug
            .split('_')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        if slug.is_empty() {
            "unknown".to_string()
        } else {
            slug
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_hash_is_eight_hex_chars_and_stable() {
        let a = FsOps::query_hash("rust developers in berlin");
        let b = FsOps::query_hash("rust developers in berlin");
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, FsOps::query_hash("something else"));
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(FsOps::slugify("  Jane  Q. Doe "), "jane_q_doe");
        assert_eq!(FsOps::slugify("!!!"), "unknown");
    }

    #[tokio::test]
    async fn write_file_safe_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.txt");
        FsOps::write_file_safe(&path, "hello").await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }
}
