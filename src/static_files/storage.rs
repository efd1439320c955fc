use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{error, info, warn};

use crate::config::StaticConfig;

/// Summary of the storage root taken at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageReport {
    pub files: usize,
    pub bytes_used: u64,
    pub has_index: bool,
}

/// Walks the storage root and counts regular files and their total size.
///
/// Fails when the root is missing or is not a directory.
pub async fn inspect(cfg: &StaticConfig) -> anyhow::Result<StorageReport> {
    let meta = tokio::fs::metadata(&cfg.root)
        .await
        .with_context(|| format!("storage root {} is not accessible", cfg.root.display()))?;
    if !meta.is_dir() {
        anyhow::bail!("storage root {} is not a directory", cfg.root.display());
    }

    let mut files = 0;
    let mut bytes_used = 0;
    let mut pending: Vec<PathBuf> = vec![cfg.root.clone()];

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .with_context(|| format!("failed to list {}", dir.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if meta.is_dir() {
                pending.push(entry.path());
            } else if meta.is_file() {
                files += 1;
                bytes_used += meta.len();
            }
        }
    }

    let has_index = is_file(&cfg.fallback_path()).await;

    Ok(StorageReport {
        files,
        bytes_used,
        has_index,
    })
}

/// Logs the storage state and decides whether the server may start.
///
/// An unusable root only stops startup when `require_storage` is set;
/// otherwise the server runs and every request ends in a 404.
pub async fn check(cfg: &StaticConfig) -> anyhow::Result<()> {
    match inspect(cfg).await {
        Ok(report) => {
            info!(
                root = %cfg.root.display(),
                files = report.files,
                used = report.bytes_used,
                "Storage ready"
            );
            if !report.has_index {
                warn!(
                    path = %cfg.fallback_path().display(),
                    "Root document missing, unknown paths will get 404"
                );
            }
            Ok(())
        }
        Err(e) if cfg.require_storage => Err(e),
        Err(e) => {
            error!(error = %e, "Storage init failed, serving anyway");
            Ok(())
        }
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
