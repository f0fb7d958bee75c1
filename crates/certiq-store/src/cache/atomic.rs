//! Atomic write primitives
//!
//! Uses temp→rename so readers never see a partial entry.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::{io_error, Result};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Atomically write bytes to a file, creating the parent directory on demand
pub async fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error("create_cache_dir", e))?;
    }

    let temp_path = temp_path_for(target_path);

    if let Err(e) = tokio::fs::write(&temp_path, content).await {
        return Err(io_error("write_cache_temp", e));
    }

    if let Err(e) = tokio::fs::rename(&temp_path, target_path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(io_error("rename_cache_temp", e));
    }

    Ok(())
}

// Unique per writer so concurrent writes of one entry cannot clobber each other's temp file
fn temp_path_for(target_path: &Path) -> PathBuf {
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut name = target_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}-{}.tmp", std::process::id(), seq));
    target_path.with_file_name(name)
}
