//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the directory is loaded.

use std::path::Path;

use tracing::warn;

/// Check the files the service needs before it starts serving.
///
/// A missing frontend directory only means static assets will 404, so it is a warning.
/// A missing data file is fatal: the directory cannot be loaded without it.
pub async fn ensure_env(frontend_dir: &str, data_file: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
    }
    let meta = tokio::fs::metadata(data_file)
        .await
        .map_err(|e| anyhow::anyhow!("employee data file {data_file} is not readable: {e}"))?;
    if !meta.is_file() {
        anyhow::bail!("employee data file {} is not a regular file", Path::new(data_file).display());
    }
    Ok(())
}
