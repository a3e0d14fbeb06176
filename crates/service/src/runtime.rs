//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Check the frontend directory (warn) and the employee data file (fatal) before startup.
pub async fn ensure_env(frontend_dir: &str, data_file: &str) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir, data_file).await
}
