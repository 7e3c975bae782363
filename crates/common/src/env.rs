//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists, creating it when missing.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_err() {
        warn!(%data_dir, "data directory not found; creating it");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    let meta = tokio::fs::metadata(data_dir).await?;
    if meta.permissions().readonly() {
        anyhow::bail!("data directory {data_dir} is read-only");
    }
    info!(%data_dir, "data directory ready");
    Ok(())
}

/// Join a resource file name onto the data directory.
pub fn data_file(data_dir: &str, file_name: &str) -> std::path::PathBuf {
    Path::new(data_dir).join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_nested_dir() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let nested = tmp.path().join("a/b/data");
        let nested = nested.to_string_lossy().to_string();
        ensure_data_dir(&nested).await?;
        assert!(tokio::fs::metadata(&nested).await?.is_dir());
        Ok(())
    }

    #[test]
    fn data_file_joins() {
        assert_eq!(data_file("data", "users.json"), Path::new("data/users.json"));
    }
}
