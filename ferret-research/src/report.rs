use std::path::Path;

use crate::ResearchError;

/// Writes the report as a Markdown file, creating parent directories.
pub async fn save_report(path: impl AsRef<Path>, report: &str) -> Result<(), ResearchError> {
    let path = path.as_ref();
    let io_error = |source| ResearchError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, report).await.map_err(io_error)?;
    tracing::info!(path = %path.display(), "report saved");
    Ok(())
}
