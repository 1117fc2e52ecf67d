use super::dataset::parse_dataset;
use crate::errors::{AppError, AppResult};
use crate::model::Record;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Finds dataset JSON files under a directory, sorted by path for a
/// deterministic load order.
pub fn find_dataset_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AppError::InvalidInput(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Loads every dataset JSON file found under `dir` into one flat record
/// collection.
///
/// Same tolerance semantics as the HTTP fetcher: an unreadable or malformed
/// file is skipped with a warning and the load succeeds with whatever parsed.
/// Year tagging comes from each file's name.
pub async fn load_dir(dir: &Path) -> AppResult<Vec<Record>> {
    let files = find_dataset_files(dir)?;
    debug!(dir = %dir.display(), files = files.len(), "Loading local datasets");

    let mut records = Vec::new();
    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping unreadable dataset");
                continue;
            }
        };
        match parse_dataset(&body, &file_name) {
            Ok(chunk) => records.extend(chunk),
            Err(e) => warn!(file = %path.display(), error = %e, "Skipping malformed dataset"),
        }
    }
    Ok(records)
}
