use super::dataset::{parse_dataset, CancelFlag};
use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use crate::model::Record;
use crate::ui;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Fetches all configured datasets and returns the merged record collection.
///
/// Fetches run concurrently, bounded by `config.concurrent_fetches`. A failed
/// request, non-success status, or malformed body skips that dataset with a
/// warning; partial data is an accepted degraded state, so the overall load
/// still succeeds. With every dataset unreachable the result is simply empty.
///
/// Returns `Ok(None)` when `cancel` was raised while fetches were in flight:
/// the consumer tore down the view, so the stale result is discarded rather
/// than applied.
///
/// # Arguments
///
/// * `client` - HTTP client for making requests
/// * `cancel` - cooperative cancellation flag held by the consumer
/// * `config` - resolved configuration carrying the base URL and dataset names
pub async fn fetch_datasets(
    client: &reqwest::Client,
    cancel: &CancelFlag,
    config: &ResolvedConfig,
) -> AppResult<Option<Vec<Record>>> {
    let total = config.datasets.len();
    let pb = Arc::new(ui::create_progress_bar(total as u64)?);
    let semaphore = Arc::new(Semaphore::new(config.concurrent_fetches.max(1)));
    let client = Arc::new(client.clone());
    let base_url = config.base_url.trim_end_matches('/').to_string();

    info!(datasets = total, base_url = %base_url, "Starting dataset fetch");

    let mut handles: Vec<JoinHandle<Vec<Record>>> = Vec::with_capacity(total);
    for name in &config.datasets {
        let semaphore = semaphore.clone();
        let client = client.clone();
        let pb = pb.clone();
        let url = format!("{base_url}/{name}");
        let name = name.clone();

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => return Vec::new(),
            };
            pb.set_message(format!("Fetching {name}..."));
            let records = match fetch_single_dataset(&client, &url, &name).await {
                Ok(records) => records,
                Err(e) => {
                    // One bad dataset never fails the load.
                    warn!(dataset = %name, error = %e, "Skipping dataset");
                    Vec::new()
                }
            };
            pb.inc(1);
            records
        }));
    }

    let mut records = Vec::new();
    for result in futures::future::join_all(handles).await {
        match result {
            Ok(chunk) => records.extend(chunk),
            Err(e) => warn!(error = %e, "Dataset fetch task failed"),
        }
    }
    pb.finish_with_message(format!("Loaded {} record(s)", records.len()));

    if cancel.is_cancelled() {
        info!("Load cancelled, discarding fetched records");
        return Ok(None);
    }

    info!(records = records.len(), "Dataset fetch completed");
    Ok(Some(records))
}

async fn fetch_single_dataset(
    client: &reqwest::Client,
    url: &str,
    file_name: &str,
) -> AppResult<Vec<Record>> {
    let body = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to fetch {file_name}: {e}")))?
        .error_for_status()
        .map_err(|e| AppError::NetworkError(format!("Failed to fetch {file_name}: {e}")))?
        .text()
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to read {file_name}: {e}")))?;

    parse_dataset(&body, file_name)
}
