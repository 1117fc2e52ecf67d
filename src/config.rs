use crate::constants::{DEFAULT_BASE_URL, DEFAULT_DATASETS, TOP_N};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved configuration with all values filled in (no Options).
///
/// This struct represents the pipeline defaults and can be deserialized by
/// the TOML loader. All fields have concrete values, making it safe to access
/// directly without unwrapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Base URL the per-year dataset files are fetched from.
    pub base_url: String,
    /// Dataset file names, one per year; the year is derived from the name.
    pub datasets: Vec<String>,
    /// Optional local directory of dataset files, used instead of fetching.
    pub data_dir: Option<PathBuf>,
    /// Number of concurrent dataset fetches.
    pub concurrent_fetches: usize,
    /// Number of outlets in the ranked listing.
    pub top_n: usize,
    /// Base URL used when building shareable deep links.
    pub share_base_url: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            datasets: DEFAULT_DATASETS.iter().map(|s| s.to_string()).collect(),
            data_dir: None,
            concurrent_fetches: 3,
            top_n: TOP_N,
            share_base_url: "https://pautapba.com.ar/".to_string(),
        }
    }
}

/// Configuration that can be loaded from a TOML file.
///
/// Deserializes the run parameters (year scope, query) plus the flattened
/// pipeline configuration. The parser rejects unknown keys to catch typos,
/// and validates that the numeric knobs are positive and that at least one
/// dataset is configured.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedConfigFile {
    /// Year scope: `"all"` or a year like `"2023"`
    #[serde(default = "default_year")]
    pub year: String,
    /// Free-text search query applied to the detail listing
    #[serde(default)]
    pub query: String,
    /// Flattened resolved configuration with pipeline defaults
    #[serde(flatten)]
    pub resolved: ResolvedConfig,
}

impl ResolvedConfigFile {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed, unknown keys are
    /// present, no datasets are configured, or concurrent_fetches/top_n are
    /// not positive.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfigFile = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        if config.resolved.datasets.is_empty() {
            return Err(AppError::InvalidInput(
                "At least one dataset must be configured".into(),
            ));
        }
        if config.resolved.concurrent_fetches == 0 {
            return Err(AppError::InvalidInput(
                "Concurrent fetches must be greater than 0".into(),
            ));
        }
        if config.resolved.top_n == 0 {
            return Err(AppError::InvalidInput(
                "Top-N size must be greater than 0".into(),
            ));
        }

        Ok(config)
    }
}

fn default_year() -> String {
    "all".to_string()
}
