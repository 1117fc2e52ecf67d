use crate::constants::YEAR_REGEX_PATTERN;
use crate::errors::AppResult;
use crate::model::{RawRecord, Record};
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Cached regex for extracting the year from a dataset file name.
/// Compiled once at initialization for performance.
static YEAR_REGEX: OnceLock<Regex> = OnceLock::new();

/// Cooperative cancellation flag for an in-flight load.
///
/// The consumer holds one clone and raises it on teardown; the loader checks
/// it before applying results and discards a stale completion instead of
/// surfacing partial data.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Derives the source year from a dataset file name.
///
/// Matches the first four-digit year beginning with "20" (e.g.
/// `pauta_bsas_2023.json` -> 2023). Returns 0 when no year is present,
/// meaning "unknown"; such records stay out of year-based aggregations but
/// remain visible in unfiltered listings.
pub fn year_from_filename(name: &str) -> u16 {
    let regex = YEAR_REGEX.get_or_init(|| {
        Regex::new(YEAR_REGEX_PATTERN).expect("YEAR_REGEX_PATTERN is a valid regex pattern")
    });
    regex
        .captures(name)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Parses one dataset's JSON body into normalized records.
///
/// The body must be a JSON array of record objects. Every record is tagged
/// with the filename-derived year (unless it declares its own `__Año`) and
/// the source file name, then passed through the normalizer once.
pub fn parse_dataset(body: &str, file_name: &str) -> AppResult<Vec<Record>> {
    let raw: Vec<RawRecord> = serde_json::from_str(body)?;
    let year = year_from_filename(file_name);
    Ok(raw
        .into_iter()
        .map(|r| Record::from_raw(r, year, file_name))
        .collect())
}
