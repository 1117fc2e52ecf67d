use crate::normalizer::{canon_month, normalize};
use serde::{Deserialize, Deserializer};

/// One allocation line item as it appears in the exported JSON datasets.
///
/// Field names mirror the export headers. `Importe` tolerates numbers,
/// numeric strings, and garbage (treated as zero); `__Año` is an optional
/// per-record year override that wins over the filename-derived year.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Proveedor", default)]
    pub provider: String,
    #[serde(rename = "Medio", default)]
    pub outlet: String,
    #[serde(rename = "Mes", default)]
    pub month: String,
    #[serde(rename = "Resolución", default)]
    pub resolution: String,
    #[serde(rename = "Importe", default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(rename = "__Año", default)]
    pub year_override: Option<u16>,
}

/// One normalized allocation record, immutable after ingestion.
///
/// The `norm_*` fields and `canon_month` are precomputed once so that the
/// search and grouping pipeline never re-normalizes per comparison.
#[derive(Debug, Clone)]
pub struct Record {
    pub provider: String,
    pub outlet: String,
    pub month: String,
    pub resolution: String,
    pub amount: f64,
    /// Source year; 0 means the year could not be derived.
    pub year: u16,
    /// Name of the originating dataset file, provenance only.
    pub source: String,
    pub norm_outlet: String,
    pub norm_provider: String,
    pub norm_resolution: String,
    pub canon_month: String,
}

impl Record {
    /// Builds a normalized record from a raw dataset element.
    ///
    /// `file_year` is the year derived from the dataset file name; a record's
    /// own `__Año` takes precedence when present.
    pub fn from_raw(raw: RawRecord, file_year: u16, source: &str) -> Self {
        let year = raw.year_override.unwrap_or(file_year);
        let norm_outlet = normalize(&raw.outlet);
        let norm_provider = normalize(&raw.provider);
        let norm_resolution = normalize(&raw.resolution);
        let canon_month = canon_month(&raw.month);
        Self {
            provider: raw.provider,
            outlet: raw.outlet,
            month: raw.month,
            resolution: raw.resolution,
            amount: raw.amount,
            year,
            source: source.to_string(),
            norm_outlet,
            norm_provider,
            norm_resolution,
            canon_month,
        }
    }

    /// Grouping name for rollups: outlet, falling back to provider.
    /// Returns `None` when both are blank.
    pub fn group_name(&self) -> Option<&str> {
        let outlet = self.outlet.trim();
        if !outlet.is_empty() {
            return Some(outlet);
        }
        let provider = self.provider.trim();
        if !provider.is_empty() {
            return Some(provider);
        }
        None
    }
}

/// Accepts `Importe` as a JSON number, a numeric string (comma or dot decimal
/// separator), or anything else, which degrades to 0.0 rather than failing
/// the whole dataset.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value))
}

fn amount_from_value(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().replace(',', ".").parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
