use crate::constants::{MONTHS_DESC, OUTLET_PLACEHOLDER};
use crate::model::Record;
use crate::normalizer::{first_letter_of, label_month, normalize};
use crate::pipeline::YearFilter;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Summed amount for one source year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearTotal {
    pub year: u16,
    pub total: f64,
}

/// Summed amount for one canonical month, with a display label.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub month: String,
    pub total: f64,
}

/// Per-outlet rollup: yearly sub-totals plus a grand total.
///
/// Sub-totals are keyed by year rather than pinned to a fixed set of fields,
/// so a new dataset year extends the rollup without a shape change.
#[derive(Debug, Clone, PartialEq)]
pub struct OutletRollup {
    pub outlet: String,
    pub by_year: BTreeMap<u16, f64>,
    pub total: f64,
}

impl OutletRollup {
    /// Sub-total for one year, zero when the outlet had no allocations then.
    pub fn year_total(&self, year: u16) -> f64 {
        self.by_year.get(&year).copied().unwrap_or(0.0)
    }
}

/// One card of the alphabetical index: a rollup plus the ranking criterion
/// active under the current year filter.
#[derive(Debug, Clone, PartialEq)]
pub struct AzCard {
    pub rollup: OutletRollup,
    pub criterion: f64,
}

/// Distinct non-zero source years, ascending.
pub fn available_years(records: &[Record]) -> Vec<u16> {
    let years: BTreeSet<u16> = records.iter().map(|r| r.year).filter(|y| *y > 0).collect();
    years.into_iter().collect()
}

/// Total amount per year, excluding records with an unknown year (0),
/// sorted ascending by year.
pub fn totals_by_year(records: &[Record]) -> Vec<YearTotal> {
    let mut sums: BTreeMap<u16, f64> = BTreeMap::new();
    for r in records {
        if r.year > 0 {
            *sums.entry(r.year).or_insert(0.0) += r.amount;
        }
    }
    sums.into_iter()
        .map(|(year, total)| YearTotal { year, total })
        .collect()
}

/// Total amount per canonical month across all years, reported in the fixed
/// December-to-January order with zero-filled months.
///
/// Records whose month never canonicalized (free text that matched no month)
/// are not reported; they still count in year and outlet totals.
pub fn totals_by_month(records: &[Record]) -> Vec<MonthTotal> {
    totals_by_month_filtered(records, None)
}

/// Same as [`totals_by_month`], restricted to one source year.
pub fn totals_by_month_of_year(records: &[Record], year: u16) -> Vec<MonthTotal> {
    totals_by_month_filtered(records, Some(year))
}

fn totals_by_month_filtered(records: &[Record], year: Option<u16>) -> Vec<MonthTotal> {
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for r in records {
        if year.is_some_and(|y| r.year != y) {
            continue;
        }
        *sums.entry(r.canon_month.as_str()).or_insert(0.0) += r.amount;
    }
    MONTHS_DESC
        .iter()
        .map(|month| MonthTotal {
            month: label_month(month),
            total: sums.get(month).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Groups records by outlet name and accumulates per-year sub-totals and a
/// grand total per outlet.
///
/// The grouping name falls back from outlet to provider, and to a placeholder
/// when both are blank, so every record lands somewhere. Output order is
/// unspecified; callers rank it themselves.
pub fn outlet_rollups(records: &[Record]) -> Vec<OutletRollup> {
    let mut acc: HashMap<&str, OutletRollup> = HashMap::new();
    for r in records {
        let name = r.group_name().unwrap_or(OUTLET_PLACEHOLDER);
        let rollup = acc.entry(name).or_insert_with(|| OutletRollup {
            outlet: name.to_string(),
            by_year: BTreeMap::new(),
            total: 0.0,
        });
        if r.year > 0 {
            *rollup.by_year.entry(r.year).or_insert(0.0) += r.amount;
        }
        rollup.total += r.amount;
    }
    acc.into_values().collect()
}

/// Top-n outlets by grand total, descending, ties broken by outlet name
/// ascending (accent-insensitive).
pub fn top_outlets(records: &[Record], n: usize) -> Vec<OutletRollup> {
    let mut rollups = outlet_rollups(records);
    rollups.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| normalize(&a.outlet).cmp(&normalize(&b.outlet)))
    });
    rollups.truncate(n);
    rollups
}

/// Alphabetical index cards: one per outlet with a real (non-blank) name,
/// ranked by grand total, or by the selected year's sub-total when a year
/// filter is active. Ties break by name ascending.
pub fn alphabetical_index(records: &[Record], year_filter: YearFilter) -> Vec<AzCard> {
    let mut cards: Vec<AzCard> = outlet_rollups(records)
        .into_iter()
        .filter(|r| r.outlet != OUTLET_PLACEHOLDER)
        .map(|rollup| {
            let criterion = match year_filter {
                YearFilter::All => rollup.total,
                YearFilter::Year(y) => rollup.year_total(y),
            };
            AzCard { rollup, criterion }
        })
        .collect();
    cards.sort_by(|a, b| {
        b.criterion
            .total_cmp(&a.criterion)
            .then_with(|| normalize(&a.rollup.outlet).cmp(&normalize(&b.rollup.outlet)))
    });
    cards
}

/// Narrows index cards to one first-letter bucket (`'A'..='Z'` or `'#'`).
/// `None` means all buckets.
pub fn filter_bucket(cards: &[AzCard], letter: Option<char>) -> Vec<AzCard> {
    match letter {
        None => cards.to_vec(),
        Some(l) => cards
            .iter()
            .filter(|c| first_letter_of(&c.rollup.outlet) == l)
            .cloned()
            .collect(),
    }
}

/// Number of distinct non-blank provider names among records matching the
/// year filter.
pub fn distinct_providers(records: &[Record], year_filter: YearFilter) -> usize {
    let providers: BTreeSet<&str> = records
        .iter()
        .filter(|r| year_filter.matches(r.year))
        .map(|r| r.provider.trim())
        .filter(|p| !p.is_empty())
        .collect();
    providers.len()
}
