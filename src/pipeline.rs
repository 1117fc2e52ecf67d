use crate::model::Record;
use crate::normalizer::{month_rank, normalize};
use std::collections::HashMap;
use std::str::FromStr;

/// Year scope for the detail listing and the aggregations that honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFilter {
    All,
    Year(u16),
}

impl YearFilter {
    pub fn matches(self, year: u16) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(y) => year == y,
        }
    }
}

impl FromStr for YearFilter {
    type Err = std::num::ParseIntError;

    /// Parses `"all"` (case-insensitive) or a year number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(YearFilter::All)
        } else {
            s.trim().parse().map(YearFilter::Year)
        }
    }
}

/// Filters the record collection by free-text query and year, then orders it.
///
/// The query is normalized and matched as a substring against the precomputed
/// normalized outlet, provider, resolution, and canonical month fields, OR'd
/// across the four. Two sort regimes apply:
///
/// - **Year filter active**: records rank by their outlet's summed amount over
///   the already-filtered set, descending, so a single outlet's lines cluster
///   together the way the per-outlet rollup orders them. Ties break by year
///   descending, then month rank ascending.
/// - **All years**: year descending, month rank ascending, then the individual
///   record amount descending; recency dominates before per-record magnitude.
///
/// Pure over its inputs: the collection is never reordered in place, and the
/// same inputs always produce the same output.
pub fn filter_and_sort<'a>(
    records: &'a [Record],
    query: &str,
    year_filter: YearFilter,
) -> Vec<&'a Record> {
    let q = normalize(query);
    let mut filtered: Vec<&Record> = records
        .iter()
        .filter(|r| {
            q.is_empty()
                || r.norm_outlet.contains(&q)
                || r.norm_provider.contains(&q)
                || r.norm_resolution.contains(&q)
                || r.canon_month.contains(&q)
        })
        .filter(|r| year_filter.matches(r.year))
        .collect();

    match year_filter {
        YearFilter::Year(_) => {
            // Outlet totals over the filtered set, not the whole collection.
            let mut sums: HashMap<&str, f64> = HashMap::new();
            for r in &filtered {
                *sums.entry(sort_name(r)).or_insert(0.0) += r.amount;
            }
            filtered.sort_by(|a, b| {
                let sa = sums.get(sort_name(a)).copied().unwrap_or(0.0);
                let sb = sums.get(sort_name(b)).copied().unwrap_or(0.0);
                sb.total_cmp(&sa)
                    .then_with(|| b.year.cmp(&a.year))
                    .then_with(|| month_rank(&a.canon_month).cmp(&month_rank(&b.canon_month)))
            });
        }
        YearFilter::All => {
            filtered.sort_by(|a, b| {
                b.year
                    .cmp(&a.year)
                    .then_with(|| month_rank(&a.canon_month).cmp(&month_rank(&b.canon_month)))
                    .then_with(|| b.amount.total_cmp(&a.amount))
            });
        }
    }

    filtered
}

fn sort_name(r: &Record) -> &str {
    if r.outlet.is_empty() {
        &r.provider
    } else {
        &r.outlet
    }
}
