//! Filtering and sorting of aggregated penny items.
//!
//! All predicates are conjunctive and applied in a single pass; the
//! surviving set is then sorted with a total, deterministic comparator so
//! identical inputs always produce byte-identical output order. Pagination
//! is the caller's job: `total` is the post-filter, pre-slice count.

use chrono::{DateTime, Duration, Utc};

use penny_core::{PennyItem, Tier};

/// Sort orders accepted by the penny-list API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    MostReports,
    Alphabetical,
}

/// Trailing date windows accepted by the penny-list API.
///
/// `All` applies no cutoff; it is what callers pass when the date window
/// was already pushed down to the storage fetch, to avoid double-filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
    EighteenMonths,
    TwentyFourMonths,
    #[default]
    All,
}

impl DateRange {
    /// Window length in days, or `None` for `All`.
    #[must_use]
    pub fn window_days(self) -> Option<i64> {
        match self {
            DateRange::OneMonth => Some(30),
            DateRange::ThreeMonths => Some(90),
            DateRange::SixMonths => Some(180),
            DateRange::TwelveMonths => Some(365),
            DateRange::EighteenMonths => Some(540),
            DateRange::TwentyFourMonths => Some(730),
            DateRange::All => None,
        }
    }

    /// The inclusive lower bound for item freshness, or `None` for `All`.
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.window_days().map(|days| now - Duration::days(days))
    }
}

/// Validated filter/sort parameters. Validation and defaulting happen at
/// the HTTP boundary; the engine assumes well-formed input and has no
/// error path of its own.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// Keep only items with at least one sighting in this state.
    pub state: Option<String>,
    /// Keep only items of this tier (`None` = all tiers).
    pub tier: Option<Tier>,
    /// Keep only items with a photo.
    pub photo: bool,
    /// Case-insensitive substring match over name, SKU, and notes.
    pub q: Option<String>,
    pub sort: SortOption,
    pub days: DateRange,
}

#[derive(Debug, Clone)]
pub struct QueryResult {
    pub items: Vec<PennyItem>,
    /// Post-filter, pre-pagination count. Always equals `items.len()` here;
    /// callers slice pages out of `items` and need the full count for page
    /// math.
    pub total: usize,
}

fn matches_search(item: &PennyItem, needle: &str) -> bool {
    if item.name.to_lowercase().contains(needle) || item.sku.contains(needle) {
        return true;
    }
    item.notes
        .as_deref()
        .is_some_and(|notes| notes.to_lowercase().contains(needle))
}

/// Filters and sorts penny items. Shared by the API route and the initial
/// page-render path, so both always agree on ordering.
#[must_use]
pub fn query_items(items: &[PennyItem], params: &QueryParams, now: DateTime<Utc>) -> QueryResult {
    let cutoff = params.days.cutoff(now);
    let needle = params.q.as_deref().map(str::to_lowercase);

    let mut filtered: Vec<PennyItem> = items
        .iter()
        .filter(|item| {
            if let Some(cutoff) = cutoff {
                // Windowed ranges are bounded on both ends: future-dated
                // items are no fresher than the window allows.
                let seen = item.fresh_at();
                if seen < cutoff || seen > now {
                    return false;
                }
            }
            if let Some(state) = params.state.as_deref() {
                if !item.locations.contains_key(state) {
                    return false;
                }
            }
            if let Some(tier) = params.tier {
                if item.tier != tier {
                    return false;
                }
            }
            if params.photo && !item.has_photo() {
                return false;
            }
            if let Some(needle) = needle.as_deref() {
                if !matches_search(item, needle) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    // Every arm ends in an ascending-SKU tie-break, making the order total:
    // SKUs are unique after aggregation, so no two items compare equal.
    match params.sort {
        SortOption::Newest => {
            filtered.sort_by(|a, b| {
                b.fresh_at()
                    .cmp(&a.fresh_at())
                    .then_with(|| a.sku.cmp(&b.sku))
            });
        }
        SortOption::Oldest => {
            filtered.sort_by(|a, b| {
                a.date_added
                    .cmp(&b.date_added)
                    .then_with(|| a.sku.cmp(&b.sku))
            });
        }
        SortOption::MostReports => {
            filtered.sort_by(|a, b| {
                b.total_reports()
                    .cmp(&a.total_reports())
                    .then_with(|| b.fresh_at().cmp(&a.fresh_at()))
                    .then_with(|| a.sku.cmp(&b.sku))
            });
        }
        SortOption::Alphabetical => {
            filtered.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.sku.cmp(&b.sku))
            });
        }
    }

    let total = filtered.len();
    QueryResult {
        items: filtered,
        total,
    }
}
