//! "Hot right now" ranking: a small, trailing-window subset of items
//! surfaced for emphasis.

use chrono::{DateTime, Duration, Utc};

use penny_core::PennyItem;

/// Relative weighting of the two hotness signals. The blend is a product
/// tunable; see `PENNY_HOT_*` config for the window and limit knobs.
#[derive(Debug, Clone, Copy)]
pub struct HotWeights {
    /// Weight of linear in-window freshness (0 at the window edge, 1 at `now`).
    pub recency: f64,
    /// Weight of `ln(1 + total_reports)`; log-damped so a single
    /// heavily-reported item cannot pin the list forever.
    pub reports: f64,
}

impl Default for HotWeights {
    fn default() -> Self {
        Self {
            recency: 1.0,
            reports: 0.25,
        }
    }
}

fn score(item: &PennyItem, window_start: DateTime<Utc>, window_secs: f64, now: DateTime<Utc>, weights: HotWeights) -> Option<f64> {
    let seen = item.fresh_at();
    // Future-dated and out-of-window items are not hot.
    if seen > now || seen < window_start {
        return None;
    }
    let age_secs = (now - seen).num_seconds() as f64;
    let recency = 1.0 - (age_secs / window_secs).clamp(0.0, 1.0);
    let reports = f64::from(item.total_reports()).ln_1p();
    Some(weights.recency * recency + weights.reports * reports)
}

/// Returns the top `limit` items by hotness within the trailing
/// `window_days` window, descending; score ties break by ascending SKU.
///
/// Pure selection: no mutation, bounded output regardless of input size,
/// and an empty input always yields an empty ranking.
#[must_use]
pub fn hot_items(
    items: &[PennyItem],
    window_days: i64,
    limit: usize,
    weights: HotWeights,
    now: DateTime<Utc>,
) -> Vec<PennyItem> {
    let window = Duration::days(window_days.max(0));
    let window_start = now - window;
    let window_secs = (window.num_seconds() as f64).max(1.0);

    let mut scored: Vec<(f64, &PennyItem)> = items
        .iter()
        .filter_map(|item| {
            score(item, window_start, window_secs, now, weights).map(|s| (s, item))
        })
        .collect();

    scored.sort_by(|(sa, a), (sb, b)| {
        sb.total_cmp(sa).then_with(|| a.sku.cmp(&b.sku))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(_, item)| item.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    use penny_core::Tier;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 10, 12, 0, 0).unwrap()
    }

    fn item(sku: &str, seen: DateTime<Utc>, reports: u32) -> PennyItem {
        let mut locations = BTreeMap::new();
        if reports > 0 {
            locations.insert("TX".to_string(), reports);
        }
        PennyItem {
            id: sku.to_string(),
            sku: sku.to_string(),
            name: format!("Item {sku}"),
            locations,
            date_added: seen,
            last_seen_at: Some(seen),
            tier: Tier::Rare,
            notes: None,
            image_url: None,
            brand: None,
            model_number: None,
            upc: None,
            retail_price: None,
            home_depot_url: None,
            internet_sku: None,
            quantity_found: None,
        }
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        now() - Duration::days(days)
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        assert!(hot_items(&[], 14, 6, HotWeights::default(), now()).is_empty());
    }

    #[test]
    fn output_never_exceeds_limit() {
        let items: Vec<PennyItem> = (0..50)
            .map(|i| item(&format!("{:06}", 100_000 + i), days_ago(1), 1))
            .collect();
        let hot = hot_items(&items, 14, 6, HotWeights::default(), now());
        assert_eq!(hot.len(), 6);
    }

    #[test]
    fn excludes_items_outside_the_window() {
        let items = vec![
            item("111111", days_ago(2), 1),
            item("222222", days_ago(20), 9),
            item("333333", now() + Duration::days(1), 9),
        ];
        let hot = hot_items(&items, 14, 6, HotWeights::default(), now());
        assert_eq!(hot.len(), 1);
        assert_eq!(hot[0].sku, "111111");
    }

    #[test]
    fn fresher_items_outrank_staler_ones_at_equal_reports() {
        let items = vec![
            item("222222", days_ago(10), 2),
            item("111111", days_ago(1), 2),
        ];
        let hot = hot_items(&items, 14, 6, HotWeights::default(), now());
        assert_eq!(hot[0].sku, "111111");
        assert_eq!(hot[1].sku, "222222");
    }

    #[test]
    fn report_count_lifts_equally_fresh_items() {
        let items = vec![
            item("222222", days_ago(3), 1),
            item("111111", days_ago(3), 8),
        ];
        let hot = hot_items(&items, 14, 6, HotWeights::default(), now());
        assert_eq!(hot[0].sku, "111111");
    }

    #[test]
    fn score_ties_break_by_ascending_sku() {
        let items = vec![
            item("999999", days_ago(5), 3),
            item("111111", days_ago(5), 3),
        ];
        let hot = hot_items(&items, 14, 6, HotWeights::default(), now());
        let order: Vec<&str> = hot.iter().map(|i| i.sku.as_str()).collect();
        assert_eq!(order, vec!["111111", "999999"]);
    }

    #[test]
    fn ranking_is_deterministic() {
        let items: Vec<PennyItem> = (0..30_u32)
            .map(|i| item(&format!("{:06}", 500_000 + i), days_ago(i64::from(i % 14)), i % 5))
            .collect();
        let first: Vec<String> = hot_items(&items, 14, 10, HotWeights::default(), now())
            .into_iter()
            .map(|i| i.sku)
            .collect();
        let second: Vec<String> = hot_items(&items, 14, 10, HotWeights::default(), now())
            .into_iter()
            .map(|i| i.sku)
            .collect();
        assert_eq!(first, second);
    }
}
