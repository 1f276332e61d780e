//! Freshness metrics for the list-header summary block.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use penny_core::PennyItem;

/// Rolling-window counts of recent additions. Rolling means exact
/// durations from `now`, not calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessMetrics {
    pub new_last_24h: usize,
    pub total_last_30d: usize,
}

/// Counts items first seen within the trailing 24 hours and 30 days.
/// Future-dated items are not counted.
#[must_use]
pub fn freshness_metrics(items: &[PennyItem], now: DateTime<Utc>) -> FreshnessMetrics {
    let day_ago = now - Duration::hours(24);
    let month_ago = now - Duration::days(30);

    let mut metrics = FreshnessMetrics {
        new_last_24h: 0,
        total_last_30d: 0,
    };
    for item in items {
        let added = item.date_added;
        if added > now {
            continue;
        }
        if added >= day_ago {
            metrics.new_last_24h += 1;
        }
        if added >= month_ago {
            metrics.total_last_30d += 1;
        }
    }
    metrics
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

    fn added(hours_ago: i64) -> PennyItem {
        let when = now() - Duration::hours(hours_ago);
        PennyItem {
            id: "123456".to_string(),
            sku: "123456".to_string(),
            name: "Work Light".to_string(),
            locations: BTreeMap::new(),
            date_added: when,
            last_seen_at: Some(when),
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

    #[test]
    fn counts_both_windows() {
        let items = vec![
            added(2),
            added(23),
            added(25),
            added(29 * 24),
            added(31 * 24),
        ];
        let metrics = freshness_metrics(&items, now());
        assert_eq!(metrics.new_last_24h, 2);
        assert_eq!(metrics.total_last_30d, 4);
    }

    #[test]
    fn future_dated_items_are_skipped() {
        let items = vec![added(-5)];
        let metrics = freshness_metrics(&items, now());
        assert_eq!(metrics.new_last_24h, 0);
        assert_eq!(metrics.total_last_30d, 0);
    }

    #[test]
    fn empty_input_counts_zero() {
        let metrics = freshness_metrics(&[], now());
        assert_eq!(metrics.new_last_24h, 0);
        assert_eq!(metrics.total_last_30d, 0);
    }

    // `date_added` must come from the full report history. Aggregating only
    // a recent window would shift first-seen forward and re-count old items
    // as new, which is why the freshness route fetches unwindowed.
    #[test]
    fn resighted_old_item_is_not_new() {
        fn report(reported_at: DateTime<Utc>) -> penny_core::SightingRow {
            penny_core::SightingRow {
                sku: Some("123456".to_string()),
                item_name: Some("Ryobi ONE+ Work Light".to_string()),
                city_state: None,
                purchase_date: None,
                reported_at,
                notes: None,
                image_url: None,
                brand: None,
                retail_price: None,
                home_depot_url: None,
                internet_sku: None,
                quantity_found: None,
            }
        }

        let rows = vec![
            report(now() - Duration::days(45)),
            report(now() - Duration::hours(1)),
        ];
        let items = crate::aggregate::build_items(&rows);
        assert_eq!(items.len(), 1);

        let metrics = freshness_metrics(&items, now());
        assert_eq!(metrics.new_last_24h, 0);
        assert_eq!(metrics.total_last_30d, 0);
    }
}
