use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One community-submitted sighting report, as handed over by the storage
/// layer. Raw and occasionally dirty: the SKU may be missing or malformed,
/// and the store location is free text (`"Austin, TX"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SightingRow {
    pub sku: Option<String>,
    pub item_name: Option<String>,
    /// Free-text store location as typed by the reporter.
    pub city_state: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub reported_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub brand: Option<String>,
    pub retail_price: Option<Decimal>,
    pub home_depot_url: Option<String>,
    pub internet_sku: Option<String>,
    pub quantity_found: Option<i32>,
}

/// One curated enrichment record, as handed over by the storage layer:
/// hand-maintained cleaned-up names, brands, model numbers, UPCs, and
/// product URLs keyed by SKU.
#[derive(Debug, Clone)]
pub struct EnrichmentRecord {
    pub sku: String,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model_number: Option<String>,
    pub upc: Option<String>,
    pub image_url: Option<String>,
    pub home_depot_url: Option<String>,
    pub internet_sku: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// How commonly an item is being found, derived from its aggregate
/// sighting counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Very Common")]
    VeryCommon,
    Common,
    Rare,
}

impl Tier {
    /// Classifies an item from its total report count and the number of
    /// distinct states it was seen in.
    #[must_use]
    pub fn from_counts(total_reports: u32, state_count: usize) -> Self {
        if total_reports >= 6 || state_count >= 4 {
            Tier::VeryCommon
        } else if total_reports >= 3 || state_count >= 2 {
            Tier::Common
        } else {
            Tier::Rare
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::VeryCommon => write!(f, "Very Common"),
            Tier::Common => write!(f, "Common"),
            Tier::Rare => write!(f, "Rare"),
        }
    }
}

/// The aggregated, per-SKU entity merging every sighting for that SKU
/// within a fetch window. Built exclusively by the normalizer; never
/// mutated afterwards (the query engine only selects and reorders).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PennyItem {
    pub id: String,
    pub sku: String,
    pub name: String,
    /// State code -> sighting count. A `BTreeMap` keeps serialization
    /// order deterministic across runs.
    pub locations: BTreeMap<String, u32>,
    /// Earliest `reported_at` observed for this SKU.
    pub date_added: DateTime<Utc>,
    /// Latest `reported_at` observed for this SKU.
    pub last_seen_at: Option<DateTime<Utc>>,
    pub tier: Tier,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub brand: Option<String>,
    pub model_number: Option<String>,
    pub upc: Option<String>,
    pub retail_price: Option<Decimal>,
    pub home_depot_url: Option<String>,
    pub internet_sku: Option<String>,
    pub quantity_found: Option<String>,
}

impl PennyItem {
    /// Total sighting reports across all states.
    #[must_use]
    pub fn total_reports(&self) -> u32 {
        self.locations.values().sum()
    }

    /// Number of distinct states this item was reported in.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if the item carries a usable photo URL.
    #[must_use]
    pub fn has_photo(&self) -> bool {
        self.image_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// The timestamp freshness decisions key off: `last_seen_at`, falling
    /// back to `date_added` for items that only ever had one report.
    #[must_use]
    pub fn fresh_at(&self) -> DateTime<Utc> {
        self.last_seen_at.unwrap_or(self.date_added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_item(locations: &[(&str, u32)]) -> PennyItem {
        PennyItem {
            id: "1001220867".to_string(),
            sku: "1001220867".to_string(),
            name: "Husky 20 Gal. Storage Tote".to_string(),
            locations: locations
                .iter()
                .map(|(s, c)| ((*s).to_string(), *c))
                .collect(),
            date_added: Utc.with_ymd_and_hms(2025, 11, 1, 8, 0, 0).unwrap(),
            last_seen_at: Some(Utc.with_ymd_and_hms(2025, 12, 1, 8, 0, 0).unwrap()),
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
    fn total_reports_sums_all_states() {
        let item = make_item(&[("GA", 2), ("TX", 1)]);
        assert_eq!(item.total_reports(), 3);
        assert_eq!(item.state_count(), 2);
    }

    #[test]
    fn total_reports_zero_when_no_locations() {
        let item = make_item(&[]);
        assert_eq!(item.total_reports(), 0);
        assert_eq!(item.state_count(), 0);
    }

    #[test]
    fn has_photo_rejects_whitespace_only_urls() {
        let mut item = make_item(&[]);
        assert!(!item.has_photo());
        item.image_url = Some("   ".to_string());
        assert!(!item.has_photo());
        item.image_url = Some("https://example.com/a.jpg".to_string());
        assert!(item.has_photo());
    }

    #[test]
    fn fresh_at_falls_back_to_date_added() {
        let mut item = make_item(&[]);
        let last_seen = item.last_seen_at.unwrap();
        assert_eq!(item.fresh_at(), last_seen);
        item.last_seen_at = None;
        assert_eq!(item.fresh_at(), item.date_added);
    }

    #[test]
    fn tier_thresholds_match_product_rules() {
        assert_eq!(Tier::from_counts(6, 1), Tier::VeryCommon);
        assert_eq!(Tier::from_counts(1, 4), Tier::VeryCommon);
        assert_eq!(Tier::from_counts(3, 1), Tier::Common);
        assert_eq!(Tier::from_counts(1, 2), Tier::Common);
        assert_eq!(Tier::from_counts(2, 1), Tier::Rare);
        assert_eq!(Tier::from_counts(0, 0), Tier::Rare);
    }

    #[test]
    fn tier_serializes_with_product_labels() {
        let json = serde_json::to_string(&Tier::VeryCommon).expect("serialize");
        assert_eq!(json, "\"Very Common\"");
        let back: Tier = serde_json::from_str("\"Very Common\"").expect("deserialize");
        assert_eq!(back, Tier::VeryCommon);
    }

    #[test]
    fn penny_item_serializes_camel_case() {
        let item = make_item(&[("TX", 1)]);
        let json = serde_json::to_string(&item).expect("serialize");
        assert!(json.contains("\"dateAdded\""));
        assert!(json.contains("\"lastSeenAt\""));
        assert!(json.contains("\"locations\":{\"TX\":1}"));
    }
}
