//! Validity gate applied between aggregation and querying.

use std::sync::LazyLock;

use regex::Regex;

use penny_core::PennyItem;

/// Placeholder names produced when no report in a SKU group carried a real
/// item name, e.g. `"SKU 123456"`. These indicate incomplete enrichment and
/// must never reach query results.
static PLACEHOLDER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SKU\s+\d+$").expect("placeholder pattern compiles"));

/// Drops items whose name is empty or a bare-SKU placeholder.
///
/// Idempotent: re-applying to already-filtered output is a no-op.
#[must_use]
pub fn filter_valid_items(items: Vec<PennyItem>) -> Vec<PennyItem> {
    items
        .into_iter()
        .filter(|item| {
            let name = item.name.trim();
            !name.is_empty() && !PLACEHOLDER_NAME.is_match(name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    use penny_core::Tier;

    fn item(name: &str) -> PennyItem {
        PennyItem {
            id: "123456".to_string(),
            sku: "123456".to_string(),
            name: name.to_string(),
            locations: BTreeMap::new(),
            date_added: Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap(),
            last_seen_at: None,
            tier: Tier::Rare,
            notes: None,
            image_url: Some("https://example.com/a.jpg".to_string()),
            brand: Some("Ryobi".to_string()),
            model_number: None,
            upc: None,
            retail_price: None,
            home_depot_url: None,
            internet_sku: None,
            quantity_found: None,
        }
    }

    #[test]
    fn keeps_real_names() {
        let kept = filter_valid_items(vec![item("Ryobi ONE+ Work Light")]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn drops_empty_and_whitespace_names() {
        assert!(filter_valid_items(vec![item("")]).is_empty());
        assert!(filter_valid_items(vec![item("   ")]).is_empty());
    }

    #[test]
    fn drops_placeholder_names_even_when_other_fields_are_populated() {
        // The fixture carries an image and brand; the name alone disqualifies it.
        assert!(filter_valid_items(vec![item("SKU 123456")]).is_empty());
        assert!(filter_valid_items(vec![item("SKU  999")]).is_empty());
    }

    #[test]
    fn keeps_names_that_merely_mention_a_sku() {
        let kept = filter_valid_items(vec![item("SKU 123456 Work Light")]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn filter_is_idempotent() {
        let input = vec![
            item("Ryobi ONE+ Work Light"),
            item("SKU 123456"),
            item(""),
            item("Husky Tote"),
        ];
        let once = filter_valid_items(input);
        let names: Vec<String> = once.iter().map(|i| i.name.clone()).collect();
        let twice = filter_valid_items(once);
        let names_again: Vec<String> = twice.iter().map(|i| i.name.clone()).collect();
        assert_eq!(names, names_again);
        assert_eq!(names, vec!["Ryobi ONE+ Work Light", "Husky Tote"]);
    }
}
