//! Aggregation of raw sighting rows into one [`PennyItem`] per SKU.
//!
//! The backing store keeps one row per user report. This module folds those
//! rows into per-SKU aggregates: state-level sighting counts, first/last
//! seen timestamps, and last-non-null-wins merges for the enrichment-ish
//! fields each report may or may not carry.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use penny_core::{extract_state, normalize_sku, PennyItem, SightingRow, Tier};

#[derive(Debug)]
struct ItemAccumulator {
    name: Option<String>,
    locations: BTreeMap<String, u32>,
    date_added: DateTime<Utc>,
    last_seen_at: DateTime<Utc>,
    notes: Option<String>,
    image_url: Option<String>,
    brand: Option<String>,
    retail_price: Option<Decimal>,
    home_depot_url: Option<String>,
    internet_sku: Option<String>,
    quantity_found: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

/// Builds one [`PennyItem`] per valid SKU from a window of sighting rows.
///
/// Rows without a normalizable SKU are skipped silently (the store is
/// treated as occasionally dirty). Rows are folded in `reported_at`
/// ascending order so that, for the nullable descriptive fields, the most
/// recent non-null report wins while earlier values survive null gaps.
/// Output is ordered by ascending SKU; the function is pure.
#[must_use]
pub fn build_items(rows: &[SightingRow]) -> Vec<PennyItem> {
    let mut ordered: Vec<&SightingRow> = rows.iter().collect();
    ordered.sort_by_key(|row| row.reported_at);

    let mut grouped: BTreeMap<String, ItemAccumulator> = BTreeMap::new();
    let mut skipped = 0_usize;

    for row in ordered {
        let Some(sku) = row.sku.as_deref().and_then(normalize_sku) else {
            skipped += 1;
            continue;
        };

        let state = row.city_state.as_deref().and_then(extract_state);
        let name = non_empty(row.item_name.as_deref());
        let quantity = row.quantity_found.map(|q| q.to_string());

        let acc = grouped
            .entry(sku)
            .or_insert_with(|| ItemAccumulator {
                name: None,
                locations: BTreeMap::new(),
                date_added: row.reported_at,
                last_seen_at: row.reported_at,
                notes: None,
                image_url: None,
                brand: None,
                retail_price: None,
                home_depot_url: None,
                internet_sku: None,
                quantity_found: None,
            });

        acc.date_added = acc.date_added.min(row.reported_at);
        acc.last_seen_at = acc.last_seen_at.max(row.reported_at);

        // Rows arrive in reported_at ascending order, so plain overwrite
        // implements "latest non-null wins".
        if let Some(name) = name {
            acc.name = Some(name);
        }
        if let Some(notes) = non_empty(row.notes.as_deref()) {
            acc.notes = Some(notes);
        }
        if let Some(image_url) = non_empty(row.image_url.as_deref()) {
            acc.image_url = Some(image_url);
        }
        if let Some(brand) = non_empty(row.brand.as_deref()) {
            acc.brand = Some(brand);
        }
        if let Some(price) = row.retail_price {
            acc.retail_price = Some(price);
        }
        if let Some(url) = non_empty(row.home_depot_url.as_deref()) {
            acc.home_depot_url = Some(url);
        }
        if let Some(internet_sku) = non_empty(row.internet_sku.as_deref()) {
            acc.internet_sku = Some(internet_sku);
        }
        if let Some(quantity) = quantity {
            acc.quantity_found = Some(quantity);
        }
        if let Some(state) = state {
            *acc.locations.entry(state).or_insert(0) += 1;
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "skipped sighting rows without a valid SKU");
    }

    grouped
        .into_iter()
        .map(|(sku, acc)| {
            let tier = Tier::from_counts(
                acc.locations.values().sum(),
                acc.locations.len(),
            );
            PennyItem {
                id: sku.clone(),
                // Items whose reports never carried a usable name get the
                // placeholder form, which the validity filter later drops.
                name: acc.name.unwrap_or_else(|| format!("SKU {sku}")),
                sku,
                locations: acc.locations,
                date_added: acc.date_added,
                last_seen_at: Some(acc.last_seen_at),
                tier,
                notes: acc.notes,
                image_url: acc.image_url,
                brand: acc.brand,
                model_number: None,
                upc: None,
                retail_price: acc.retail_price,
                home_depot_url: acc.home_depot_url,
                internet_sku: acc.internet_sku,
                quantity_found: acc.quantity_found,
            }
        })
        .collect()
}
