//! Curated enrichment overlay.
//!
//! A separate, hand-maintained table carries cleaned-up names, brands,
//! model numbers, UPCs, and product URLs keyed by SKU. When present, those
//! values override what the crowd reported, except names, which only
//! replace a crowd name when they are a genuine upgrade.

use std::collections::HashMap;

use penny_core::{normalize_sku, EnrichmentRecord, PennyItem};

use crate::name_quality::should_prefer_enriched_name;

/// Index records by normalized SKU, keeping the newest per SKU.
fn build_index(records: &[EnrichmentRecord]) -> HashMap<String, &EnrichmentRecord> {
    let mut index: HashMap<String, &EnrichmentRecord> = HashMap::new();
    for record in records {
        let Some(sku) = normalize_sku(&record.sku) else {
            continue;
        };
        match index.get(&sku) {
            Some(existing) if record.updated_at < existing.updated_at => {}
            _ => {
                index.insert(sku, record);
            }
        }
    }
    index
}

/// Overlays enrichment records onto aggregated items.
///
/// Field-wise the enriched value wins when present and the aggregated value
/// survives otherwise; the name is gated by the quality heuristics. Items
/// without a matching record pass through unchanged. Pure.
#[must_use]
pub fn apply_enrichment(items: Vec<PennyItem>, records: &[EnrichmentRecord]) -> Vec<PennyItem> {
    if records.is_empty() {
        return items;
    }
    let index = build_index(records);
    if index.is_empty() {
        return items;
    }

    items
        .into_iter()
        .map(|mut item| {
            let Some(record) = index.get(item.sku.as_str()) else {
                return item;
            };

            if should_prefer_enriched_name(
                Some(&item.name),
                record.name.as_deref(),
                record.brand.as_deref().or(item.brand.as_deref()),
            ) {
                if let Some(name) = record.name.clone() {
                    item.name = name;
                }
            }
            item.brand = record.brand.clone().or(item.brand);
            item.model_number = record.model_number.clone().or(item.model_number);
            item.upc = record.upc.clone().or(item.upc);
            item.image_url = record.image_url.clone().or(item.image_url);
            item.home_depot_url = record.home_depot_url.clone().or(item.home_depot_url);
            item.internet_sku = record.internet_sku.clone().or(item.internet_sku);
            item
        })
        .collect()
}
