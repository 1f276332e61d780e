//! Read path for the `penny_item_enrichment` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use penny_core::EnrichmentRecord;

#[derive(Debug, Clone, sqlx::FromRow)]
struct EnrichmentRowRecord {
    sku: String,
    item_name: Option<String>,
    brand: Option<String>,
    model_number: Option<String>,
    upc: Option<String>,
    image_url: Option<String>,
    home_depot_url: Option<String>,
    internet_sku: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<EnrichmentRowRecord> for EnrichmentRecord {
    fn from(row: EnrichmentRowRecord) -> Self {
        EnrichmentRecord {
            sku: row.sku,
            name: row.item_name,
            brand: row.brand,
            model_number: row.model_number,
            upc: row.upc,
            image_url: row.image_url,
            home_depot_url: row.home_depot_url,
            internet_sku: row.internet_sku,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres error code for "relation does not exist".
const UNDEFINED_TABLE: &str = "42P01";

/// Fetch all curated enrichment records.
///
/// Enrichment is an optional overlay: if the table has not been provisioned
/// yet, this logs a warning and returns an empty list rather than failing
/// the request.
///
/// # Errors
///
/// Returns [`sqlx::Error`] for any failure other than a missing table.
pub async fn list_enrichment_rows(pool: &PgPool) -> Result<Vec<EnrichmentRecord>, sqlx::Error> {
    let result = sqlx::query_as::<_, EnrichmentRowRecord>(
        "SELECT sku, item_name, brand, model_number, upc, image_url, \
                home_depot_url, internet_sku, updated_at \
         FROM penny_item_enrichment",
    )
    .fetch_all(pool)
    .await;

    match result {
        Ok(rows) => Ok(rows.into_iter().map(EnrichmentRecord::from).collect()),
        Err(sqlx::Error::Database(db_err))
            if db_err.code().as_deref() == Some(UNDEFINED_TABLE) =>
        {
            tracing::warn!("penny_item_enrichment table missing; skipping enrichment overlay");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
