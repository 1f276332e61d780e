//! Read path for the `penny_sightings` table.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use penny_core::SightingRow;

/// One raw sighting row as stored. Reports come in with a best-effort
/// timestamp: `reported_at` here is already coalesced from the submission
/// timestamp and the purchase date (midnight UTC), in that order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SightingRecord {
    pub id: i64,
    pub sku: Option<String>,
    pub item_name: Option<String>,
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

impl From<SightingRecord> for SightingRow {
    fn from(record: SightingRecord) -> Self {
        SightingRow {
            sku: record.sku,
            item_name: record.item_name,
            city_state: record.city_state,
            purchase_date: record.purchase_date,
            reported_at: record.reported_at,
            notes: record.notes,
            image_url: record.image_url,
            brand: record.brand,
            retail_price: record.retail_price,
            home_depot_url: record.home_depot_url,
            internet_sku: record.internet_sku,
            quantity_found: record.quantity_found,
        }
    }
}

/// Fetch sighting rows, push-down filtered.
///
/// `since` bounds the window by effective report time and `skus` restricts
/// to a SKU list; both exist purely to bound the row count before it
/// reaches the in-memory engine. Rows with neither a submission timestamp
/// nor a purchase date are unusable and excluded in SQL.
///
/// Results are ordered by `reported_at` ascending, the fold order the
/// aggregator's last-non-null-wins merge expects.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_sightings_since(
    pool: &PgPool,
    since: Option<DateTime<Utc>>,
    skus: Option<&[String]>,
) -> Result<Vec<SightingRow>, sqlx::Error> {
    let records = sqlx::query_as::<_, SightingRecord>(
        "SELECT s.id, s.sku, s.item_name, s.city_state, s.purchase_date, \
                COALESCE(s.reported_at, s.purchase_date::timestamptz) AS reported_at, \
                s.notes, s.image_url, s.brand, s.retail_price, \
                s.home_depot_url, s.internet_sku, s.quantity_found \
         FROM penny_sightings s \
         WHERE (s.reported_at IS NOT NULL OR s.purchase_date IS NOT NULL) \
           AND ($1::timestamptz IS NULL \
                OR COALESCE(s.reported_at, s.purchase_date::timestamptz) >= $1) \
           AND ($2::text[] IS NULL OR s.sku = ANY($2)) \
         ORDER BY reported_at ASC, s.id ASC",
    )
    .bind(since)
    .bind(skus)
    .fetch_all(pool)
    .await?;

    Ok(records.into_iter().map(SightingRow::from).collect())
}
