//! The penny-list API route: query-string parsing/defaulting, the
//! fetch-normalize-filter-query pipeline, pagination math, and cache
//! headers. All the actual data shaping lives in `penny-list`.

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use penny_core::{PennyItem, Tier};
use penny_list::{
    apply_enrichment, build_items, filter_valid_items, freshness_metrics, hot_items, query_items,
    DateRange, FreshnessMetrics, HotWeights, QueryParams, SortOption,
};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

const VALID_PER_PAGE: [usize; 3] = [25, 50, 100];
const DEFAULT_PER_PAGE: usize = 50;

/// Raw query-string values. Everything arrives as optional text; the parse
/// functions below own validation and defaulting so the engine only ever
/// sees closed enum values.
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawListQuery {
    state: Option<String>,
    tier: Option<String>,
    photo: Option<String>,
    q: Option<String>,
    sort: Option<String>,
    days: Option<String>,
    #[serde(rename = "perPage")]
    per_page: Option<String>,
    page: Option<String>,
    #[serde(rename = "includeHot")]
    include_hot: Option<String>,
    fresh: Option<String>,
}

fn parse_per_page(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| VALID_PER_PAGE.contains(v))
        .unwrap_or(DEFAULT_PER_PAGE)
}

fn parse_page(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(1)
}

fn parse_sort(value: Option<&str>) -> SortOption {
    match value {
        Some("newest") => SortOption::Newest,
        Some("oldest") => SortOption::Oldest,
        Some("most-reports") => SortOption::MostReports,
        Some("alphabetical") => SortOption::Alphabetical,
        _ => SortOption::Newest,
    }
}

fn parse_days(value: Option<&str>) -> DateRange {
    match value {
        // Backward compatibility for old day-based links.
        Some("7" | "14" | "30" | "1m") => DateRange::OneMonth,
        Some("3m") => DateRange::ThreeMonths,
        Some("6m") => DateRange::SixMonths,
        Some("12m") => DateRange::TwelveMonths,
        Some("18m") => DateRange::EighteenMonths,
        Some("24m") => DateRange::TwentyFourMonths,
        Some("all") => DateRange::All,
        _ => DateRange::SixMonths,
    }
}

fn parse_tier(value: Option<&str>) -> Option<Tier> {
    match value {
        Some("Very Common") => Some(Tier::VeryCommon),
        Some("Common") => Some(Tier::Common),
        Some("Rare") => Some(Tier::Rare),
        _ => None,
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    value == Some("1")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageSlice {
    page_count: usize,
    page: usize,
    start: usize,
    end: usize,
}

/// Page math over the post-filter total: at least one page always exists,
/// and out-of-range page numbers clamp instead of erroring.
fn paginate(total: usize, per_page: usize, requested_page: usize) -> PageSlice {
    let page_count = total.div_ceil(per_page).max(1);
    let page = requested_page.clamp(1, page_count);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total);
    PageSlice {
        page_count,
        page,
        start,
        end,
    }
}

fn cache_control(config: &penny_core::AppConfig, fresh: bool) -> String {
    if fresh {
        "no-store".to_string()
    } else {
        format!(
            "public, max-age=0, s-maxage={}, stale-while-revalidate={}",
            config.cache_smaxage_secs, config.cache_stale_secs
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PennyListData {
    pub items: Vec<PennyItem>,
    pub total: usize,
    pub page_count: usize,
    pub page: usize,
    pub per_page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hot_items: Option<Vec<PennyItem>>,
}

/// Fetches the sighting window, aggregates, enriches, queries, and slices
/// one page. The `days` window is pushed down to the row fetch, so the
/// engine runs with `DateRange::All` to avoid double-filtering.
pub(super) async fn list_penny_items(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(raw): Query<RawListQuery>,
) -> Result<Response, ApiError> {
    let now = Utc::now();
    let days = parse_days(raw.days.as_deref());
    let per_page = parse_per_page(raw.per_page.as_deref());
    let requested_page = parse_page(raw.page.as_deref());
    let fresh = parse_flag(raw.fresh.as_deref());

    let items = load_valid_items(&state, req_id.0.clone(), days.cutoff(now)).await?;

    let params = QueryParams {
        state: raw.state.filter(|s| !s.is_empty()),
        tier: parse_tier(raw.tier.as_deref()),
        photo: parse_flag(raw.photo.as_deref()),
        q: raw.q.filter(|q| !q.is_empty()),
        sort: parse_sort(raw.sort.as_deref()),
        days: DateRange::All,
    };
    let result = query_items(&items, &params, now);

    let slice = paginate(result.total, per_page, requested_page);
    let page_items = result.items[slice.start..slice.end].to_vec();

    let hot = parse_flag(raw.include_hot.as_deref()).then(|| {
        hot_items(
            &items,
            state.config.hot_window_days,
            state.config.hot_limit,
            HotWeights::default(),
            now,
        )
    });

    let body = ApiResponse {
        data: PennyListData {
            items: page_items,
            total: result.total,
            page_count: slice.page_count,
            page: slice.page,
            per_page,
            hot_items: hot,
        },
        meta: ResponseMeta::new(req_id.0),
    };

    Ok(with_cache_header(
        Json(body).into_response(),
        &cache_control(&state.config, fresh),
    ))
}

/// Freshness summary for the list header ("X new in the last 24h").
pub(super) async fn get_freshness(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, ApiError> {
    let now = Utc::now();
    // Full history on purpose: a windowed fetch would shift `date_added` to
    // the first report inside the window, so a long-known item re-sighted
    // yesterday would wrongly count as new.
    let items = load_valid_items(&state, req_id.0.clone(), None).await?;

    let body = ApiResponse::<FreshnessMetrics> {
        data: freshness_metrics(&items, now),
        meta: ResponseMeta::new(req_id.0),
    };
    Ok(with_cache_header(
        Json(body).into_response(),
        &cache_control(&state.config, false),
    ))
}

/// Shared fetch-aggregate-validate-enrich pipeline.
async fn load_valid_items(
    state: &AppState,
    request_id: String,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<PennyItem>, ApiError> {
    let rows = penny_db::list_sightings_since(&state.pool, since, None)
        .await
        .map_err(|e| map_db_error(request_id.clone(), &e))?;

    let valid = filter_valid_items(build_items(&rows));

    let enrichment = penny_db::list_enrichment_rows(&state.pool)
        .await
        .map_err(|e| map_db_error(request_id, &e))?;

    Ok(apply_enrichment(valid, &enrichment))
}

fn with_cache_header(mut response: Response, value: &str) -> Response {
    if response.status() == StatusCode::OK {
        if let Ok(value) = HeaderValue::from_str(value) {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
    }
    response
}
