//! The penny-list engine: turns raw community sighting rows into the
//! filtered, sorted, deduplicated view the API serves.
//!
//! Everything in this crate is a pure, synchronous function over in-memory
//! collections. I/O (the Postgres fetch) lives in `penny-db`; HTTP parsing,
//! pagination, and caching live in `penny-server`.

pub mod aggregate;
pub mod enrich;
pub mod freshness;
pub mod hot;
pub mod name_quality;
pub mod query;
pub mod validity;

pub use aggregate::build_items;
pub use enrich::apply_enrichment;
pub use freshness::{freshness_metrics, FreshnessMetrics};
pub use hot::{hot_items, HotWeights};
pub use query::{query_items, DateRange, QueryParams, QueryResult, SortOption};
pub use validity::filter_valid_items;
