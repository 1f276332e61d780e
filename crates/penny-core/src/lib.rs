pub mod app_config;
pub mod config;
pub mod item;
pub mod sku;
pub mod states;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use item::{EnrichmentRecord, PennyItem, SightingRow, Tier};
pub use sku::normalize_sku;
pub use states::extract_state;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
