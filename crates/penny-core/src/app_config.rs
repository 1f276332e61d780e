use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Trailing window, in days, for the "hot right now" ranking.
    pub hot_window_days: i64,
    /// Maximum number of hot items returned.
    pub hot_limit: usize,
    /// `s-maxage` for the penny-list API cache header.
    pub cache_smaxage_secs: u64,
    /// `stale-while-revalidate` for the penny-list API cache header.
    pub cache_stale_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("hot_window_days", &self.hot_window_days)
            .field("hot_limit", &self.hot_limit)
            .field("cache_smaxage_secs", &self.cache_smaxage_secs)
            .field("cache_stale_secs", &self.cache_stale_secs)
            .finish()
    }
}
