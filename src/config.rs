//! Process configuration from environment variables (and `.env`, loaded by the binary).

use crate::seed::DEFAULT_COUNTRIES_API_URL;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_FILTER: &str = "paises=info,tower_http=info";

#[derive(Clone, Debug)]
pub struct Config {
    /// PostgreSQL URL. Unset means records live in process memory.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: String,
    pub countries_api_url: String,
    pub public_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            database_url: get("DATABASE_URL"),
            max_connections: get("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_CONNECTIONS)
                .max(1),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            countries_api_url: get("COUNTRIES_API_URL").unwrap_or_else(|| DEFAULT_COUNTRIES_API_URL.into()),
            public_dir: get("PUBLIC_DIR").unwrap_or_else(|| "public".into()),
        }
    }
}
