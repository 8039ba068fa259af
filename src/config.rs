//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

use crate::domain::CategoryWeights;
use crate::domain::line_item_store::DEFAULT_STORE_CAPACITY;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Deployment environment name (`development`, `production`, ...).
    pub environment: String,

    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Upper bound on handling a single request.
    pub request_timeout: Duration,

    /// Maximum number of line items kept in memory.
    pub max_line_items: usize,

    /// Category affinity weights used by the auction.
    pub category_weights: CategoryWeights,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` cannot be parsed as a
    /// [`SocketAddr`] or `CATEGORY_WEIGHTS` is not a valid
    /// `label=weight,...` list.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("LISTEN_ADDR is not a socket address")?;

        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let request_timeout = Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30));
        let max_line_items = parse_env("MAX_LINE_ITEMS", DEFAULT_STORE_CAPACITY);

        let category_weights = match std::env::var("CATEGORY_WEIGHTS") {
            Ok(raw) => raw
                .parse::<CategoryWeights>()
                .context("CATEGORY_WEIGHTS is malformed")?,
            Err(_) => CategoryWeights::default(),
        };

        Ok(Self {
            listen_addr,
            environment,
            log_level,
            request_timeout,
            max_line_items,
            category_weights,
        })
    }

    /// Returns `true` when running with `APP_ENV=production`.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
