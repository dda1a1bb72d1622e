//! Configuration Module
//!
//! Cache and server settings, loadable from environment variables.

use std::env;
use std::time::Duration;

/// Default TTL applied when `set` is called without one (one hour).
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Default namespace prefix for backend keys.
pub const DEFAULT_KEY_PREFIX: &str = "cache:";

/// Expiration engine settings.
///
/// # Example
///
/// ```rust
/// use ttl_overlay::CacheConfig;
/// use std::time::Duration;
///
/// let config = CacheConfig::default()
///     .with_default_ttl(Some(60))
///     .with_sweep_period(Some(Duration::from_secs(30)))
///     .with_key_prefix("sessions:");
/// assert_eq!(config.key_prefix, "sessions:");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL in seconds for entries set without one; None = never expire
    pub default_ttl: Option<u64>,
    /// Interval between sweep passes; None or zero disables the sweep
    pub sweep_period: Option<Duration>,
    /// Prefix namespacing every backend key
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Some(DEFAULT_TTL_SECS),
            sweep_period: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default TTL in seconds (`None` = entries never expire by default).
    pub fn with_default_ttl(mut self, ttl: Option<u64>) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Sets the sweep period (`None` or zero disables the sweep).
    pub fn with_sweep_period(mut self, period: Option<Duration>) -> Self {
        self.sweep_period = period;
        self
    }

    /// Sets the key namespace prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// The sweep period if the sweep is enabled.
    pub fn effective_sweep_period(&self) -> Option<Duration> {
        self.sweep_period.filter(|period| !period.is_zero())
    }

    /// Loads cache settings from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds, `none` for no expiry (default: 3600)
    /// - `SWEEP_PERIOD` (or `CHECK_PERIOD`) - Sweep interval in seconds, 0 disables (default: off)
    /// - `KEY_PREFIX` - Namespace prefix (default: `cache:`)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_ttl = match env::var("DEFAULT_TTL") {
            Ok(raw) => parse_nullable_secs(&raw).unwrap_or(defaults.default_ttl),
            Err(_) => defaults.default_ttl,
        };

        let sweep_period = env::var("SWEEP_PERIOD")
            .or_else(|_| env::var("CHECK_PERIOD"))
            .ok()
            .and_then(|raw| parse_nullable_secs(&raw))
            .flatten()
            .map(Duration::from_secs);

        Self {
            default_ttl,
            sweep_period,
            key_prefix: env::var("KEY_PREFIX").unwrap_or(defaults.key_prefix),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server port
    pub server_port: u16,
    /// Settings for the served cache
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads server and cache settings from environment variables.
    ///
    /// In addition to the [`CacheConfig::from_env`] variables:
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cache: CacheConfig::from_env(),
        }
    }
}

/// Parses seconds where `none`/`null`/empty mean "unset".
///
/// Returns `None` when the text is neither.
fn parse_nullable_secs(raw: &str) -> Option<Option<u64>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("null") {
        return Some(None);
    }
    raw.parse().ok().map(Some)
}
