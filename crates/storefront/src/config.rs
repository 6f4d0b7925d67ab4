//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string, falls back to
//!   `DATABASE_URL`. Without either the catalog and sessions live in memory.
//! - `STOREFRONT_ORDER_PHONE` - WhatsApp number orders are sent to, digits
//!   only in international format (default: 33651398493)
//! - `STOREFRONT_SEED_CATALOG` - Seed the in-memory catalog with demo
//!   products (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use boutique_core::OrderHandoff;
use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_ORDER_PHONE: &str = "33651398493";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Where composed orders are sent
    pub order_handoff: OrderHandoff,
    /// Seed the in-memory catalog on startup
    pub seed_catalog: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env { lookup: &lookup };

        let host = env
            .or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("STOREFRONT_HOST", e))?;
        let port = env
            .or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("STOREFRONT_PORT", e))?;
        let base_url = env.or_default("STOREFRONT_BASE_URL", "http://localhost:3000");

        let order_phone = env.or_default("STOREFRONT_ORDER_PHONE", DEFAULT_ORDER_PHONE);
        let order_handoff =
            OrderHandoff::new(&order_phone).map_err(|e| invalid("STOREFRONT_ORDER_PHONE", e))?;

        let seed_catalog = parse_bool(
            "STOREFRONT_SEED_CATALOG",
            &env.or_default("STOREFRONT_SEED_CATALOG", "true"),
        )?;

        Ok(Self {
            database_url: env.database_url("STOREFRONT_DATABASE_URL"),
            host,
            port,
            base_url,
            order_handoff,
            seed_catalog,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate(
                "SENTRY_SAMPLE_RATE",
                &env.or_default("SENTRY_SAMPLE_RATE", "1.0"),
            )?,
            sentry_traces_sample_rate: parse_rate(
                "SENTRY_TRACES_SAMPLE_RATE",
                &env.or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0"),
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F: Fn(&str) -> Option<String>> {
    lookup: &'a F,
}

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable, treating an empty value as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
    fn database_url(&self, primary_key: &str) -> Option<SecretString> {
        self.optional(primary_key)
            .or_else(|| self.optional("DATABASE_URL"))
            .map(SecretString::from)
    }
}

fn invalid(key: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {other:?}"),
        )),
    }
}

fn parse_rate(key: &str, value: &str) -> Result<f32, ConfigError> {
    let rate = value
        .parse::<f32>()
        .map_err(|e| invalid(key, e))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn invalid_key(err: ConfigError) -> String {
        match err {
            ConfigError::InvalidEnvVar(key, _) => key,
        }
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.order_handoff.phone(), DEFAULT_ORDER_PHONE);
        assert!(config.database_url.is_none());
        assert!(config.seed_catalog);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://fly/db")]).unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://fly/db"
        );

        let config = load(&[
            ("DATABASE_URL", "postgres://fly/db"),
            ("STOREFRONT_DATABASE_URL", "postgres://local/db"),
        ])
        .unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://local/db"
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "http")]).unwrap_err();
        assert_eq!(invalid_key(err), "STOREFRONT_PORT");
    }

    #[test]
    fn test_invalid_order_phone() {
        let err = load(&[("STOREFRONT_ORDER_PHONE", "+33 6 51 39")]).unwrap_err();
        assert_eq!(invalid_key(err), "STOREFRONT_ORDER_PHONE");
    }

    #[test]
    fn test_seed_catalog_flag() {
        assert!(!load(&[("STOREFRONT_SEED_CATALOG", "false")]).unwrap().seed_catalog);
        assert!(load(&[("STOREFRONT_SEED_CATALOG", "maybe")]).is_err());
    }

    #[test]
    fn test_sample_rate_bounds() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        let config = load(&[("SENTRY_TRACES_SAMPLE_RATE", "0.25")]).unwrap();
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_secure_cookies_follow_base_url() {
        let config = load(&[("STOREFRONT_BASE_URL", "https://shop.example.com")]).unwrap();
        assert!(config.is_secure());
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let vars = [("STOREFRONT_DATABASE_URL", "postgres://user:hunter2@db/shop")];
        let config = load(&vars).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
