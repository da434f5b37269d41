//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults match the shop's launch policy.
//!
//! - `SCOOP_TAX_RATE` - Sales tax rate applied after discounts (default: 0.08)
//! - `SCOOP_SHIPPING_FEE` - Flat shipping fee in dollars (default: 5.99)
//! - `SCOOP_FREE_SHIPPING_THRESHOLD` - Discounted subtotal that must be
//!   strictly exceeded for free shipping (default: 50)
//! - `SCOOP_SHIP_EMPTY_CARTS` - Whether a zero-item cart still incurs the
//!   shipping fee (default: true)
//! - `SCOOP_NOTICE_TTL_MS` - How long a notification stays visible
//!   (default: 3000)
//! - `SCOOP_COMMIT_DELAY_MS` - Simulated latency before a cart mutation
//!   commits (default: 300)
//! - `SCOOP_PROMO_DELAY_MS` - Simulated latency for promo validation
//!   (default: 1000)
//! - `SCOOP_DATA_DIR` - Directory for file-backed persistence; memory-only
//!   when unset

use std::path::PathBuf;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing::PricingPolicy;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Pricing policy (tax, shipping, thresholds)
    pub pricing: PricingPolicy,
    /// How long a notification stays visible before auto-expiring
    pub notice_ttl: Duration,
    /// Simulated latency before a cart mutation commits
    pub commit_delay: Duration,
    /// Simulated latency for promo code validation
    pub promo_delay: Duration,
    /// Directory for file-backed persistence, if any
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pricing: PricingPolicy::default(),
            notice_ttl: Duration::from_millis(3000),
            commit_delay: Duration::from_millis(300),
            promo_delay: Duration::from_millis(1000),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let pricing = PricingPolicy {
            tax_rate: get_decimal_or("SCOOP_TAX_RATE", "0.08")?,
            shipping_fee: get_decimal_or("SCOOP_SHIPPING_FEE", "5.99")?,
            free_shipping_threshold: get_decimal_or("SCOOP_FREE_SHIPPING_THRESHOLD", "50")?,
            ship_empty_carts: get_bool_or("SCOOP_SHIP_EMPTY_CARTS", true)?,
        };

        Ok(Self {
            pricing,
            notice_ttl: get_millis_or("SCOOP_NOTICE_TTL_MS", 3000)?,
            commit_delay: get_millis_or("SCOOP_COMMIT_DELAY_MS", 300)?,
            promo_delay: get_millis_or("SCOOP_PROMO_DELAY_MS", 1000)?,
            data_dir: get_optional_env("SCOOP_DATA_DIR").map(PathBuf::from),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a decimal environment variable with a default.
fn get_decimal_or(key: &str, default: &str) -> Result<Decimal, ConfigError> {
    get_env_or_default(key, default)
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a boolean environment variable with a default.
fn get_bool_or(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse::<bool>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

/// Parse a millisecond duration environment variable with a default.
fn get_millis_or(key: &str, default: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(Duration::from_millis(default)),
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}
