//! # Configuration
//!
//! Runtime configuration for the Grocer binary.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults (`grocer_core::primitives`)
//! 2. Optional TOML file (`--config <path>`)
//! 3. Environment: `GROCER_CORS_ORIGINS`, `GROCER_RATE_LIMIT`
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! cors_origins = ["http://localhost:3000"]
//! rate_limit = 100
//!
//! [pricing]
//! delivery = 2500      # paise
//! handling = 500       # paise
//! tax_percent = 18
//!
//! [checkout]
//! processing_delay_ms = 2000
//! redirect_delay_ms = 2000
//!
//! [cart]
//! zero_quantity = "retain"   # or "remove"
//! ```

use grocer_core::primitives::{
    DELIVERY_CHARGE, HANDLING_CHARGE, PAYMENT_PROCESSING_DELAY_MS, REDIRECT_DELAY_MS, TAX_PERCENT,
};
use grocer_core::{Money, PricingPolicy, StorefrontOptions, ZeroQuantityPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding `server.cors_origins` (comma-separated, or `*`).
pub const ENV_CORS_ORIGINS: &str = "GROCER_CORS_ORIGINS";

/// Environment variable overriding `server.rate_limit` (requests/second, 0 disables).
pub const ENV_RATE_LIMIT: &str = "GROCER_RATE_LIMIT";

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Cannot render config: {0}")]
    Render(#[from] toml::ser::Error),
}

// =============================================================================
// SECTIONS
// =============================================================================

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means localhost only; `["*"]` allows all.
    pub cors_origins: Vec<String>,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
            rate_limit: 100,
        }
    }
}

/// `[pricing]`, amounts in paise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub delivery: u64,
    pub handling: u64,
    pub tax_percent: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            delivery: DELIVERY_CHARGE.paise(),
            handling: HANDLING_CHARGE.paise(),
            tax_percent: TAX_PERCENT,
        }
    }
}

impl From<PricingConfig> for PricingPolicy {
    fn from(config: PricingConfig) -> Self {
        Self {
            delivery_charge: Money::from_paise(config.delivery),
            handling_charge: Money::from_paise(config.handling),
            tax_percent: config.tax_percent,
        }
    }
}

/// `[checkout]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub processing_delay_ms: u64,
    pub redirect_delay_ms: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: PAYMENT_PROCESSING_DELAY_MS,
            redirect_delay_ms: REDIRECT_DELAY_MS,
        }
    }
}

impl CheckoutConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// `[cart]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    pub zero_quantity: ZeroQuantityPolicy,
}

// =============================================================================
// CONFIG
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub pricing: PricingConfig,
    pub checkout: CheckoutConfig,
    pub cart: CartConfig,
}

impl Config {
    /// Load configuration from an optional file, then apply process
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Read and parse a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(origins) = lookup(ENV_CORS_ORIGINS) {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(value) = lookup(ENV_RATE_LIMIT) {
            self.server.rate_limit = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_RATE_LIMIT,
                value,
            })?;
        }
        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Storefront tunables taken from this configuration.
    pub fn storefront_options(&self) -> StorefrontOptions {
        StorefrontOptions {
            pricing: self.pricing.into(),
            zero_quantity: self.cart.zero_quantity,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
