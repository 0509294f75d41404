//! Process configuration, read from `SHOPFRONT_*` environment variables.

use thiserror::Error;

use shopfront_catalog::Catalog;
use shopfront_observability::{LogFormat, LogSettings};
use shopfront_orders::OrderBook;

pub const PRODUCT_ID_BASE_VAR: &str = "SHOPFRONT_PRODUCT_ID_BASE";
pub const ORDER_ID_BASE_VAR: &str = "SHOPFRONT_ORDER_ID_BASE";
pub const LOG_VAR: &str = "SHOPFRONT_LOG";
pub const LOG_FORMAT_VAR: &str = "SHOPFRONT_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Settings for a [`Shop`](crate::Shop) and its logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// First id handed out to products.
    pub product_id_base: u64,
    /// First id handed out to orders.
    pub order_id_base: u64,
    pub log: LogSettings,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            product_id_base: Catalog::DEFAULT_ID_BASE,
            order_id_base: OrderBook::DEFAULT_ID_BASE,
            log: LogSettings::default(),
        }
    }
}

impl ShopConfig {
    /// Read the configuration from the process environment; unset variables
    /// keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ShopConfig::from_env`] but with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(PRODUCT_ID_BASE_VAR) {
            config.product_id_base = parse_id_base(PRODUCT_ID_BASE_VAR, &raw)?;
        }
        if let Some(raw) = lookup(ORDER_ID_BASE_VAR) {
            config.order_id_base = parse_id_base(ORDER_ID_BASE_VAR, &raw)?;
        }
        if let Some(raw) = lookup(LOG_VAR) {
            let filter = raw.trim();
            if filter.is_empty() {
                return Err(ConfigError::Invalid {
                    key: LOG_VAR,
                    reason: "filter directive must not be empty".to_string(),
                });
            }
            config.log.filter = filter.to_string();
        }
        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log.format = raw
                .parse::<LogFormat>()
                .map_err(|reason| ConfigError::Invalid {
                    key: LOG_FORMAT_VAR,
                    reason,
                })?;
        }

        Ok(config)
    }
}

fn parse_id_base(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
