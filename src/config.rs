//! Configuration management for the storefront.
//!
//! Loads configuration from environment variables with sensible defaults. Unparseable values fall back to
//! the default.

use crate::framework::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Actor mailboxes, read deadlines and read retries
    pub store: StoreConfig,
    /// Checkout engine settings
    pub checkout: CheckoutConfig,
}

/// Settings shared by the catalog, cart and order stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Mailbox capacity of each actor (default: 32)
    pub channel_buffer: usize,
    /// Deadline for a single read, in milliseconds (default: 2000)
    pub read_timeout_ms: u64,
    /// Attempts per read, including the first (default: 3)
    pub read_attempts: u32,
    /// Backoff before the first read retry, in milliseconds; doubled per retry (default: 25)
    pub retry_backoff_ms: u64,
}

/// Checkout engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Leading characters of every order number (default: "EC")
    pub order_prefix: String,
    /// Order-number generations tried before giving up (default: 5)
    pub order_number_attempts: u32,
}

impl StoreConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.read_attempts.max(1),
            initial_delay: Duration::from_millis(self.retry_backoff_ms),
            ..RetryPolicy::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            read_timeout_ms: 2000,
            read_attempts: 3,
            retry_backoff_ms: 25,
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            order_prefix: "EC".to_string(),
            order_number_attempts: 5,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source; missing keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| Parsed(lookup(key));

        Self {
            store: StoreConfig {
                channel_buffer: parsed("STOREFRONT_CHANNEL_BUFFER")
                    .get()
                    .filter(|&n: &usize| n > 0)
                    .unwrap_or(defaults.store.channel_buffer),
                read_timeout_ms: parsed("STOREFRONT_READ_TIMEOUT_MS")
                    .get()
                    .filter(|&n: &u64| n > 0)
                    .unwrap_or(defaults.store.read_timeout_ms),
                read_attempts: parsed("STOREFRONT_READ_ATTEMPTS")
                    .get()
                    .unwrap_or(defaults.store.read_attempts),
                retry_backoff_ms: parsed("STOREFRONT_RETRY_BACKOFF_MS")
                    .get()
                    .unwrap_or(defaults.store.retry_backoff_ms),
            },
            checkout: CheckoutConfig {
                order_prefix: lookup("STOREFRONT_ORDER_PREFIX")
                    .unwrap_or(defaults.checkout.order_prefix),
                order_number_attempts: parsed("STOREFRONT_ORDER_NUMBER_ATTEMPTS")
                    .get()
                    .filter(|&n: &u32| n > 0)
                    .unwrap_or(defaults.checkout.order_number_attempts),
            },
        }
    }
}

/// A raw variable value, parsed on demand into whatever type the field needs.
struct Parsed(Option<String>);

impl Parsed {
    fn get<T: FromStr>(self) -> Option<T> {
        self.0.and_then(|s| s.trim().parse().ok())
    }
}
