//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::EvictionPolicyKind;
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Eviction algorithm, fixed for the cache's lifetime
    pub policy: EvictionPolicyKind,
    /// TTL for entries stored without an explicit one, None = never expire
    pub default_ttl: Option<Duration>,
    /// Background sweeper interval, None = sweeper disabled
    pub sweep_interval: Option<Duration>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_POLICY` - fifo, lru, lfu or lifo (default: lru)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds, 0 = none (default: none)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweeper interval in milliseconds, 0 = disabled (default: 1000)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let capacity = parse_var(&lookup, "CACHE_CAPACITY")?.unwrap_or(defaults.capacity);
        let policy = parse_var(&lookup, "CACHE_POLICY")?.unwrap_or(defaults.policy);
        let default_ttl = match parse_var::<u64, _>(&lookup, "CACHE_DEFAULT_TTL_MS")? {
            Some(ms) => millis(ms),
            None => defaults.default_ttl,
        };
        let sweep_interval = match parse_var::<u64, _>(&lookup, "CACHE_SWEEP_INTERVAL_MS")? {
            Some(ms) => millis(ms),
            None => defaults.sweep_interval,
        };

        let config = Self {
            capacity,
            policy,
            default_ttl,
            sweep_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no cache can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "CACHE_CAPACITY must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            policy: EvictionPolicyKind::Lru,
            default_ttl: None,
            sweep_interval: Some(Duration::from_secs(1)),
        }
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(|_| {
            CacheError::InvalidConfiguration(format!("{} has an invalid value '{}'", name, raw))
        }),
        _ => Ok(None),
    }
}
