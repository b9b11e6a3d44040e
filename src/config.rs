//! Configuration for rowgate
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{Result, StoreError};

/// Column family applied to bare (unqualified) column keys.
///
/// Deployments that group their qualifiers differently override this via
/// [`ConfigBuilder::default_family`].
pub const DEFAULT_FAMILY: &str = "d";

/// Main configuration for a rowgate client pool
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Addressing Configuration
    // -------------------------------------------------------------------------
    /// Family assumed for column keys written without a `family:` prefix
    pub default_family: String,

    // -------------------------------------------------------------------------
    // Pool Configuration
    // -------------------------------------------------------------------------
    /// Hard upper bound on concurrently live connections
    pub max_connections: usize,

    /// Connections pre-warmed at pool construction
    pub min_connections: usize,

    /// How long an acquire may wait for a free connection
    pub acquire_timeout: Duration,

    /// How long a parked connection may sit idle before eviction
    pub idle_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_family: DEFAULT_FAMILY.to_string(),
            max_connections: 100,
            min_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration for internally inconsistent values
    pub fn validate(&self) -> Result<()> {
        if self.default_family.is_empty() {
            return Err(StoreError::Config(
                "default column family must not be empty".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(StoreError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(StoreError::Config(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the family applied to unqualified column keys
    pub fn default_family(mut self, family: impl Into<String>) -> Self {
        self.config.default_family = family.into();
        self
    }

    /// Set the maximum number of concurrently live connections
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the number of connections pre-warmed at construction
    pub fn min_connections(mut self, count: usize) -> Self {
        self.config.min_connections = count;
        self
    }

    /// Set how long an acquire may wait for a free connection
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.config.acquire_timeout = timeout;
        self
    }

    /// Set how long a parked connection may sit idle before eviction
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
