use std::env::{self, VarError};
use std::time::Duration;

use serde::Deserialize;

use crate::error::DbConnectionError;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Basic configuration for creating a SQLx connection pool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DbConnectionConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: Option<u64>,
}

impl Default for DbConnectionConfig {
    #[inline]
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            idle_timeout_secs: Some(DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }
}

impl DbConnectionConfig {
    /// Creates a new configuration with the provided URL and sane defaults.
    #[inline]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Single-connection in-memory database. Every SQLite `:memory:`
    /// connection is its own database, so the pool must never open a second one.
    pub fn in_memory() -> Self {
        Self {
            max_connections: 1,
            min_connections: 1,
            idle_timeout_secs: None,
            ..Self::new("sqlite::memory:")
        }
    }

    /// Applies pool tuning from environment variables using the supplied
    /// prefix, then checks the resulting pool bounds.
    ///
    /// Recognised variables (all optional):
    /// - `{PREFIX}_DB_MAX_CONNECTIONS`
    /// - `{PREFIX}_DB_MIN_CONNECTIONS`
    /// - `{PREFIX}_DB_CONNECT_TIMEOUT_SECS`
    /// - `{PREFIX}_DB_IDLE_TIMEOUT_SECS`
    pub fn with_env_overrides(mut self, prefix: &str) -> Result<Self, DbConnectionError> {
        if let Some(max) = maybe_parse_env::<u32>(prefix, "DB_MAX_CONNECTIONS")? {
            self.max_connections = max;
        }
        if let Some(min) = maybe_parse_env::<u32>(prefix, "DB_MIN_CONNECTIONS")? {
            self.min_connections = min;
        }
        if let Some(secs) = maybe_parse_env::<u64>(prefix, "DB_CONNECT_TIMEOUT_SECS")? {
            self.connect_timeout_secs = secs;
        }
        if let Some(secs) = maybe_parse_env::<u64>(prefix, "DB_IDLE_TIMEOUT_SECS")? {
            self.idle_timeout_secs = Some(secs);
        }

        self.validate(prefix)?;
        Ok(self)
    }

    fn validate(&self, prefix: &str) -> Result<(), DbConnectionError> {
        if self.max_connections == 0 {
            return Err(DbConnectionError::InvalidPoolSetting {
                var: format!("{prefix}_DB_MAX_CONNECTIONS"),
                reason: "max_connections must be greater than 0".to_owned(),
            });
        }
        if self.min_connections > self.max_connections {
            return Err(DbConnectionError::InvalidPoolSetting {
                var: format!("{prefix}_DB_MIN_CONNECTIONS"),
                reason: "min_connections must not exceed max_connections".to_owned(),
            });
        }
        Ok(())
    }

    #[inline]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[inline]
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}

fn maybe_parse_env<T>(prefix: &str, suffix: &str) -> Result<Option<T>, DbConnectionError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let var_name = format!("{prefix}_{suffix}");
    match env::var(&var_name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse::<T>()
                    .map(Some)
                    .map_err(|source| DbConnectionError::InvalidNumber {
                        var: var_name,
                        source,
                    })
            }
        }
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(DbConnectionError::InvalidUnicode(var_name)),
    }
}
