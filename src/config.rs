//! Pool configuration.
//!
//! Configuration fields are accepted and validated but not enforced by the
//! pool in this version: the pool never caps its size, never expires idle
//! connections, and never times out an acquisition. The fields exist so that
//! callers can carry their intent through configuration today and enforcement
//! can be added without an API break.

use crate::error::{DbError, DbResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_POOL_SIZE: u32 = 10;
pub const DEFAULT_TIME_TO_LIVE_SECS: u64 = 600;
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 30;

/// Connection pool configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum connections in the pool (default: 10). Not enforced.
    pub max_pool_size: Option<u32>,
    /// Idle connection time-to-live in seconds (default: 600). Not enforced.
    pub time_to_live_secs: Option<u64>,
    /// Acquisition wait timeout in seconds (default: 30). Not enforced.
    pub wait_timeout_secs: Option<u64>,
}

impl PoolConfig {
    /// Get max_pool_size with default value.
    pub fn max_pool_size_or_default(&self) -> u32 {
        self.max_pool_size.unwrap_or(DEFAULT_MAX_POOL_SIZE)
    }

    /// Get time_to_live with default value.
    pub fn time_to_live_or_default(&self) -> u64 {
        self.time_to_live_secs.unwrap_or(DEFAULT_TIME_TO_LIVE_SECS)
    }

    /// Get wait_timeout with default value.
    pub fn wait_timeout_or_default(&self) -> u64 {
        self.wait_timeout_secs.unwrap_or(DEFAULT_WAIT_TIMEOUT_SECS)
    }

    /// Validate pool options.
    pub fn validate(&self) -> DbResult<()> {
        if let Some(max) = self.max_pool_size {
            if max == 0 {
                return Err(DbError::invalid_config(
                    "max_pool_size must be greater than 0",
                ));
            }
        }
        if let Some(ttl) = self.time_to_live_secs {
            if ttl == 0 {
                return Err(DbError::invalid_config(
                    "time_to_live_secs must be greater than 0",
                ));
            }
        }
        if let Some(wait) = self.wait_timeout_secs {
            if wait == 0 {
                return Err(DbError::invalid_config(
                    "wait_timeout_secs must be greater than 0",
                ));
            }
        }
        Ok(())
    }
}
