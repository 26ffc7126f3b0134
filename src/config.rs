//! Configuration Module
//!
//! Handles loading and managing cache sizing from environment variables.

use std::env;

use crate::cache::{DEFAULT_MAX_CACHE_SIZE, DEFAULT_MAX_OBJECT_SIZE};

/// Proxy configuration parameters.
///
/// Cache sizing can be configured via environment variables with sensible
/// defaults. The listening port comes from the command line, not from here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Total byte budget for cached response bodies
    pub max_cache_size: usize,
    /// Maximum size in bytes of a single cached body
    pub max_object_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_CACHE_SIZE` - Total cache byte budget (default: 1049000)
    /// - `MAX_OBJECT_SIZE` - Per-entry byte limit (default: 102400)
    pub fn from_env() -> Self {
        Self {
            max_cache_size: env::var("MAX_CACHE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CACHE_SIZE),
            max_object_size: env::var("MAX_OBJECT_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_OBJECT_SIZE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
            max_object_size: DEFAULT_MAX_OBJECT_SIZE,
        }
    }
}
