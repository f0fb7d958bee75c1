//! Query configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! key_prefix = "documents"
//! fan_out = 4
//! max_depth = 64
//! cycle_policy = "fail"
//!
//! # Opt-in; documents in a store are expected to be immutable
//! [cache]
//! enabled = true
//! dir = ".certiq/cache"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{QueryError, Result};

pub const DEFAULT_FAN_OUT: usize = 4;
pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_CACHE_DIR: &str = ".certiq/cache";

/// What to do when a connection leads back to a document on the current branch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Abort the query with `CycleDetected`
    #[default]
    Fail,
    /// Drop the offending connection and carry on
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Prefix joined to document ids to build store keys
    pub key_prefix: String,
    /// Sibling connections fetched concurrently; 1 means sequential
    pub fan_out: usize,
    pub max_depth: usize,
    pub cycle_policy: CyclePolicy,
    pub cache: CacheConfig,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            key_prefix: String::new(),
            fan_out: DEFAULT_FAN_OUT,
            max_depth: DEFAULT_MAX_DEPTH,
            cycle_policy: CyclePolicy::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl QueryConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns `Config` on malformed TOML or out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: QueryConfig = toml::from_str(text).map_err(|e| QueryError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file from disk
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Config` if it is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| QueryError::Io {
            op: format!("read_config {}", path.display()),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// Returns `Config` when `fan_out` or `max_depth` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.fan_out == 0 {
            return Err(QueryError::Config {
                message: "fan_out must be at least 1".to_string(),
            });
        }
        if self.max_depth == 0 {
            return Err(QueryError::Config {
                message: "max_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }
}
