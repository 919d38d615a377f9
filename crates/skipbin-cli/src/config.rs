//! Configuration file handling for the CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skipbin_domain::RetentionPolicy;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration, stored as TOML.
///
/// All retention fields are optional; omitting one leaves that axis
/// unlimited, mirroring the policy's `None` sentinels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Trash root directory; defaults to `<local data dir>/skipbin`
    #[serde(default)]
    pub base_path: Option<PathBuf>,

    /// Max age in days before a trashed file is purged
    #[serde(default)]
    pub retention_days: Option<u32>,

    /// Max cumulative bytes kept in the bin
    #[serde(default)]
    pub retention_bytes: Option<u64>,

    /// Max number of files kept in the bin
    #[serde(default)]
    pub retention_file_count: Option<usize>,

    /// Delete physical trash files with no metadata record
    #[serde(default)]
    pub delete_rogue_files: bool,

    /// Run cleanup automatically when the interval has elapsed
    #[serde(default)]
    pub auto_cleanup: bool,

    /// Minimum hours between automatic cleanups
    #[serde(default = "default_interval")]
    pub cleanup_interval_hours: u32,
}

fn default_interval() -> u32 {
    1
}

impl Config {
    /// Default config file location: `<config dir>/skipbin/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("skipbin").join("config.toml"))
    }

    /// Load the config from `path`, or from the default location
    ///
    /// A missing file yields the default configuration; an unreadable or
    /// malformed file is an error - a policy the host cannot read should
    /// surface, not be silently defaulted.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("malformed config file {}", path.display()))
    }

    /// Resolve the effective trash root, preferring the CLI override
    pub fn resolve_base(&self, override_base: Option<PathBuf>) -> Result<PathBuf> {
        override_base
            .or_else(|| self.base_path.clone())
            .or_else(|| dirs::data_local_dir().map(|d| d.join("skipbin")))
            .context("no trash root configured; pass --base or set base_path in the config")
    }

    /// Build the retention policy for the given trash root
    pub fn to_policy(&self, base: PathBuf) -> RetentionPolicy {
        let mut policy = RetentionPolicy::new(base).with_delete_rogue_files(self.delete_rogue_files);
        if let Some(days) = self.retention_days {
            policy = policy.with_retention_days(days);
        }
        if let Some(bytes) = self.retention_bytes {
            policy = policy.with_retention_bytes(bytes);
        }
        if let Some(count) = self.retention_file_count {
            policy = policy.with_retention_file_count(count);
        }
        if self.auto_cleanup {
            policy = policy.with_auto_cleanup(self.cleanup_interval_hours);
        }
        policy
    }
}
