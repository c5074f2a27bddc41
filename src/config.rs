//! # Configuration
//!
//! `SyncConfig` is the single configuration value every operation receives.
//! There is no global state: the CLI loads it once, applies flag overrides,
//! and passes it down.
//!
//! ## Lookup Order
//!
//! 1. An explicit path (`--config` or `SUBMODULE_SYNC_CONFIG`). A missing
//!    explicit file is an error.
//! 2. `<repo>/.submodule-sync.toml`
//! 3. `<user config dir>/submodule-sync/config.toml`
//! 4. Built-in defaults
//!
//! ## Format
//!
//! ```toml
//! gitmodules = ".gitmodules"
//! log_file = "submodule_update_log.json"
//! timeout_secs = 300
//! delay_ms = 500
//! scan_dirs = ["plugins", "scripts", "modules"]
//! ```
//!
//! Every key is optional; missing keys take their default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::defaults;
use crate::error::{Error, Result};

/// Configuration for a submodule-sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Submodule declaration file, relative to the repository root.
    pub gitmodules: PathBuf,
    /// JSON log written at the end of an update run, relative to the repository root.
    pub log_file: PathBuf,
    /// Time budget for each git command.
    pub timeout_secs: u64,
    /// Pause between two consecutive submodule updates.
    pub delay_ms: u64,
    /// Parent folders scanned for orphaned submodule directories.
    pub scan_dirs: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            gitmodules: PathBuf::from(defaults::DEFAULT_GITMODULES),
            log_file: PathBuf::from(defaults::DEFAULT_LOG_FILE),
            timeout_secs: defaults::DEFAULT_TIMEOUT_SECS,
            delay_ms: defaults::DEFAULT_DELAY_MS,
            scan_dirs: defaults::DEFAULT_SCAN_DIRS
                .iter()
                .map(|dir| dir.to_string())
                .collect(),
        }
    }
}

impl SyncConfig {
    /// Parse a configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse {
            message: e.message().to_string(),
            hint: Some(format!(
                "Valid keys are gitmodules, log_file, timeout_secs, delay_ms, scan_dirs (see {})",
                defaults::CONFIG_FILENAME
            )),
        })
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            Error::ConfigParse { message, hint } => Error::ConfigParse {
                message: format!("{}: {}", path.display(), message),
                hint,
            },
            other => other,
        })
    }

    /// Write the configuration to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Find and load the configuration that applies to `repo_root`.
    ///
    /// Returns the configuration together with the file it came from, or
    /// `None` when the built-in defaults are used.
    pub fn discover(repo_root: &Path, explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidates = std::iter::once(repo_root.join(defaults::CONFIG_FILENAME))
            .chain(defaults::user_config_path());

        for candidate in candidates {
            if candidate.is_file() {
                log::debug!("Loading configuration from {}", candidate.display());
                return Ok((Self::load(&candidate)?, Some(candidate)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Per-command time budget.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Pause between consecutive submodule updates.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.gitmodules, PathBuf::from(".gitmodules"));
        assert_eq!(config.log_file, PathBuf::from("submodule_update_log.json"));
        assert_eq!(config.timeout(), Duration::from_secs(300));
        assert_eq!(config.delay(), Duration::from_millis(500));
        assert_eq!(config.scan_dirs, vec!["plugins", "scripts", "modules"]);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = SyncConfig::parse("delay_ms = 0\nscan_dirs = [\"vendor\"]\n").unwrap();
        assert_eq!(config.delay_ms, 0);
        assert_eq!(config.scan_dirs, vec!["vendor"]);
        assert_eq!(config.timeout_secs, 300);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = SyncConfig::parse("retries = 3\n").unwrap_err();
        let display = err.to_string();
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        assert!(SyncConfig::parse("timeout_secs = \"soon\"\n").is_err());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let config = SyncConfig {
            timeout_secs: 42,
            delay_ms: 10,
            ..SyncConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = SyncConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_error_names_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        fs::write(&path, "timeout_secs = [").unwrap();

        let err = SyncConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_discover_prefers_repo_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(defaults::CONFIG_FILENAME),
            "timeout_secs = 7\n",
        )
        .unwrap();

        let (config, source) = SyncConfig::discover(temp.path(), None).unwrap();
        assert_eq!(config.timeout_secs, 7);
        assert_eq!(source, Some(temp.path().join(defaults::CONFIG_FILENAME)));
    }

    #[test]
    fn test_discover_explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        assert!(SyncConfig::discover(temp.path(), Some(&missing)).is_err());
    }
}
