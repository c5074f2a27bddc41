//! Default values for submodule-sync configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Name of the submodule declaration file at the repository root.
pub const DEFAULT_GITMODULES: &str = ".gitmodules";

/// File the update run writes its JSON log to.
pub const DEFAULT_LOG_FILE: &str = "submodule_update_log.json";

/// Name of the per-repository configuration file.
pub const CONFIG_FILENAME: &str = ".submodule-sync.toml";

/// Time budget for a single git command.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Pause between two consecutive submodule updates.
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Parent folders scanned for orphaned submodule directories.
pub const DEFAULT_SCAN_DIRS: &[&str] = &["plugins", "scripts", "modules"];

/// Returns the user-level configuration file path.
///
/// Uses the platform-appropriate config directory:
/// - Linux: `~/.config/submodule-sync/config.toml` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/submodule-sync/config.toml`
/// - Windows: `{FOLDERID_RoamingAppData}\submodule-sync\config.toml`
///
/// Returns `None` when the platform config directory cannot be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("submodule-sync").join("config.toml"))
}
