//! # Error Handling
//!
//! This module defines the centralized error type for `submodule-sync`. It
//! uses the `thiserror` library to describe every failure the library can
//! report, with enough context (command line, path, hint) to print a useful
//! message.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum covering all failure modes:
//!   - Git command execution failures (non-zero exit or spawn failure).
//!   - Command timeouts.
//!   - Configuration parsing errors.
//!   - I/O, JSON and TOML serialization errors wrapped from their source
//!     crates.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Most of these errors never reach the user as a failure of the tool
//! itself: the update executor and the orphan cleaner turn them into
//! per-submodule result records (see [`Error::detail`]).

use thiserror::Error;

/// Main error type for submodule-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// A git command could not be spawned or exited with a non-zero status.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// A command did not finish within its time budget and was killed.
    #[error("Command timed out after {seconds}s: {command}")]
    Timeout { command: String, seconds: u64 },

    /// An error occurred while parsing the tool's configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML serialization error, wrapped from `toml::ser::Error`.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// The short message recorded in an update result.
    ///
    /// For failed git commands this is git's own stderr, which is what a user
    /// needs to see next to the submodule path. Other errors use their full
    /// display text.
    pub fn detail(&self) -> String {
        match self {
            Error::GitCommand { stderr, .. } if !stderr.is_empty() => stderr.clone(),
            other => other.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
