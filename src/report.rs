//! # Update Log
//!
//! The JSON record of an update run, written to `submodule_update_log.json`
//! by default:
//!
//! ```json
//! {
//!   "timestamp": "2026-10-17T09:30:00.123456+02:00",
//!   "total_count": 2,
//!   "success_count": 1,
//!   "failed_count": 1,
//!   "total_duration": 3.4,
//!   "results": [ ... ]
//! }
//! ```
//!
//! A log is built once from the final results of a run and is not changed
//! afterwards. Saving replaces the file.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::executor::UpdateResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateLog {
    /// Local time the log was built, RFC 3339.
    pub timestamp: String,
    pub total_count: usize,
    pub success_count: usize,
    pub failed_count: usize,
    /// Sum of the per-submodule durations, in seconds.
    pub total_duration: f64,
    pub results: Vec<UpdateResult>,
}

impl UpdateLog {
    pub fn from_results(results: Vec<UpdateResult>) -> Self {
        let success_count = results.iter().filter(|r| r.success).count();
        Self {
            timestamp: Local::now().to_rfc3339(),
            total_count: results.len(),
            success_count,
            failed_count: results.len() - success_count,
            total_duration: results.iter().map(|r| r.duration).sum(),
            results,
        }
    }

    /// Write the log as pretty-printed JSON, replacing any previous file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| r.success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Mean duration of the successful updates, if there were any.
    pub fn average_success_duration(&self) -> Option<f64> {
        if self.success_count == 0 {
            return None;
        }
        let total: f64 = self.succeeded().map(|r| r.duration).sum();
        Some(total / self.success_count as f64)
    }

    /// A git command that retries every failed path, if any failed.
    pub fn retry_command(&self) -> Option<String> {
        let paths: Vec<String> = self.failed().map(|r| format!("\"{}\"", r.path)).collect();
        if paths.is_empty() {
            return None;
        }
        Some(format!(
            "git submodule update --init --recursive {}",
            paths.join(" ")
        ))
    }
}
