//! # Update Executor
//!
//! Brings each submodule to the tip of its remote branch:
//!
//! ```text
//! uninitialized --init--> initialized --update|force_update--> up to date / has changes
//! ```
//!
//! A failed init ends that submodule's pass; the update step is not
//! attempted. Every failure (non-zero exit, timeout, spawn error) becomes an
//! [`UpdateResult`] with `success = false`; nothing propagates to the caller.
//!
//! ## Retry
//!
//! The first attempt processes every submodule. Each later attempt processes
//! only the paths that are still failing, and its results replace the earlier
//! results for the same paths in place. The loop ends when nothing fails,
//! when `skip_failed` is set, or after `retry_count` attempts.
//!
//! Updates are strictly sequential with a fixed delay between consecutive
//! submodules to go easy on the remote.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use crate::backend::SubmoduleBackend;
use crate::status::SubmoduleEntry;

/// The git operation an [`UpdateResult`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateAction {
    Init,
    Update,
    ForceUpdate,
}

/// Outcome of processing one submodule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub path: String,
    pub success: bool,
    pub action: UpdateAction,
    /// Seconds spent on this submodule, init included.
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Options for an update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Pass `--force` to `git submodule update`.
    pub force: bool,
    /// Do not retry failed submodules.
    pub skip_failed: bool,
    /// Total number of attempts, at least 1.
    pub retry_count: u32,
    /// Pause between consecutive submodules within an attempt.
    pub delay: Duration,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            force: false,
            skip_failed: false,
            retry_count: 1,
            delay: Duration::from_millis(crate::defaults::DEFAULT_DELAY_MS),
        }
    }
}

/// Progress callbacks for an update run.
///
/// All methods default to doing nothing.
pub trait UpdateObserver {
    /// An attempt is starting. `attempt` is 1-based.
    fn attempt_started(&mut self, _attempt: u32, _pending: usize) {}

    /// `entry` is about to be processed; `index` is 0-based within the attempt.
    fn submodule_started(&mut self, _index: usize, _total: usize, _entry: &SubmoduleEntry) {}

    /// The init step is running for `entry`.
    fn initializing(&mut self, _entry: &SubmoduleEntry) {}

    fn submodule_finished(&mut self, _result: &UpdateResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl UpdateObserver for Silent {}

/// Process a single submodule: init if needed, then update.
pub fn update_submodule<B, O>(
    backend: &B,
    entry: &SubmoduleEntry,
    force: bool,
    observer: &mut O,
) -> UpdateResult
where
    B: SubmoduleBackend + ?Sized,
    O: UpdateObserver + ?Sized,
{
    let started = Instant::now();
    let path = entry.path.clone();

    if entry.is_uninitialized() {
        observer.initializing(entry);
        if let Err(e) = backend.init_submodule(&path) {
            log::warn!("init of {} failed: {}", path, e);
            return UpdateResult {
                path,
                success: false,
                action: UpdateAction::Init,
                duration: started.elapsed().as_secs_f64(),
                output: None,
                error: Some(e.detail()),
            };
        }
    }

    let action = if force {
        UpdateAction::ForceUpdate
    } else {
        UpdateAction::Update
    };

    match backend.update_submodule(&path, force) {
        Ok(output) => UpdateResult {
            path,
            success: true,
            action,
            duration: started.elapsed().as_secs_f64(),
            output: Some(output),
            error: None,
        },
        Err(e) => {
            log::warn!("update of {} failed: {}", path, e);
            UpdateResult {
                path,
                success: false,
                action,
                duration: started.elapsed().as_secs_f64(),
                output: None,
                error: Some(e.detail()),
            }
        }
    }
}

/// Run the update loop over `entries` and return one result per entry, in
/// entry order.
pub fn run_updates<B, O>(
    backend: &B,
    entries: &[SubmoduleEntry],
    options: &UpdateOptions,
    observer: &mut O,
) -> Vec<UpdateResult>
where
    B: SubmoduleBackend + ?Sized,
    O: UpdateObserver + ?Sized,
{
    let mut results: Vec<UpdateResult> = Vec::with_capacity(entries.len());
    let mut index_by_path: HashMap<String, usize> = HashMap::new();
    let mut pending: Vec<&SubmoduleEntry> = entries.iter().collect();

    for attempt in 1..=options.retry_count.max(1) {
        observer.attempt_started(attempt, pending.len());
        let total = pending.len();

        for (i, entry) in pending.iter().enumerate() {
            observer.submodule_started(i, total, entry);
            let result = update_submodule(backend, entry, options.force, observer);
            observer.submodule_finished(&result);

            match index_by_path.get(&result.path) {
                Some(&slot) => results[slot] = result,
                None => {
                    index_by_path.insert(result.path.clone(), results.len());
                    results.push(result);
                }
            }

            if i + 1 < total && !options.delay.is_zero() {
                thread::sleep(options.delay);
            }
        }

        let failed: Vec<&str> = results
            .iter()
            .filter(|r| !r.success)
            .map(|r| r.path.as_str())
            .collect();

        if failed.is_empty() || options.skip_failed {
            break;
        }

        pending = entries
            .iter()
            .filter(|entry| failed.contains(&entry.path.as_str()))
            .collect();
    }

    results
}
