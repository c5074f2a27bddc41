//! # Update Command Implementation
//!
//! This module implements the `update` subcommand, which is also what runs
//! when `submodule-sync` is invoked without a subcommand.
//!
//! ## Functionality
//!
//! - **Optional Cleanup**: With `--clean`, orphaned submodule directories are
//!   removed first (after confirmation, or immediately with `--yes`).
//! - **Status Overview**: Every declared submodule is classified and the
//!   counts per state are printed.
//! - **Update**: Uninitialized submodules are initialized, then every
//!   submodule is moved to the tip of its remote branch (`--force` passes
//!   `--force` to git).
//! - **Retry**: `--retry N` makes up to N attempts, each one re-running only
//!   the submodules that are still failing. `--skip-failed` stops after the
//!   first attempt.
//! - **Log**: The final results are written to `submodule_update_log.json`
//!   (or `--log-file`), replacing any previous log.
//!
//! Submodule failures never make the command fail: they are reported inline
//! and in the summary, and the exit code stays 0.

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use submodule_sync::backend::SubmoduleBackend;
use submodule_sync::config::SyncConfig;
use submodule_sync::executor::{self, UpdateObserver, UpdateOptions, UpdateResult};
use submodule_sync::output::{Glyph, OutputConfig};
use submodule_sync::report::UpdateLog;
use submodule_sync::status::{self, StatusCounts, SubmoduleEntry};

use crate::cli::Context;
use crate::commands::{clean, status as status_cmd};

/// Initialize and update every submodule
#[derive(Args, Debug, Clone, Default)]
pub struct UpdateArgs {
    /// Force the update (git submodule update --force)
    #[arg(long)]
    pub force: bool,

    /// Do not retry failed submodules
    #[arg(long)]
    pub skip_failed: bool,

    /// Number of attempts for failing submodules [default: 1]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub retry: Option<u32>,

    /// Remove directories that are not in .gitmodules before updating
    #[arg(long)]
    pub clean: bool,

    /// Do not ask before deleting orphaned directories
    #[arg(short, long)]
    pub yes: bool,

    /// Time budget for each git command, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Pause between two submodules, in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Where to write the JSON log, relative to the repository root
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl UpdateArgs {
    /// Total number of attempts.
    pub fn retry_count(&self) -> u32 {
        self.retry.unwrap_or(1)
    }

    /// Whether any flag was given.
    pub fn is_set(&self) -> bool {
        self.force
            || self.skip_failed
            || self.clean
            || self.yes
            || self.retry.is_some()
            || self.timeout.is_some()
            || self.delay_ms.is_some()
            || self.log_file.is_some()
    }

    /// Combine with the flags given before the subcommand name; flags given
    /// after it take precedence.
    pub fn or(self, outer: UpdateArgs) -> UpdateArgs {
        UpdateArgs {
            force: self.force || outer.force,
            skip_failed: self.skip_failed || outer.skip_failed,
            retry: self.retry.or(outer.retry),
            clean: self.clean || outer.clean,
            yes: self.yes || outer.yes,
            timeout: self.timeout.or(outer.timeout),
            delay_ms: self.delay_ms.or(outer.delay_ms),
            log_file: self.log_file.or(outer.log_file),
        }
    }

    /// The configuration with this command's flags applied on top.
    pub fn effective_config(&self, base: &SyncConfig) -> SyncConfig {
        let mut config = base.clone();
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(delay) = self.delay_ms {
            config.delay_ms = delay;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = log_file.clone();
        }
        config
    }

    fn options(&self, config: &SyncConfig) -> UpdateOptions {
        UpdateOptions {
            force: self.force,
            skip_failed: self.skip_failed,
            retry_count: self.retry_count(),
            delay: config.delay(),
        }
    }
}

/// Prints one line per processed submodule, with a spinner on terminals.
struct ConsoleObserver {
    output: OutputConfig,
    spinner: Option<ProgressBar>,
    current: String,
    initializing: bool,
}

impl ConsoleObserver {
    fn new(output: OutputConfig) -> Self {
        let spinner = output.interactive.then(|| {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        });
        Self {
            output,
            spinner,
            current: String::new(),
            initializing: false,
        }
    }

    fn println(&self, line: String) {
        match &self.spinner {
            Some(spinner) => spinner.println(line),
            None => println!("{}", line),
        }
    }

    fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

impl UpdateObserver for ConsoleObserver {
    fn attempt_started(&mut self, attempt: u32, pending: usize) {
        if attempt == 1 {
            self.println(format!(
                "{} Updating all submodules...",
                self.output.glyph(Glyph::Sync)
            ));
        } else {
            self.println(format!(
                "\n{} Attempt {} (retrying {} failed submodules)",
                self.output.glyph(Glyph::Retry),
                attempt,
                pending
            ));
        }
    }

    fn submodule_started(&mut self, index: usize, total: usize, entry: &SubmoduleEntry) {
        self.current = format!("[{}/{}] {}", index + 1, total, entry.path);
        self.initializing = false;
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("{}...", self.current));
        }
    }

    fn initializing(&mut self, _entry: &SubmoduleEntry) {
        self.initializing = true;
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("{} (init)...", self.current));
        }
    }

    fn submodule_finished(&mut self, result: &UpdateResult) {
        let init = if self.initializing { " (init)" } else { "" };
        let (glyph, verdict) = if result.success {
            (Glyph::Ok, "done")
        } else if self.initializing && result.action == executor::UpdateAction::Init {
            (Glyph::Fail, "init failed")
        } else {
            (Glyph::Fail, "failed")
        };
        self.println(format!(
            "{}{} {} {} ({:.1}s)",
            self.current,
            init,
            self.output.glyph(glyph),
            verdict,
            result.duration
        ));
    }
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let out = &ctx.output;
    let config = args.effective_config(&ctx.config);

    println!("{} Updating git submodules", out.glyph(Glyph::Sync));
    println!("{}", "=".repeat(60));
    println!(
        "Options: force={}, skip_failed={}, clean={}, retry={}",
        args.force, args.skip_failed, args.clean, args.retry_count()
    );
    println!();

    if !ctx.repo.join(".git").exists() {
        println!(
            "{} {} is not a git repository",
            out.glyph(Glyph::Fail),
            ctx.repo.display()
        );
        return Ok(());
    }

    if args.clean {
        if let Err(e) = clean::clean_orphans(ctx, &config, args.yes) {
            println!("{} Cleanup failed: {:#}", out.glyph(Glyph::Fail), e);
        }
        println!();
    }

    let git = ctx.git(&config);
    println!("Reading submodule status...");
    let decls = match git.list_submodules() {
        Ok(decls) => decls,
        Err(e) => {
            println!(
                "{} Could not read {}: {}",
                out.glyph(Glyph::Fail),
                config.gitmodules.display(),
                e
            );
            Vec::new()
        }
    };

    if decls.is_empty() {
        println!("{} No submodules found", out.glyph(Glyph::Empty));
        return Ok(());
    }

    let entries = status::classify_all(&git, &decls);
    println!("Found {} submodules", entries.len());
    status_cmd::print_counts(out, &StatusCounts::tally(&entries));
    println!();

    let mut observer = ConsoleObserver::new(*out);
    let results = executor::run_updates(&git, &entries, &args.options(&config), &mut observer);
    observer.finish();

    let log = UpdateLog::from_results(results);
    let log_path = ctx.repo.join(&config.log_file);
    let saved = log.save(&log_path);

    print_summary(out, &log);
    match saved {
        Ok(()) => println!(
            "{} Log saved to: {}",
            out.glyph(Glyph::Log),
            log_path.display()
        ),
        Err(e) => println!(
            "{} Could not write log {}: {}",
            out.glyph(Glyph::Fail),
            log_path.display(),
            e
        ),
    }

    print_follow_up(out, &log);
    Ok(())
}

fn print_summary(out: &OutputConfig, log: &UpdateLog) {
    println!();
    println!("{}", "=".repeat(60));
    println!("{} Update summary", out.glyph(Glyph::Stats));
    println!("{}", "=".repeat(60));
    println!("{} Succeeded: {}", out.glyph(Glyph::Ok), log.success_count);
    println!("{} Failed: {}", out.glyph(Glyph::Fail), log.failed_count);
    println!(
        "{} Total time: {:.1}s",
        out.glyph(Glyph::Timer),
        log.total_duration
    );
    if let Some(average) = log.average_success_duration() {
        println!(
            "{} Average update time: {:.1}s",
            out.glyph(Glyph::Timer),
            average
        );
    }
}

fn print_follow_up(out: &OutputConfig, log: &UpdateLog) {
    if log.failed_count > 0 {
        println!("\n{} Failed submodules:", out.glyph(Glyph::Fail));
        for result in log.failed() {
            println!(
                "  • {}: {}",
                result.path,
                result.error.as_deref().unwrap_or("Unknown error")
            );
        }
    }

    if let Some(command) = log.retry_command() {
        println!("\n{} Retry the failed submodules with:", out.glyph(Glyph::Retry));
        println!("   {}", command);
    }

    if log.success_count > 0 {
        println!("\n{} Next steps:", out.glyph(Glyph::Hint));
        println!("1. Review the changes:");
        println!("   git status");
        println!("2. Commit the submodule updates:");
        println!("   git add .");
        println!("   git commit -m \"Update submodules\"");
        println!("3. Push:");
        println!("   git push");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_config_applies_overrides() {
        let args = UpdateArgs {
            timeout: Some(5),
            delay_ms: Some(0),
            log_file: Some(PathBuf::from("logs/run.json")),
            retry: Some(1),
            ..UpdateArgs::default()
        };
        let config = args.effective_config(&SyncConfig::default());
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.delay_ms, 0);
        assert_eq!(config.log_file, PathBuf::from("logs/run.json"));
    }

    #[test]
    fn test_effective_config_keeps_base_values() {
        let base = SyncConfig {
            timeout_secs: 60,
            ..SyncConfig::default()
        };
        let args = UpdateArgs {
            retry: Some(1),
            ..UpdateArgs::default()
        };
        assert_eq!(args.effective_config(&base), base);
    }

    #[test]
    fn test_options_from_args() {
        let args = UpdateArgs {
            force: true,
            skip_failed: true,
            retry: Some(4),
            ..UpdateArgs::default()
        };
        let config = SyncConfig {
            delay_ms: 250,
            ..SyncConfig::default()
        };
        let options = args.options(&config);
        assert!(options.force);
        assert!(options.skip_failed);
        assert_eq!(options.retry_count, 4);
        assert_eq!(options.delay, Duration::from_millis(250));
    }

    #[test]
    fn test_default_args_are_unset() {
        let args = UpdateArgs::default();
        assert!(!args.is_set());
        assert_eq!(args.retry_count(), 1);
    }

    #[test]
    fn test_or_prefers_subcommand_flags() {
        let inner = UpdateArgs {
            retry: Some(2),
            ..UpdateArgs::default()
        };
        let outer = UpdateArgs {
            force: true,
            retry: Some(5),
            delay_ms: Some(0),
            ..UpdateArgs::default()
        };
        let merged = inner.or(outer);
        assert!(merged.force);
        assert!(!merged.skip_failed);
        assert_eq!(merged.retry_count(), 2);
        assert_eq!(merged.delay_ms, Some(0));
    }
}
