//! # Clean Command Implementation
//!
//! Finds directories under the scanned parent folders (`plugins`, `scripts`,
//! `modules` by default) that are not declared in `.gitmodules`, lists them,
//! and deletes them together with their `.git/modules` metadata once the user
//! confirms. `--yes` skips the prompt.
//!
//! The same routine runs as the first step of `update --clean`.

use anyhow::{Context as _, Result};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

use submodule_sync::backend::SubmoduleBackend;
use submodule_sync::cleaner;
use submodule_sync::config::SyncConfig;
use submodule_sync::output::Glyph;

use crate::cli::Context;

/// Delete directories that are no longer declared submodules
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

const NOT_INTERACTIVE: &str = "Not running interactively; pass --yes to confirm.";

/// Ask the user to confirm a destructive action.
///
/// Answers `false` without prompting when stdout is not a terminal, and
/// when the prompt cannot read an answer (stdin closed or not a terminal).
pub fn confirm(prompt: &str) -> bool {
    if !console::user_attended() {
        println!("{}", NOT_INTERACTIVE);
        return false;
    }
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact();
    resolve_answer(answer)
}

fn resolve_answer(answer: dialoguer::Result<bool>) -> bool {
    match answer {
        Ok(confirmed) => confirmed,
        Err(e) => {
            log::debug!("confirmation prompt failed: {}", e);
            println!("{}", NOT_INTERACTIVE);
            false
        }
    }
}

/// Find orphaned directories and delete them after confirmation.
pub fn clean_orphans(ctx: &Context, config: &SyncConfig, yes: bool) -> Result<()> {
    let out = &ctx.output;
    println!(
        "{} Looking for orphaned submodule directories...",
        out.glyph(Glyph::Clean)
    );

    let decls = ctx
        .git(config)
        .list_submodules()
        .with_context(|| format!("Failed to read {}", config.gitmodules.display()))?;
    let orphans = cleaner::find_orphans(&ctx.repo, &config.scan_dirs, &decls)
        .context("Failed to scan for orphaned directories")?;

    if orphans.is_empty() {
        println!("{} No orphaned directories found", out.glyph(Glyph::Ok));
        return Ok(());
    }

    println!(
        "{} Found {} orphaned directories:",
        out.glyph(Glyph::Delete),
        orphans.len()
    );
    for path in &orphans {
        println!("  • {}", path);
    }

    if !yes && !confirm("Delete these directories?") {
        println!("{} Deletion cancelled", out.glyph(Glyph::Fail));
        return Ok(());
    }

    let report = cleaner::remove_orphans(&ctx.repo, &orphans);
    for path in &report.removed {
        println!("{} Deleted: {}", out.glyph(Glyph::Ok), path);
    }
    for path in &report.metadata_removed {
        println!("{} Cleaned: {}", out.glyph(Glyph::Clean), path);
    }
    for (path, error) in &report.failed {
        println!("{} Failed to delete {}: {}", out.glyph(Glyph::Fail), path, error);
    }

    println!(
        "\n{} Cleanup finished: {} directories deleted",
        out.glyph(Glyph::Stats),
        report.removed.len()
    );
    Ok(())
}

/// Execute the `clean` command.
pub fn execute(args: CleanArgs, ctx: &Context) -> Result<()> {
    clean_orphans(ctx, &ctx.config, args.yes)
}
