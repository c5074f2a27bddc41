//! # Status Command Implementation
//!
//! Lists every declared submodule with its state and commit, followed by
//! the counts per state. `--json` prints the classified entries instead.
//!
//! This command is read-only.

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;

use submodule_sync::backend::SubmoduleBackend;
use submodule_sync::output::{Glyph, OutputConfig};
use submodule_sync::status::{self, StatusCounts, SubmoduleEntry};

use crate::cli::Context;

/// Show the state of every declared submodule
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the classified submodules as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    counts: StatusCounts,
    submodules: &'a [SubmoduleEntry],
}

/// Print the counts per state.
pub fn print_counts(out: &OutputConfig, counts: &StatusCounts) {
    println!("{} Status:", out.glyph(Glyph::Stats));
    println!("  • Initialized:    {}", counts.initialized);
    println!("  • Up to date:     {}", counts.up_to_date);
    println!("  • Has changes:    {}", counts.has_changes);
    println!("  • Uninitialized:  {}", counts.uninitialized);
    println!("  • Merge conflict: {}", counts.merge_conflict);
}

fn short_commit(commit: &str) -> &str {
    commit.get(..8).unwrap_or(commit)
}

/// Execute the `status` command.
pub fn execute(args: StatusArgs, ctx: &Context) -> Result<()> {
    let git = ctx.git(&ctx.config);
    let decls = git
        .list_submodules()
        .with_context(|| format!("Failed to read {}", ctx.config.gitmodules.display()))?;
    let entries = status::classify_all(&git, &decls);
    let counts = StatusCounts::tally(&entries);

    if args.json {
        let report = StatusReport {
            counts,
            submodules: &entries,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let out = &ctx.output;
    if entries.is_empty() {
        println!("{} No submodules found", out.glyph(Glyph::Empty));
        return Ok(());
    }

    let width = entries.iter().map(|e| e.path.len()).max().unwrap_or(0);
    for entry in &entries {
        let label = format!("{:<14}", entry.status.label());
        println!(
            "{} {:<width$}  {:<8}  {}",
            out.paint_status(entry.status, &label),
            entry.path,
            short_commit(&entry.commit),
            entry.url,
            width = width
        );
    }
    println!();
    print_counts(out, &counts);
    Ok(())
}
