//! CLI argument parsing and command dispatch

use anyhow::{Context as _, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

use submodule_sync::config::SyncConfig;
use submodule_sync::git::GitCli;
use submodule_sync::output::OutputConfig;

use crate::commands;
use crate::commands::update::UpdateArgs;

/// Submodule Sync - Initialize, update and tidy the git submodules of a repository
///
/// Without a subcommand, runs `update`.
#[derive(Parser, Debug)]
#[command(name = "submodule-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    update: UpdateArgs,

    /// Repository root containing .gitmodules
    #[arg(short = 'C', long = "repo", global = true, value_name = "DIR", default_value = ".")]
    repo: PathBuf,

    /// Configuration file (defaults to .submodule-sync.toml, then the user config)
    #[arg(long, global = true, value_name = "FILE", env = "SUBMODULE_SYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize and update every submodule (the default)
    Update(UpdateArgs),

    /// Show the state of every declared submodule
    Status(commands::status::StatusArgs),

    /// Delete directories that are no longer declared submodules
    Clean(commands::clean::CleanArgs),

    /// Make `git status` ignore local changes inside every submodule
    Ignore(commands::ignore::IgnoreArgs),

    /// Remove a submodule from the repository
    Remove(commands::remove::RemoveArgs),

    /// Show or save the effective configuration
    Config(commands::config::ConfigArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct Context {
    /// Repository root.
    pub repo: PathBuf,
    /// Effective configuration, before command-specific overrides.
    pub config: SyncConfig,
    /// Where the configuration came from, if not the built-in defaults.
    pub config_source: Option<PathBuf>,
    pub output: OutputConfig,
}

impl Context {
    /// Load the configuration for `repo` and decide on colors.
    fn load(repo: PathBuf, config: Option<&Path>, color: &str) -> Result<Self> {
        let (config, config_source) =
            SyncConfig::discover(&repo, config).with_context(|| "Failed to load configuration")?;
        Ok(Self {
            repo,
            config,
            config_source,
            output: OutputConfig::from_env_and_flag(color),
        })
    }

    /// A git backend for the repository, using `config` for its settings.
    pub fn git(&self, config: &SyncConfig) -> GitCli {
        GitCli::new(&self.repo, config)
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second initialization (e.g. in tests) is harmless.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Attach the update flags given before any subcommand name.
///
/// They belong to `update`, whether named or implied; any other subcommand
/// rejects them.
fn resolve_command(
    command: Option<Commands>,
    update: UpdateArgs,
) -> std::result::Result<Commands, clap::Error> {
    match command {
        None => Ok(Commands::Update(update)),
        Some(Commands::Update(args)) => Ok(Commands::Update(args.or(update))),
        Some(_) if update.is_set() => Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            "update flags are only accepted by `update` or without a subcommand",
        )),
        Some(other) => Ok(other),
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let Cli {
            command,
            update,
            repo,
            config,
            color,
            log_level,
        } = self;
        init_logging(&log_level);

        let command = resolve_command(command, update).unwrap_or_else(|e| e.exit());
        let config = config.as_deref();

        match command {
            // Completions need neither a repository nor a configuration.
            Commands::Completions(args) => commands::completions::execute(args),
            Commands::Update(args) => {
                commands::update::execute(args, &Context::load(repo, config, &color)?)
            }
            Commands::Status(args) => {
                commands::status::execute(args, &Context::load(repo, config, &color)?)
            }
            Commands::Clean(args) => {
                commands::clean::execute(args, &Context::load(repo, config, &color)?)
            }
            Commands::Ignore(args) => {
                commands::ignore::execute(args, &Context::load(repo, config, &color)?)
            }
            Commands::Remove(args) => {
                commands::remove::execute(args, &Context::load(repo, config, &color)?)
            }
            Commands::Config(args) => {
                commands::config::execute(args, &Context::load(repo, config, &color)?)
            }
        }
    }
}
