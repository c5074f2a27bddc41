//! # Git Command-Line Backend
//!
//! [`GitCli`] implements [`SubmoduleBackend`] by running the system `git`
//! binary in the repository root. Using the system binary means SSH keys,
//! credential helpers and any `~/.gitconfig` settings apply exactly as they
//! do for the user's own git commands.
//!
//! Every command runs synchronously under a timeout. A child that outlives
//! its budget is killed and reported as [`Error::Timeout`].

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::backend::SubmoduleBackend;
use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::gitmodules::{self, SubmoduleDecl};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The command line, for messages.
    pub command: String,
    pub status: ExitStatus,
    /// Stdout with trailing whitespace removed. Leading whitespace is kept.
    pub stdout: String,
    /// Stderr, trimmed.
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<thread::JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

/// Run `program args..` in `cwd`, waiting at most `timeout`.
///
/// A non-zero exit is not an error here; callers decide what it means.
/// Failing to spawn the program is reported as [`Error::GitCommand`].
pub fn run_command(
    program: &str,
    args: &[&str],
    cwd: &Path,
    timeout: Duration,
) -> Result<CommandOutput> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    log::debug!("running `{}` in {}", command, cwd.display());

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::GitCommand {
            command: command.clone(),
            stderr: e.to_string(),
        })?;

    // Pipes are drained on their own threads so a chatty child cannot block
    // on a full pipe while we poll for its exit.
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            log::warn!("`{}` timed out after {:?}", command, timeout);
            return Err(Error::Timeout {
                command,
                seconds: timeout.as_secs(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = String::from_utf8_lossy(&collect(stdout)).trim_end().to_string();
    let stderr = String::from_utf8_lossy(&collect(stderr)).trim().to_string();

    Ok(CommandOutput {
        command,
        status,
        stdout,
        stderr,
    })
}

/// [`SubmoduleBackend`] backed by the system `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
    gitmodules: PathBuf,
    timeout: Duration,
}

impl GitCli {
    pub fn new(root: impl Into<PathBuf>, config: &SyncConfig) -> Self {
        Self {
            root: root.into(),
            gitmodules: config.gitmodules.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command and return its stdout, failing on non-zero exit.
    fn git(&self, args: &[&str]) -> Result<String> {
        let output = run_command("git", args, &self.root, self.timeout)?;
        if !output.success() {
            return Err(Error::GitCommand {
                command: output.command,
                stderr: output.stderr,
            });
        }
        Ok(output.stdout)
    }

    /// Like [`GitCli::git`], but only logs a failure.
    fn git_tolerant(&self, args: &[&str]) {
        if let Err(e) = self.git(args) {
            log::warn!("{}", e);
        }
    }

    fn section_name(&self, path: &str) -> String {
        self.list_submodules()
            .ok()
            .and_then(|decls| decls.into_iter().find(|d| d.path == path))
            .map(|d| d.name)
            .unwrap_or_else(|| path.to_string())
    }
}

impl SubmoduleBackend for GitCli {
    fn list_submodules(&self) -> Result<Vec<SubmoduleDecl>> {
        gitmodules::from_file(&self.root.join(&self.gitmodules))
    }

    fn query_status(&self, path: &str) -> Result<String> {
        self.git(&["submodule", "status", "--", path])
    }

    fn init_submodule(&self, path: &str) -> Result<String> {
        self.git(&["submodule", "update", "--init", "--", path])
    }

    fn update_submodule(&self, path: &str, force: bool) -> Result<String> {
        if force {
            self.git(&["submodule", "update", "--remote", "--force", "--", path])
        } else {
            self.git(&["submodule", "update", "--remote", "--", path])
        }
    }

    fn ignore_changes(&self, path: &str) -> Result<()> {
        let key = format!("submodule.{}.ignore", path);
        self.git(&["config", &key, "all"]).map(|_| ())
    }

    fn deregister(&self, path: &str) -> Result<()> {
        let section = format!("submodule.{}", self.section_name(path));
        let gitmodules = self.gitmodules.to_string_lossy().into_owned();

        self.git_tolerant(&["config", "-f", &gitmodules, "--remove-section", &section]);
        self.git_tolerant(&["config", "--remove-section", &section]);
        self.git_tolerant(&["rm", "--cached", "-q", "--", path]);
        Ok(())
    }
}
