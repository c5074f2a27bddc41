//! # Version-Control Backend
//!
//! The reconciliation logic never spawns `git` directly. It talks to a
//! [`SubmoduleBackend`], which the CLI fills with [`crate::git::GitCli`] and
//! the tests fill with a scripted fake.

use crate::error::Result;
use crate::gitmodules::SubmoduleDecl;

/// Operations the reconciliation logic needs from the version-control tool.
pub trait SubmoduleBackend {
    /// Submodules declared for the repository.
    fn list_submodules(&self) -> Result<Vec<SubmoduleDecl>>;

    /// Raw `git submodule status <path>` output.
    fn query_status(&self, path: &str) -> Result<String>;

    /// Initialize and check out a submodule. Returns the command output.
    fn init_submodule(&self, path: &str) -> Result<String>;

    /// Move a submodule to the tip of its remote branch. Returns the command
    /// output.
    fn update_submodule(&self, path: &str, force: bool) -> Result<String>;

    /// Make `git status` ignore local changes inside the submodule.
    fn ignore_changes(&self, path: &str) -> Result<()>;

    /// Drop the submodule from `.gitmodules`, `.git/config` and the index.
    fn deregister(&self, path: &str) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted in-memory backend for unit tests.

    use super::SubmoduleBackend;
    use crate::error::{Error, Result};
    use crate::gitmodules::SubmoduleDecl;
    use crate::status::SubmoduleStatus;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Status(String),
        Init(String),
        Update { path: String, force: bool },
        Ignore(String),
        Deregister(String),
    }

    #[derive(Default)]
    struct State {
        decls: Vec<SubmoduleDecl>,
        statuses: HashMap<String, SubmoduleStatus>,
        failing_status: HashSet<String>,
        // Remaining failures per path; `usize::MAX` fails forever.
        init_failures: HashMap<String, usize>,
        update_failures: HashMap<String, usize>,
        calls: Vec<Call>,
    }

    #[derive(Default)]
    pub struct FakeBackend {
        state: RefCell<State>,
    }

    const HASH: &str = "0123456789abcdef0123456789abcdef01234567";

    fn command_error(command: &str, path: &str) -> Error {
        Error::GitCommand {
            command: format!("git submodule {} {}", command, path),
            stderr: format!("{} failed for {}", command, path),
        }
    }

    fn take_failure(failures: &mut HashMap<String, usize>, path: &str) -> bool {
        match failures.get_mut(path) {
            Some(0) | None => false,
            Some(remaining) => {
                if *remaining != usize::MAX {
                    *remaining -= 1;
                }
                true
            }
        }
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn declare(&self, path: &str, status: SubmoduleStatus) {
            self.declare_named(path, path, status);
        }

        pub fn declare_named(&self, name: &str, path: &str, status: SubmoduleStatus) {
            let mut state = self.state.borrow_mut();
            state.decls.push(SubmoduleDecl {
                name: name.to_string(),
                path: path.to_string(),
                url: format!("https://example.com/{}.git", path),
            });
            state.statuses.insert(path.to_string(), status);
        }

        pub fn set_status(&self, path: &str, status: SubmoduleStatus) {
            self.state
                .borrow_mut()
                .statuses
                .insert(path.to_string(), status);
        }

        pub fn fail_status(&self, path: &str) {
            self.state
                .borrow_mut()
                .failing_status
                .insert(path.to_string());
        }

        pub fn fail_init(&self, path: &str, times: usize) {
            self.state
                .borrow_mut()
                .init_failures
                .insert(path.to_string(), times);
        }

        pub fn fail_update(&self, path: &str, times: usize) {
            self.state
                .borrow_mut()
                .update_failures
                .insert(path.to_string(), times);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.state.borrow().calls.clone()
        }

        pub fn decls(&self) -> Vec<SubmoduleDecl> {
            self.state.borrow().decls.clone()
        }
    }

    impl SubmoduleBackend for FakeBackend {
        fn list_submodules(&self) -> Result<Vec<SubmoduleDecl>> {
            Ok(self.decls())
        }

        fn query_status(&self, path: &str) -> Result<String> {
            let mut state = self.state.borrow_mut();
            state.calls.push(Call::Status(path.to_string()));
            if state.failing_status.contains(path) {
                return Err(command_error("status", path));
            }
            let status = state
                .statuses
                .get(path)
                .copied()
                .unwrap_or(SubmoduleStatus::Uninitialized);
            Ok(format!("{}{} {} (heads/main)\n", status.as_char(), HASH, path))
        }

        fn init_submodule(&self, path: &str) -> Result<String> {
            let mut state = self.state.borrow_mut();
            state.calls.push(Call::Init(path.to_string()));
            if take_failure(&mut state.init_failures, path) {
                return Err(command_error("init", path));
            }
            state
                .statuses
                .insert(path.to_string(), SubmoduleStatus::UpToDate);
            Ok(format!("Submodule path '{}': checked out", path))
        }

        fn update_submodule(&self, path: &str, force: bool) -> Result<String> {
            let mut state = self.state.borrow_mut();
            state.calls.push(Call::Update {
                path: path.to_string(),
                force,
            });
            if take_failure(&mut state.update_failures, path) {
                return Err(command_error("update", path));
            }
            Ok(String::new())
        }

        fn ignore_changes(&self, path: &str) -> Result<()> {
            self.state
                .borrow_mut()
                .calls
                .push(Call::Ignore(path.to_string()));
            Ok(())
        }

        fn deregister(&self, path: &str) -> Result<()> {
            let mut state = self.state.borrow_mut();
            state.calls.push(Call::Deregister(path.to_string()));
            state.decls.retain(|d| d.path != path);
            Ok(())
        }
    }
}
