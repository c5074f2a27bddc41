//! # Submodule Status Classification
//!
//! `git submodule status <path>` prints one line per submodule whose first
//! character encodes its state:
//!
//! | char | state                                   |
//! |------|-----------------------------------------|
//! | ` `  | checked out at the recorded commit      |
//! | `-`  | not initialized                         |
//! | `+`  | checked out at a different commit       |
//! | `U`  | merge conflicts                         |
//!
//! The classifier maps that character to a [`SubmoduleStatus`]. Anything it
//! cannot read (failed query, empty output, unknown character) counts as
//! uninitialized, so the executor will try to initialize it.

use serde::Serialize;

use crate::backend::SubmoduleBackend;
use crate::gitmodules::SubmoduleDecl;

/// Lifecycle state of a submodule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmoduleStatus {
    UpToDate,
    Uninitialized,
    Modified,
    MergeConflict,
}

impl SubmoduleStatus {
    /// Map a status character to its state.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::UpToDate),
            '-' => Some(Self::Uninitialized),
            '+' => Some(Self::Modified),
            'U' => Some(Self::MergeConflict),
            _ => None,
        }
    }

    /// The status character git uses for this state.
    pub fn as_char(self) -> char {
        match self {
            Self::UpToDate => ' ',
            Self::Uninitialized => '-',
            Self::Modified => '+',
            Self::MergeConflict => 'U',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::UpToDate => "up to date",
            Self::Uninitialized => "uninitialized",
            Self::Modified => "has changes",
            Self::MergeConflict => "merge conflict",
        }
    }
}

/// Parse the first line of `git submodule status` output.
///
/// Returns the state and the commit hash (empty when the line is too short
/// to carry one).
pub fn parse_status_line(output: &str) -> (SubmoduleStatus, String) {
    let line = output.lines().next().unwrap_or("");
    let status = line
        .chars()
        .next()
        .and_then(SubmoduleStatus::from_char)
        .unwrap_or(SubmoduleStatus::Uninitialized);
    let commit = if line.len() > 41 {
        line.get(1..41).unwrap_or("").to_string()
    } else {
        String::new()
    };
    (status, commit)
}

/// A declared submodule together with its classified state.
///
/// Serializes with the status flags spelled out, one of which is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmoduleEntry {
    pub path: String,
    pub url: String,
    pub commit: String,
    #[serde(skip)]
    pub status: SubmoduleStatus,
    status_char: char,
    initialized: bool,
    up_to_date: bool,
    has_changes: bool,
    uninitialized: bool,
    merge_conflict: bool,
}

impl SubmoduleEntry {
    pub fn new(decl: &SubmoduleDecl, status: SubmoduleStatus, commit: String) -> Self {
        Self {
            path: decl.path.clone(),
            url: decl.url.clone(),
            commit,
            status,
            status_char: status.as_char(),
            initialized: status != SubmoduleStatus::Uninitialized,
            up_to_date: status == SubmoduleStatus::UpToDate,
            has_changes: status == SubmoduleStatus::Modified,
            uninitialized: status == SubmoduleStatus::Uninitialized,
            merge_conflict: status == SubmoduleStatus::MergeConflict,
        }
    }

    pub fn status_char(&self) -> char {
        self.status_char
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_up_to_date(&self) -> bool {
        self.up_to_date
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn is_uninitialized(&self) -> bool {
        self.uninitialized
    }

    pub fn has_merge_conflict(&self) -> bool {
        self.merge_conflict
    }
}

/// Query and classify a single submodule.
pub fn classify<B: SubmoduleBackend + ?Sized>(backend: &B, decl: &SubmoduleDecl) -> SubmoduleEntry {
    let (status, commit) = match backend.query_status(&decl.path) {
        Ok(output) => parse_status_line(&output),
        Err(e) => {
            log::debug!("status query for {} failed: {}", decl.path, e);
            (SubmoduleStatus::Uninitialized, String::new())
        }
    };
    SubmoduleEntry::new(decl, status, commit)
}

/// Classify every declared submodule, in declaration order.
pub fn classify_all<B: SubmoduleBackend + ?Sized>(
    backend: &B,
    decls: &[SubmoduleDecl],
) -> Vec<SubmoduleEntry> {
    decls.iter().map(|decl| classify(backend, decl)).collect()
}

/// Aggregate counts over a set of classified submodules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub initialized: usize,
    pub up_to_date: usize,
    pub has_changes: usize,
    pub uninitialized: usize,
    pub merge_conflict: usize,
}

impl StatusCounts {
    pub fn tally(entries: &[SubmoduleEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut counts, entry| {
            counts.initialized += usize::from(entry.is_initialized());
            counts.up_to_date += usize::from(entry.is_up_to_date());
            counts.has_changes += usize::from(entry.has_changes());
            counts.uninitialized += usize::from(entry.is_uninitialized());
            counts.merge_conflict += usize::from(entry.has_merge_conflict());
            counts
        })
    }
}
