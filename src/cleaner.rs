//! # Orphan Cleanup and Submodule Removal
//!
//! An orphan is a directory that sits directly under one of the scanned
//! parent folders (`plugins`, `scripts`, `modules` by default) but is not a
//! declared submodule path. This happens when a submodule is dropped from
//! `.gitmodules` while its checkout stays on disk.
//!
//! Removing an orphan also removes git's internal copy of it under
//! `.git/modules/<path>`. Removing a declared submodule removes
//! `.git/modules/<name>` too, which is where git keeps it when the section
//! name differs from the path. Filesystem failures are recorded per path in the
//! [`CleanReport`]; one stubborn directory does not stop the others.
//!
//! Confirmation is the caller's job; nothing here prompts.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::backend::SubmoduleBackend;
use crate::error::Result;
use crate::gitmodules::SubmoduleDecl;

/// Where git keeps the repository data of a submodule named `name`.
///
/// Orphans have no name left, so their path is used instead.
pub fn metadata_dir(root: &Path, name: &str) -> PathBuf {
    root.join(".git").join("modules").join(name)
}

/// Directories under `scan_dirs` that are not declared submodules.
///
/// Paths are relative to `root` and use `/` as separator, matching the
/// spelling in `.gitmodules`. Hidden directories are ignored, as are scan
/// dirs that do not exist.
pub fn find_orphans(
    root: &Path,
    scan_dirs: &[String],
    decls: &[SubmoduleDecl],
) -> Result<BTreeSet<String>> {
    let declared: BTreeSet<&str> = decls.iter().map(|d| d.path.as_str()).collect();
    let mut orphans = BTreeSet::new();

    for scan_dir in scan_dirs {
        let base = root.join(scan_dir);
        if !base.is_dir() {
            continue;
        }

        for entry in WalkDir::new(&base)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if name.starts_with('.') {
                continue;
            }

            let relative = format!("{}/{}", scan_dir.trim_end_matches('/'), name);
            if !declared.contains(relative.as_str()) {
                orphans.insert(relative);
            }
        }
    }

    Ok(orphans)
}

/// Outcome of a cleanup pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    /// Working directories that were deleted.
    pub removed: Vec<String>,
    /// `.git/modules` entries that were deleted alongside.
    pub metadata_removed: Vec<String>,
    /// Paths that could not be deleted, with the reason.
    pub failed: Vec<(String, String)>,
}

fn remove_checkout(root: &Path, path: &str, report: &mut CleanReport) -> bool {
    let dir = root.join(path);
    if dir.exists() {
        match fs::remove_dir_all(&dir) {
            Ok(()) => report.removed.push(path.to_string()),
            Err(e) => {
                log::warn!("failed to remove {}: {}", dir.display(), e);
                report.failed.push((path.to_string(), e.to_string()));
                return false;
            }
        }
    }
    true
}

fn remove_metadata(root: &Path, name: &str, report: &mut CleanReport) {
    let metadata = metadata_dir(root, name);
    if !metadata.exists() {
        return;
    }
    match fs::remove_dir_all(&metadata) {
        Ok(()) => report
            .metadata_removed
            .push(metadata.to_string_lossy().into_owned()),
        Err(e) => {
            log::warn!("failed to remove {}: {}", metadata.display(), e);
            report
                .failed
                .push((metadata.to_string_lossy().into_owned(), e.to_string()));
        }
    }
}

/// Delete the given orphan directories and their git metadata.
pub fn remove_orphans<'a, I>(root: &Path, orphans: I) -> CleanReport
where
    I: IntoIterator<Item = &'a String>,
{
    let mut report = CleanReport::default();
    for path in orphans {
        if remove_checkout(root, path, &mut report) {
            remove_metadata(root, path, &mut report);
        }
    }
    report
}

/// Remove a declared submodule entirely: deregister it with git, then
/// delete its checkout and metadata.
pub fn remove_submodule<B: SubmoduleBackend + ?Sized>(
    backend: &B,
    root: &Path,
    path: &str,
) -> Result<CleanReport> {
    let name = backend
        .list_submodules()?
        .into_iter()
        .find(|d| d.path == path)
        .map(|d| d.name);
    backend.deregister(path)?;

    let mut report = CleanReport::default();
    if remove_checkout(root, path, &mut report) {
        remove_metadata(root, path, &mut report);
        if let Some(name) = name.filter(|name| name != path) {
            remove_metadata(root, &name, &mut report);
        }
    }
    Ok(report)
}
