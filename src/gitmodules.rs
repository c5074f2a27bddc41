//! # `.gitmodules` Parsing
//!
//! Reads submodule declarations from a `.gitmodules` file:
//!
//! ```text
//! [submodule "plugins/foo"]
//!     path = plugins/foo
//!     url = https://github.com/example/foo.git
//! ```
//!
//! Only `[submodule "<name>"]` sections are considered. A section becomes a
//! [`SubmoduleDecl`] when it has both a non-empty `path` and a non-empty
//! `url`; anything else is skipped without error. Declarations keep the order
//! of their sections in the file.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::Result;

/// A submodule declared in `.gitmodules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmoduleDecl {
    /// Section name (`[submodule "<name>"]`).
    pub name: String,
    /// Path of the submodule relative to the repository root.
    pub path: String,
    /// Remote URL.
    pub url: String,
}

/// Key/value pairs of one section, in file order.
#[derive(Debug, Default)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn get(&self, key: &str) -> Option<&str> {
        // Last assignment wins, as in git itself.
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

fn submodule_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r#"^submodule\s+"(.*)"$"#).expect("submodule header regex is valid")
    })
}

/// Split INI-style content into sections.
///
/// Supports `[section]` headers, `key = value` lines and `#`/`;` comments.
/// Lines before the first header are dropped.
fn parse_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(Section {
                name: trimmed[1..trimmed.len() - 1].trim().to_string(),
                entries: Vec::new(),
            });
        } else if let (Some(section), Some(pos)) = (current.as_mut(), trimmed.find('=')) {
            let key = trimmed[..pos].trim().to_string();
            let value = unquote(trimmed[pos + 1..].trim()).to_string();
            section.entries.push((key, value));
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    sections
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse `.gitmodules` content into submodule declarations.
pub fn parse(content: &str) -> Vec<SubmoduleDecl> {
    parse_sections(content)
        .into_iter()
        .filter_map(|section| {
            let captures = submodule_header().captures(&section.name)?;
            let name = captures[1].to_string();
            let path = section.get("path").filter(|p| !p.is_empty())?;
            let url = section.get("url").filter(|u| !u.is_empty())?;
            Some(SubmoduleDecl {
                name,
                path: path.trim_end_matches('/').to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

/// Read and parse a `.gitmodules` file.
///
/// A missing file yields an empty list.
pub fn from_file(path: &Path) -> Result<Vec<SubmoduleDecl>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(parse(&content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("{} not found, no submodules declared", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}
