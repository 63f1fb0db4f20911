//! Tool discovery.
//!
//! First stage of the index pipeline. Lists the direct children of the root
//! and keeps the ones that look like tools.
//!
//! ## Directory Structure
//!
//! ```text
//! ./                           # Root (current directory by default)
//! ├── tool-index.toml          # Config (optional)
//! ├── index.html               # Generated output
//! ├── template/                # Page template (ignored as a tool)
//! │   └── index.html
//! ├── json-formatter/          # Tool: has an entry page
//! │   ├── index.html
//! │   └── art.svg              # Icon (optional)
//! ├── qr-maker/                # Tool
//! │   └── index.html
//! ├── half-done/               # Not a tool yet: no entry page
//! │   └── notes.md
//! └── .github/                 # Hidden: skipped
//! ```
//!
//! ## Rules
//!
//! An entry is a candidate iff all of these hold:
//! - it is a directory (regular files are skipped)
//! - its name is not in the configured ignore set
//! - its name does not start with `.`
//! - it contains the entry page file
//!
//! Entries failing any rule are skipped without a warning. A directory without
//! an entry page simply isn't a tool yet.

use crate::config::IndexConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read root directory {path}: {source}")]
    ReadRoot {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A directory that passed discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Directory name, used as the tool slug.
    pub slug: String,
    /// Path of the tool directory.
    pub dir: PathBuf,
    /// Path of the entry page inside it.
    pub entry_page: PathBuf,
}

/// List candidate tool directories under `root`.
///
/// Candidates are returned sorted by name so discovery order (and thus the
/// tie-break order after ranking) does not depend on the filesystem.
pub fn discover(root: &Path, config: &IndexConfig) -> Result<Vec<Candidate>, ScanError> {
    let read_root = |source| ScanError::ReadRoot {
        path: root.to_path_buf(),
        source,
    };

    let mut candidates: Vec<Candidate> = fs::read_dir(root)
        .map_err(read_root)?
        .filter_map(|e| e.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            candidate(entry.path(), name, config)
        })
        .collect();

    candidates.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(candidates)
}

fn candidate(dir: PathBuf, name: String, config: &IndexConfig) -> Option<Candidate> {
    if name.starts_with('.') || config.is_ignored(&name) {
        return None;
    }
    if !dir.is_dir() {
        return None;
    }
    let entry_page = dir.join(&config.entry_page);
    if !entry_page.is_file() {
        debug!(dir = %dir.display(), "no entry page, skipping");
        return None;
    }
    Some(Candidate {
        slug: name,
        dir,
        entry_page,
    })
}
