//! Last-updated and first-created timestamps for tool directories.
//!
//! Version control is the primary source: the committer timestamps of every
//! commit touching the directory, newest first. Whenever that source has
//! nothing to offer, the directory's filesystem modification time stands in
//! for both timestamps.
//!
//! ## Fallback cases
//!
//! | Situation | Result |
//! |-----------|--------|
//! | commits found | newest → updated, oldest → created |
//! | directory untracked (no commits) | mtime for both |
//! | `git` missing, not a repository, non-zero exit | mtime for both, warning |
//! | unparsable `git` output | mtime for both, warning |
//! | mtime unreadable too | Unix epoch for both, warning |
//!
//! [`HistoryResolver::resolve`] never fails. The version-control query sits
//! behind the [`CommitHistory`] trait so the fallback logic can be tested
//! without spawning processes.

use chrono::{DateTime, FixedOffset, Local};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("unparsable commit timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },
}

/// Source of commit timestamps for a path.
pub trait CommitHistory {
    /// Committer timestamps of commits touching `path`, newest first.
    ///
    /// An empty vector means the path has no history.
    fn commit_timestamps(&self, path: &Path) -> Result<Vec<DateTime<FixedOffset>>, HistoryError>;
}

/// [`CommitHistory`] backed by the `git` command line.
///
/// Runs `git log --format=%cI -- .` inside the directory, so the root does not
/// need to be the repository top level.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

impl GitCli {
    /// Use a specific git executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CommitHistory for GitCli {
    fn commit_timestamps(&self, path: &Path) -> Result<Vec<DateTime<FixedOffset>>, HistoryError> {
        let output = Command::new(&self.program)
            .args(["log", "--format=%cI", "--", "."])
            .current_dir(path)
            .output()?;

        if !output.status.success() {
            return Err(HistoryError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_log_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `git log --format=%cI` output: one RFC 3339 timestamp per line.
pub fn parse_log_output(stdout: &str) -> Result<Vec<DateTime<FixedOffset>>, HistoryError> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            DateTime::parse_from_rfc3339(line).map_err(|source| HistoryError::Timestamp {
                value: line.to_string(),
                source,
            })
        })
        .collect()
}

/// Resolved timestamps for one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamps {
    pub last_updated: DateTime<FixedOffset>,
    pub first_created: DateTime<FixedOffset>,
    pub source: TimestampSource,
}

/// Where a [`Timestamps`] value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    History,
    Mtime,
}

/// Turns a directory into [`Timestamps`], degrading to mtime on any failure.
#[derive(Debug, Clone)]
pub struct HistoryResolver<H> {
    history: H,
}

impl<H: CommitHistory> HistoryResolver<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }

    pub fn resolve(&self, dir: &Path) -> Timestamps {
        match self.history.commit_timestamps(dir) {
            Ok(commits) => match (commits.first(), commits.last()) {
                (Some(&newest), Some(&oldest)) => Timestamps {
                    last_updated: newest,
                    // Rewritten history can leave commit dates out of order.
                    first_created: oldest.min(newest),
                    source: TimestampSource::History,
                },
                _ => {
                    debug!(dir = %dir.display(), "no commit history, using mtime");
                    mtime_timestamps(dir)
                }
            },
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "could not read commit history, using mtime");
                mtime_timestamps(dir)
            }
        }
    }
}

fn mtime_timestamps(dir: &Path) -> Timestamps {
    let at = match dir.metadata().and_then(|m| m.modified()) {
        Ok(modified) => to_local(modified),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "could not read mtime, using epoch");
            to_local(SystemTime::UNIX_EPOCH)
        }
    };
    Timestamps {
        last_updated: at,
        first_created: at,
        source: TimestampSource::Mtime,
    }
}

/// Convert a filesystem time to a timestamp in the local offset.
pub fn to_local(time: SystemTime) -> DateTime<FixedOffset> {
    DateTime::<Local>::from(time).fixed_offset()
}
