//! # tool-index
//!
//! Generates the landing page for a repository of self-contained static web
//! tools. Each top-level directory with an `index.html` is a tool; the landing
//! page lists them all as cards, most recently updated first.
//!
//! # Pipeline
//!
//! ```text
//! 1. Discover   root/         →  candidates       (directories with an entry page)
//! 2. Resolve    candidate     →  ToolRecord       (page metadata + commit dates)
//! 3. Rank       ToolRecords   →  newest first     (stable, by last update)
//! 4. Render     ranked tools  →  HTML             (maud, escaped)
//! 5. Write      HTML          →  root/index.html  (always fully regenerated)
//! ```
//!
//! The run is a short synchronous batch job. Problems with a single tool
//! degrade that tool's record and log a warning; only failures affecting the
//! whole run (unreadable root, bad config, unreadable template, unwritable
//! output) are errors.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Discovery — which root entries are tools |
//! | [`metadata`] | Name, description and icon from the entry page, with fallbacks |
//! | [`history`] | Last-updated / first-created dates from git, falling back to mtime |
//! | [`registry`] | Builds records for all candidates and ranks them |
//! | [`generate`] | Renders the page (built-in or template chrome) and writes it |
//! | [`config`] | Optional `tool-index.toml` loading and validation |
//! | [`naming`] | Slug → URL and fallback display name |
//! | [`types`] | [`ToolRecord`](types::ToolRecord) |
//! | [`output`] | CLI listing output |
//!
//! # Design Decisions
//!
//! ## Scrape, Don't Parse
//!
//! Entry pages are authored by hand and only a handful of signals are needed,
//! so metadata comes from small case-insensitive patterns rather than an HTML
//! parser. Each pattern is a separate stage in [`metadata`] with its own tests.
//!
//! ## Git Behind a Trait
//!
//! Commit dates come from the `git` CLI, but the resolver only sees the
//! [`CommitHistory`](history::CommitHistory) trait. Tests swap in scripted
//! histories to cover every fallback without a repository.
//!
//! ## Escaped Output Only
//!
//! Tool names and descriptions come from the tools' own pages. They reach the
//! output only through maud interpolation, which escapes them.

pub mod config;
pub mod generate;
pub mod history;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod registry;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

use config::{ConfigError, IndexConfig};
use generate::GenerateError;
use history::{CommitHistory, HistoryResolver};
use registry::Registry;
use scan::ScanError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use types::ToolRecord;

/// Run-level failures. Anything tool-specific is handled before it gets here.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildReport {
    /// Tools in the order they were rendered.
    pub tools: Vec<ToolRecord>,
    /// The written output file.
    pub output: PathBuf,
}

/// Discover, resolve and rank all tools under `root`.
pub fn collect_tools<H: CommitHistory>(
    root: &Path,
    config: &IndexConfig,
    resolver: &HistoryResolver<H>,
) -> Result<Vec<ToolRecord>, BuildError> {
    let candidates = scan::discover(root, config)?;
    debug!(count = candidates.len(), "discovered candidates");
    let registry = Registry::build(&candidates, config, resolver);
    if registry.is_empty() {
        info!(root = %root.display(), "no tools found");
    } else {
        debug!(count = registry.len(), "resolved tools");
    }
    Ok(registry.ranked())
}

/// Run the full pipeline and write the output file.
///
/// The template is loaded before any tool is processed and the output file is
/// only written once the page has rendered.
pub fn build_index<H: CommitHistory>(
    root: &Path,
    config: &IndexConfig,
    resolver: &HistoryResolver<H>,
) -> Result<BuildReport, BuildError> {
    let chrome = generate::load_chrome(root, &config.template)?;
    let tools = collect_tools(root, config, resolver)?;

    let mut site = config.site.clone();
    site.icon = site.icon.filter(|icon| root.join(icon).is_file());

    let html = generate::render_page(&tools, &site, &chrome);
    let output = generate::write_output(root, &config.output, &html)?;
    info!(output = %output.display(), tools = tools.len(), "index written");

    Ok(BuildReport { tools, output })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryError;
    use crate::test_helpers::*;
    use chrono::{DateTime, FixedOffset};
    use std::fs;
    use tempfile::TempDir;

    /// Every directory has the same single commit.
    struct SameCommit;

    impl CommitHistory for SameCommit {
        fn commit_timestamps(
            &self,
            _path: &Path,
        ) -> Result<Vec<DateTime<FixedOffset>>, HistoryError> {
            Ok(vec![ts("2024-04-01T12:00:00Z")])
        }
    }

    /// Commit date derived from the directory name: `t-07` → 2024-01-07.
    struct DayFromName;

    impl CommitHistory for DayFromName {
        fn commit_timestamps(
            &self,
            path: &Path,
        ) -> Result<Vec<DateTime<FixedOffset>>, HistoryError> {
            let name = path.file_name().unwrap().to_string_lossy();
            let day = name.trim_start_matches("t-");
            Ok(vec![ts(&format!("2024-01-{day}T00:00:00Z"))])
        }
    }

    #[test]
    fn empty_root_builds_empty_page() {
        let tmp = TempDir::new().unwrap();
        let report = build_index(
            tmp.path(),
            &IndexConfig::default(),
            &HistoryResolver::new(SameCommit),
        )
        .unwrap();

        assert!(report.tools.is_empty());
        let html = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(html.contains(r#"<div class="tool-grid"></div>"#));
    }

    #[test]
    fn tools_rendered_newest_first() {
        let tmp = TempDir::new().unwrap();
        for name in ["t-03", "t-10", "t-01"] {
            write_tool(tmp.path(), name, "");
        }

        let report = build_index(
            tmp.path(),
            &IndexConfig::default(),
            &HistoryResolver::new(DayFromName),
        )
        .unwrap();

        let slugs: Vec<&str> = report.tools.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["t-10", "t-03", "t-01"]);

        let html = fs::read_to_string(&report.output).unwrap();
        let pos = |s: &str| html.find(&format!("href=\"/{s}/\"")).unwrap();
        assert!(pos("t-10") < pos("t-03"));
        assert!(pos("t-03") < pos("t-01"));
    }

    #[test]
    fn ties_keep_discovery_order() {
        let tmp = TempDir::new().unwrap();
        for name in ["charlie", "alpha", "bravo"] {
            write_tool(tmp.path(), name, "");
        }
        let tools = collect_tools(
            tmp.path(),
            &IndexConfig::default(),
            &HistoryResolver::new(SameCommit),
        )
        .unwrap();
        let slugs: Vec<&str> = tools.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn site_icon_dropped_when_missing() {
        let tmp = TempDir::new().unwrap();
        let report = build_index(
            tmp.path(),
            &IndexConfig::default(),
            &HistoryResolver::new(SameCommit),
        )
        .unwrap();
        let html = fs::read_to_string(report.output).unwrap();
        assert!(!html.contains("tool-icon"));

        fs::write(tmp.path().join("art.svg"), "<svg/>").unwrap();
        let report = build_index(
            tmp.path(),
            &IndexConfig::default(),
            &HistoryResolver::new(SameCommit),
        )
        .unwrap();
        let html = fs::read_to_string(report.output).unwrap();
        assert!(html.contains(r#"class="tool-icon""#));
    }

    #[test]
    fn template_chrome_is_used_when_present() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("template")).unwrap();
        fs::write(
            tmp.path().join("template/index.html"),
            format!("<html><h1>Mine</h1>{}</html>", generate::SLOT),
        )
        .unwrap();
        write_tool(tmp.path(), "timer", "<title>Timer</title>");

        let report = build_index(
            tmp.path(),
            &IndexConfig::default(),
            &HistoryResolver::new(SameCommit),
        )
        .unwrap();

        // The template directory itself is never a tool.
        assert_eq!(report.tools.len(), 1);
        let html = fs::read_to_string(report.output).unwrap();
        assert!(html.starts_with("<html><h1>Mine</h1><div class=\"tool-grid\">"));
        assert!(html.contains("Timer"));
    }

    #[test]
    fn scaffold_template_main_container_is_filled() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("template")).unwrap();
        fs::write(
            tmp.path().join("template/index.html"),
            r#"<html><body><header>Mine</header><main class="container">x</main></body></html>"#,
        )
        .unwrap();
        write_tool(tmp.path(), "timer", "<title>Timer</title>");

        let report = build_index(
            tmp.path(),
            &IndexConfig::default(),
            &HistoryResolver::new(SameCommit),
        )
        .unwrap();

        assert_eq!(report.tools.len(), 1);
        let html = fs::read_to_string(report.output).unwrap();
        assert!(html.starts_with(
            r#"<html><body><header>Mine</header><main class="container"><div class="tool-grid">"#
        ));
        assert!(html.contains("<h2>Timer</h2>"));
        assert!(html.ends_with("</main></body></html>"));
    }

    #[test]
    fn unusable_template_falls_back_to_builtin_page() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("template")).unwrap();
        fs::write(tmp.path().join("template/index.html"), "<html>no slot</html>").unwrap();
        write_tool(tmp.path(), "timer", "<title>Timer</title>");

        let report = build_index(
            tmp.path(),
            &IndexConfig::default(),
            &HistoryResolver::new(SameCommit),
        )
        .unwrap();

        let html = fs::read_to_string(report.output).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h2>Timer</h2>"));
    }

    #[test]
    fn unreadable_template_leaves_previous_output() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("index.html"), "previous").unwrap();
        fs::create_dir_all(tmp.path().join("template/index.html")).unwrap();

        let err = build_index(
            tmp.path(),
            &IndexConfig::default(),
            &HistoryResolver::new(SameCommit),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            BuildError::Generate(GenerateError::TemplateRead { .. })
        ));
        assert_eq!(
            fs::read_to_string(tmp.path().join("index.html")).unwrap(),
            "previous"
        );
    }

    #[test]
    fn output_name_from_config() {
        let tmp = TempDir::new().unwrap();
        let config = IndexConfig {
            output: "tools.html".to_string(),
            ..IndexConfig::default()
        };
        let report = build_index(tmp.path(), &config, &HistoryResolver::new(SameCommit)).unwrap();
        assert_eq!(report.output, tmp.path().join("tools.html"));
        assert!(report.output.is_file());
    }
}
