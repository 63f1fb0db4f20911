//! Index configuration.
//!
//! Handles loading and validating an optional `tool-index.toml` in the root
//! directory. Every key has a default, so a repository of tools needs no config
//! file at all.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output = "index.html"              # Generated page, written to the root
//! template = "template/index.html"   # Page chrome; built-in used if absent
//! entry_page = "index.html"          # A directory is a tool iff it has this file
//! icon = "art.svg"                   # Per-tool icon filename
//! ignore = [".git", "template", ...] # Directory names never treated as tools
//!
//! [site]
//! title = "Tools"
//! icon = "art.svg"                   # Site icon in the built-in header
//! subtitle_html = "..."              # Trusted markup under the heading
//! show_created = true                # Render "Created:" next to "Updated:"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [site]
//! title = "tools.example.dev"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the root directory.
pub const CONFIG_FILE: &str = "tool-index.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Index configuration loaded from `tool-index.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Output filename, relative to the root.
    pub output: String,
    /// Path of the page template, relative to the root.
    pub template: String,
    /// Filename whose presence marks a directory as a tool.
    pub entry_page: String,
    /// Filename of the optional per-tool icon.
    pub icon: String,
    /// Directory names skipped during discovery.
    pub ignore: Vec<String>,
    /// Static chrome of the built-in page.
    pub site: SiteConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            output: "index.html".to_string(),
            template: "template/index.html".to_string(),
            entry_page: "index.html".to_string(),
            icon: "art.svg".to_string(),
            ignore: [
                ".git",
                ".",
                "template",
                ".github",
                "__pycache__",
                "node_modules",
                "dist",
                "build",
                ".idea",
                ".vscode",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            site: SiteConfig::default(),
        }
    }
}

impl IndexConfig {
    /// Validate that file-name settings are usable.
    ///
    /// `entry_page` and `icon` are looked up directly inside each tool
    /// directory and `output` is written to the root, so all three must be
    /// bare filenames.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("output", &self.output),
            ("entry_page", &self.entry_page),
            ("icon", &self.icon),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain filename, got {value:?}"
                )));
            }
        }
        if self.template.trim().is_empty() {
            return Err(ConfigError::Validation(
                "template must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether a directory name is in the ignore set.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored == name)
    }
}

/// Header and footer content of the built-in page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page `<title>` and main heading.
    pub title: String,
    /// Site icon shown next to the heading and used as favicon.
    pub icon: Option<String>,
    /// Markup rendered under the heading. Comes from the site owner, so it is
    /// inserted unescaped.
    pub subtitle_html: String,
    /// Render each tool's first-commit date alongside the last-updated date.
    pub show_created: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Tools".to_string(),
            icon: Some("art.svg".to_string()),
            subtitle_html: "A collection of lightweight, self-contained web tools.".to_string(),
            show_created: true,
        }
    }
}

/// Load config from `tool-index.toml` in the given directory.
///
/// Returns the defaults if the file doesn't exist. Unknown keys and invalid
/// values are errors.
pub fn load_config(root: &Path) -> Result<IndexConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(IndexConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: IndexConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `tool-index.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# tool-index configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Generated landing page, written to the root directory.
output = "index.html"

# Page template, relative to the root. If the file does not exist the
# built-in page is used. A custom template must contain the marker
#   <!-- tool-index:tools -->
# which is replaced by the grid of tool cards.
template = "template/index.html"

# A directory is a tool if it contains this file.
entry_page = "index.html"

# Per-tool icon. Shown on the card if present in the tool's directory.
icon = "art.svg"

# Directory names that are never tools. Names starting with "." are always skipped.
ignore = [
    ".git",
    ".",
    "template",
    ".github",
    "__pycache__",
    "node_modules",
    "dist",
    "build",
    ".idea",
    ".vscode",
]

# ---------------------------------------------------------------------------
# Built-in page chrome (ignored when a template file is used)
# ---------------------------------------------------------------------------
[site]
title = "Tools"

# Site icon next to the heading, also used as favicon. Remove to hide.
icon = "art.svg"

# Markup shown under the heading. Inserted as-is.
subtitle_html = "A collection of lightweight, self-contained web tools."

# Show each tool's first-commit date next to its last-updated date.
show_created = true
"##
}
