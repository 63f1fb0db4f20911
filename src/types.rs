//! The record type shared by every pipeline stage.
//!
//! A [`ToolRecord`] is built once per candidate directory, never mutated, and
//! dropped at process exit. Serializes to JSON for `tool-index check --json`.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One entry in the tool registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolRecord {
    /// Directory name. Unique within a run since the filesystem guarantees it.
    pub slug: String,
    /// Root-relative URL the tool is served at: `/{slug}/`.
    pub url: String,
    /// Entry-page title, or the slug-derived fallback.
    pub display_name: String,
    /// Meta description or subtitle text. Empty when neither exists.
    pub description: String,
    /// Icon filename relative to the tool directory, if the icon file exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Newest change to the directory.
    pub last_updated: DateTime<FixedOffset>,
    /// Oldest change to the directory. Never later than `last_updated`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_created: Option<DateTime<FixedOffset>>,
}

impl ToolRecord {
    /// URL of the icon asset, relative to the site root.
    pub fn icon_url(&self) -> Option<String> {
        self.icon.as_ref().map(|icon| format!("{}{}", self.url, icon))
    }
}
