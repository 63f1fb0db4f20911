//! Shared test utilities for the tool-index test suite.
//!
//! Provides fixture builders for tool directories and record constructors for
//! tests that exercise ranking and rendering without touching the filesystem.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_tool(tmp.path(), "json-formatter", "<title>JSON</title>");
//!
//! let tool = record("json-formatter", "2024-05-01T00:00:00Z");
//! ```

use chrono::{DateTime, FixedOffset};
use std::fs;
use std::path::Path;

use crate::naming;
use crate::types::ToolRecord;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create `root/slug/index.html` with the given markup.
pub fn write_tool(root: &Path, slug: &str, entry_html: &str) {
    let dir = root.join(slug);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.html"), entry_html).unwrap();
}

// =========================================================================
// Record constructors
// =========================================================================

/// Parse an RFC 3339 timestamp. Panics on malformed input.
pub fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap_or_else(|e| panic!("bad timestamp {s:?}: {e}"))
}

/// A record with default metadata, updated and created at `updated`.
pub fn record(slug: &str, updated: &str) -> ToolRecord {
    let at = ts(updated);
    ToolRecord {
        slug: slug.to_string(),
        url: naming::tool_url(slug),
        display_name: naming::default_display_name(slug),
        description: String::new(),
        icon: None,
        last_updated: at,
        first_created: Some(at),
    }
}
