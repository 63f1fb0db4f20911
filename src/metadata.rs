//! Display metadata extraction from a tool's entry page.
//!
//! The entry page is scraped, not rendered. Extraction is best-effort: each
//! field comes from a short chain of named stages, and the first stage that
//! yields a non-empty value wins.
//!
//! ## Resolution priority
//!
//! - **Name**: `<title>` text before the first `|` → slug-derived default
//! - **Description**: `<meta name="description">` → `<p class="subtitle">` text → `""`
//! - **Icon**: icon file next to the entry page → none
//!
//! The `|` split strips site-wide suffixes such as `Foo Bar | tools.example.dev`.
//! Subtitle blocks may contain links and other inline markup, so tags are
//! stripped and whitespace collapsed.
//!
//! All patterns are case-insensitive and match across line breaks.

use crate::naming;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title(?:\s[^>]*)?>(.*?)</title\s*>").expect("invalid regex")
});

static META_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+name\s*=\s*["']description["']\s+content\s*=\s*"(.*?)"\s*/?>"#)
        .expect("invalid regex")
});

static SUBTITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<p\s+class\s*=\s*["']subtitle["']\s*>(.*?)</p\s*>"#).expect("invalid regex")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("invalid regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("invalid regex"));

/// Display metadata for one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolMetadata {
    pub display_name: String,
    pub description: String,
    pub icon: Option<String>,
}

impl ToolMetadata {
    /// Metadata for a tool whose entry page yielded nothing.
    pub fn defaults(slug: &str) -> Self {
        Self {
            display_name: naming::default_display_name(slug),
            description: String::new(),
            icon: None,
        }
    }
}

/// Extract metadata from entry-page markup.
///
/// `icon` is the already-resolved icon stage result (see [`find_icon`]), kept
/// separate so this function stays pure.
pub fn extract(slug: &str, html: &str, icon: Option<String>) -> ToolMetadata {
    let display_name = resolve(&[title_stage(html).as_deref()])
        .unwrap_or_else(|| naming::default_display_name(slug));
    let description = resolve(&[
        meta_description_stage(html).as_deref(),
        subtitle_stage(html).as_deref(),
    ])
    .unwrap_or_default();

    ToolMetadata {
        display_name,
        description,
        icon,
    }
}

/// Resolve a field from multiple sources.
///
/// Takes optional values in priority order and returns the first non-None,
/// non-empty value, trimmed.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Title stage: `<title>` content up to the first `|`.
pub fn title_stage(html: &str) -> Option<String> {
    let raw = TITLE.captures(html)?.get(1)?.as_str();
    let before_pipe = raw.split('|').next().unwrap_or_default();
    Some(decode_entities(&collapse_whitespace(before_pipe)))
}

/// Meta description stage: the `content` attribute, verbatim apart from
/// entity decoding.
pub fn meta_description_stage(html: &str) -> Option<String> {
    let raw = META_DESCRIPTION.captures(html)?.get(1)?.as_str();
    Some(decode_entities(raw))
}

/// Subtitle stage: the `<p class="subtitle">` block reduced to plain text.
pub fn subtitle_stage(html: &str) -> Option<String> {
    let raw = SUBTITLE.captures(html)?.get(1)?.as_str();
    Some(decode_entities(&collapse_whitespace(&strip_tags(raw))))
}

/// Icon stage: the icon filename, if that file sits directly in `dir`.
pub fn find_icon(dir: &Path, icon_name: &str) -> Option<String> {
    dir.join(icon_name)
        .is_file()
        .then(|| icon_name.to_string())
}

/// Remove markup tags, keeping their text content.
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Decode the basic character references so re-escaping on output does not
/// produce `&amp;amp;`. `&amp;` goes last to avoid double decoding.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
