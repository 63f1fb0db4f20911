//! Landing page rendering and output.
//!
//! Final stage of the index pipeline. Takes the ranked tools and produces the
//! one generated file.
//!
//! ## Page Chrome
//!
//! The page around the tool grid comes from one of two places:
//!
//! - **Template file** (`template/index.html` by default): used if it exists.
//!   The grid replaces the [`SLOT`] marker. A template without the marker has
//!   the contents of its `<main class="container">` element replaced instead,
//!   so a plain tool scaffold works as the page template. A template with
//!   neither is ignored with a warning.
//! - **Built-in document**: a header with the site title, icon and subtitle,
//!   styled by `static/index.css` (embedded at compile time).
//!
//! ## Tool Grid
//!
//! The grid is always rendered with [maud](https://maud.lambda.xyz/), so every
//! piece of tool-authored text (names, descriptions) is escaped. A tool whose
//! `<title>` contains `<script>` shows up as text, not markup. Only the site
//! owner's own chrome (template file, `subtitle_html`) is inserted unescaped.
//!
//! ## Output
//!
//! The page is rendered completely in memory before the output file is
//! touched, so a render failure leaves any previous output in place.

use crate::config::SiteConfig;
use crate::types::ToolRecord;
use chrono::{DateTime, FixedOffset};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use regex::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

/// Marker in a template file that is replaced by the tool grid.
pub const SLOT: &str = "<!-- tool-index:tools -->";

const CSS: &str = include_str!("../static/index.css");

static MAIN_CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<main\s+class\s*=\s*["']container["']\s*>.*?</main\s*>"#)
        .expect("invalid regex")
});

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("cannot read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Static content surrounding the tool grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Chrome {
    BuiltIn,
    /// Template whose [`SLOT`] marker is replaced by the grid.
    Template { path: PathBuf, html: String },
    /// Template whose `<main class="container">` element receives the grid.
    Container { path: PathBuf, html: String },
}

/// Pick the page chrome: the template file if it exists, else the built-in page.
///
/// An existing template that can't be read is an error. One with no place to
/// put the grid falls back to the built-in page.
pub fn load_chrome(root: &Path, template: &str) -> Result<Chrome, GenerateError> {
    let path = root.join(template);
    if !path.exists() {
        return Ok(Chrome::BuiltIn);
    }
    let html = fs::read_to_string(&path).map_err(|source| GenerateError::TemplateRead {
        path: path.clone(),
        source,
    })?;
    if html.contains(SLOT) {
        debug!(template = %path.display(), "filling template marker");
        Ok(Chrome::Template { path, html })
    } else if MAIN_CONTAINER.is_match(&html) {
        debug!(template = %path.display(), "filling template main container");
        Ok(Chrome::Container { path, html })
    } else {
        warn!(
            template = %path.display(),
            "template has no tools marker or main container, using built-in page"
        );
        Ok(Chrome::BuiltIn)
    }
}

/// Render the complete page.
pub fn render_page(tools: &[ToolRecord], site: &SiteConfig, chrome: &Chrome) -> String {
    let grid = render_tool_grid(tools, site.show_created);
    match chrome {
        Chrome::BuiltIn => base_document(site, grid).into_string(),
        Chrome::Template { html, .. } => html.replacen(SLOT, &grid.into_string(), 1),
        Chrome::Container { html, .. } => {
            let main = html! { main.container { (grid) } }.into_string();
            MAIN_CONTAINER.replace(html, NoExpand(&main)).into_owned()
        }
    }
}

/// Write the rendered page to `root/output`, replacing any existing file.
pub fn write_output(root: &Path, output: &str, html: &str) -> Result<PathBuf, GenerateError> {
    let path = root.join(output);
    fs::write(&path, html).map_err(|source| GenerateError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Format a timestamp as `YYYY-MM-DD` in its own offset.
pub fn format_date(at: &DateTime<FixedOffset>) -> String {
    at.format("%Y-%m-%d").to_string()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the built-in document around the grid
fn base_document(site: &SiteConfig, grid: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(icon) = &site.icon {
                    link rel="icon" type="image/svg+xml" href=(icon);
                }
                title { (site.title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                header {
                    div.brand {
                        @if let Some(icon) = &site.icon {
                            img.tool-icon src=(icon) alt={ (site.title) " icon" };
                        }
                        h1 { (site.title) }
                    }
                    @if !site.subtitle_html.trim().is_empty() {
                        p.subtitle { (PreEscaped(&site.subtitle_html)) }
                    }
                }
                main.container {
                    (grid)
                }
            }
        }
    }
}

/// Renders the grid of tool cards. Empty input gives an empty grid.
pub fn render_tool_grid(tools: &[ToolRecord], show_created: bool) -> Markup {
    html! {
        div.tool-grid {
            @for tool in tools {
                (render_tool_card(tool, show_created))
            }
        }
    }
}

fn render_tool_card(tool: &ToolRecord, show_created: bool) -> Markup {
    let created = tool.first_created.filter(|_| show_created);

    html! {
        a.tool-card href=(tool.url) {
            div.tool-card-header {
                @if let Some(src) = tool.icon_url() {
                    img.tool-card-icon src=(src) alt="";
                } @else {
                    div.tool-card-icon.placeholder {}
                }
                h2 { (tool.display_name) }
            }
            p { (tool.description) }
            div.tool-card-footer {
                span { "Updated: " (format_date(&tool.last_updated)) }
                @if let Some(created) = created {
                    span { "Created: " (format_date(&created)) }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
