//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Each tool is shown by its positional index and display name, with its URL,
//! dates, and a description preview as indented context lines:
//!
//! ```text
//! Tools
//! 001 JSON Formatter → /json-formatter/
//!     Updated: 2024-05-02  Created: 2023-12-31
//!     Pretty-prints and validates JSON documents in the browser, with...
//! 002 Timer → /timer/
//!     Updated: 2024-01-15
//!
//! Generated index.html with 2 tools
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O, so they are easy to
//! test. `print_*` wrappers write their lines to stdout. Diagnostics (warnings
//! about individual tools) go through `tracing` to stderr instead.

use crate::generate::format_date;
use crate::types::ToolRecord;
use std::path::Path;

const DESCRIPTION_PREVIEW: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Format the ranked tool listing.
pub fn format_tools(tools: &[ToolRecord]) -> Vec<String> {
    let mut lines = vec!["Tools".to_string()];
    if tools.is_empty() {
        lines.push("    (none found)".to_string());
        return lines;
    }

    for (i, tool) in tools.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            tool.display_name,
            tool.url
        ));

        let mut dates = format!("    Updated: {}", format_date(&tool.last_updated));
        if let Some(created) = &tool.first_created {
            dates.push_str(&format!("  Created: {}", format_date(created)));
        }
        lines.push(dates);

        let preview = truncate_desc(tool.description.trim(), DESCRIPTION_PREVIEW);
        if !preview.is_empty() {
            lines.push(format!("    {}", preview));
        }
    }
    lines
}

/// Format the build summary: the listing plus the written file.
pub fn format_build_output(tools: &[ToolRecord], output: &Path) -> Vec<String> {
    let mut lines = format_tools(tools);
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.display().to_string());
    let noun = if tools.len() == 1 { "tool" } else { "tools" };
    lines.push(String::new());
    lines.push(format!("Generated {} with {} {}", name, tools.len(), noun));
    lines
}

/// Print the tool listing to stdout.
pub fn print_tools(tools: &[ToolRecord]) {
    for line in format_tools(tools) {
        println!("{}", line);
    }
}

/// Print the build summary to stdout.
pub fn print_build_output(tools: &[ToolRecord], output: &Path) {
    for line in format_build_output(tools, output) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("short", 10), "short");
    }

    #[test]
    fn truncate_desc_exact() {
        assert_eq!(truncate_desc("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn truncate_desc_long() {
        assert_eq!(truncate_desc("abcdefghijk", 5), "abcde...");
    }

    #[test]
    fn truncate_desc_multibyte() {
        assert_eq!(truncate_desc("ééééé", 2), "éé...");
    }

    #[test]
    fn format_tools_empty() {
        assert_eq!(format_tools(&[]), vec!["Tools", "    (none found)"]);
    }

    #[test]
    fn format_tools_entries() {
        let mut first = record("json-formatter", "2024-05-02T10:00:00Z");
        first.display_name = "JSON Formatter".to_string();
        first.description = "Pretty-prints JSON".to_string();
        first.first_created = Some(ts("2023-12-31T12:00:00Z"));
        let mut second = record("timer", "2024-01-15T08:30:00Z");
        second.first_created = None;

        let lines = format_tools(&[first, second]);
        assert_eq!(
            lines,
            vec![
                "Tools",
                "001 JSON Formatter \u{2192} /json-formatter/",
                "    Updated: 2024-05-02  Created: 2023-12-31",
                "    Pretty-prints JSON",
                "002 Timer \u{2192} /timer/",
                "    Updated: 2024-01-15",
            ]
        );
    }

    #[test]
    fn format_build_output_summary() {
        let tools = vec![record("timer", "2024-01-15T08:30:00Z")];
        let lines = format_build_output(&tools, Path::new("/srv/tools/index.html"));
        assert_eq!(lines.last().unwrap(), "Generated index.html with 1 tool");

        let lines = format_build_output(&[], Path::new("index.html"));
        assert_eq!(lines.last().unwrap(), "Generated index.html with 0 tools");
    }
}
