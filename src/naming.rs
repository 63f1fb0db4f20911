//! Derived names for tool directories.
//!
//! A tool's directory name is its slug. Everything else the index needs before
//! looking inside the directory is derived from that slug:
//!
//! - `qr-code-maker/` → url `/qr-code-maker/`
//! - `qr-code-maker/` → display name "Qr Code Maker"
//!
//! The display name is only a fallback; an entry-page `<title>` replaces it.

/// Root-relative URL a tool is served from.
pub fn tool_url(slug: &str) -> String {
    format!("/{slug}/")
}

/// Fallback display name: dashes become spaces, then each word is title-cased.
///
/// Title-casing follows the usual word rule: a letter is uppercased when it
/// does not follow another letter, and lowercased otherwise. Digits and
/// punctuation break words, so `3d-viewer` becomes "3D Viewer".
///
/// - `"json-formatter"` → "Json Formatter"
/// - `"CSV-to-SQL"` → "Csv To Sql"
/// - `"wip_drafts"` → "Wip_Drafts"
pub fn default_display_name(slug: &str) -> String {
    title_case(&slug.replace('-', " "))
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}
