//! Cleanup for provider text fields
//!
//! Overviews and homepage fields arrive with embedded HTML fragments
//! (`<br>`, anchors, entities) that callers rendering plain text must not see.

use regex::Regex;
use std::sync::OnceLock;

static BREAK_TAG: OnceLock<Option<Regex>> = OnceLock::new();
static ANY_TAG: OnceLock<Option<Regex>> = OnceLock::new();
static HREF_ATTR: OnceLock<Option<Regex>> = OnceLock::new();

fn break_tag() -> Option<&'static Regex> {
    BREAK_TAG
        .get_or_init(|| Regex::new(r"(?i)<br\s*/?>").ok())
        .as_ref()
}

fn any_tag() -> Option<&'static Regex> {
    ANY_TAG.get_or_init(|| Regex::new(r"<[^>]*>").ok()).as_ref()
}

fn href_attr() -> Option<&'static Regex> {
    HREF_ATTR
        .get_or_init(|| Regex::new(r#"(?i)href\s*=\s*["']([^"']+)["']"#).ok())
        .as_ref()
}

/// Converts provider markup into plain text
///
/// `<br>` variants become newlines, every other tag is removed, common
/// entities are decoded, and each line is trimmed. Blank lines are dropped.
pub fn strip_markup(input: &str) -> String {
    let with_breaks = match break_tag() {
        Some(re) => re.replace_all(input, "\n").into_owned(),
        None => input.to_string(),
    };
    let without_tags = match any_tag() {
        Some(re) => re.replace_all(&with_breaks, "").into_owned(),
        None => with_breaks,
    };

    decode_entities(&without_tags)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts the first link target from a homepage field
///
/// The field is either an anchor fragment or a bare URL.
pub fn extract_href(input: &str) -> Option<String> {
    if let Some(captures) = href_attr().and_then(|re| re.captures(input)) {
        return captures.get(1).map(|m| decode_entities(m.as_str().trim()));
    }

    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Some(trimmed.to_string());
    }

    strip_markup(input)
        .split_whitespace()
        .find(|token| token.starts_with("http://") || token.starts_with("https://"))
        .map(str::to_string)
}

fn decode_entities(input: &str) -> String {
    input
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
