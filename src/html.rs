//! HTML sniffing, text conversion, and entity stripping

use std::sync::LazyLock;

use regex::{Captures, Regex};

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>").unwrap());

static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<style.*?</style>").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static CHAR_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&#(?:x([0-9a-f]+)|([0-9]+));").unwrap());

static NAMED_ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)&[a-z]+;").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Recover an HTML document mislabeled as plain text.
///
/// Case-insensitively looks for `<html` or `<!doctype html` and returns the
/// substring up to the last `</html>` at or after it, or empty.
#[must_use]
pub fn guess_html_from_raw(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    // ASCII lowering keeps byte offsets valid in the original
    let lower = raw.to_ascii_lowercase();
    let Some(start) = lower.find("<html").or_else(|| lower.find("<!doctype html")) else {
        return String::new();
    };
    lower[start..].rfind("</html>").map_or_else(String::new, |rel| {
        raw[start..start + rel + "</html>".len()].to_string()
    })
}

/// Wrap escaped text in a whitespace-preserving container so a text-only
/// message still renders with its line breaks.
#[must_use]
pub fn text_to_html(text: &str) -> String {
    format!("<div style=\"white-space:pre-wrap\">{}</div>", escape_html(text))
}

/// Reduce HTML to a plain-text search surface.
///
/// Drops script/style blocks and all tags, resolves numeric character
/// references, collapses named entities and whitespace runs to single
/// spaces, and trims. Used only for searching, never to mutate stored HTML.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let no_script = SCRIPT_RE.replace_all(html, " ");
    let no_style = STYLE_RE.replace_all(&no_script, " ");
    let no_tags = TAG_RE.replace_all(&no_style, " ");
    let resolved = CHAR_REF_RE.replace_all(&no_tags, char_ref_to_string);
    let no_entities = NAMED_ENTITY_RE.replace_all(&resolved, " ");
    WHITESPACE_RE.replace_all(&no_entities, " ").trim().to_string()
}

fn char_ref_to_string(caps: &Captures<'_>) -> String {
    let parsed = caps.get(1).map_or_else(
        || caps[2].parse::<u32>(),
        |hex| u32::from_str_radix(hex.as_str(), 16),
    );
    parsed
        .ok()
        .and_then(char::from_u32)
        .map_or_else(|| " ".to_string(), |c| c.to_string())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
