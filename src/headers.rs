//! Header block splitting and parsing

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

// The boundary token is case-sensitive, so only the parameter name matches
// case-insensitively and the captured value keeps its original case.
static BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)boundary\s*=\s*"?([^";\r\n]+)"?"#).unwrap());

static CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*"?([^";]+)"#).unwrap());

/// Case-insensitive header mapping.
///
/// Keys are stored lower-cased; a missing header reads as an empty string,
/// never as an error. Duplicate header lines overwrite earlier ones.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap(HashMap<String, String>);

impl HeaderMap {
    /// Look up a header by name (any case). Missing headers yield `""`.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.0
            .get(&name.to_lowercase())
            .map_or("", String::as_str)
    }

    /// Check whether any header was parsed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Split a raw block into its header map and body remainder.
///
/// Splits at the first blank line, preferring `CRLFCRLF` over `LFLF`. When no
/// blank line exists the whole input is treated as body with empty headers.
#[must_use]
pub fn split_message(input: &str) -> (HeaderMap, &str) {
    if let Some(idx) = input.find("\r\n\r\n") {
        (parse_header_block(&input[..idx]), &input[idx + 4..])
    } else if let Some(idx) = input.find("\n\n") {
        (parse_header_block(&input[..idx]), &input[idx + 2..])
    } else {
        (HeaderMap::default(), input)
    }
}

/// Parse a raw header block, merging folded continuation lines.
///
/// Lines matching neither a `name: value` pair nor a continuation are
/// ignored; malformed blocks never raise.
fn parse_header_block(raw: &str) -> HeaderMap {
    let mut map: HashMap<String, String> = HashMap::new();
    let mut last_key = String::new();
    for line in raw.lines() {
        if line.starts_with(char::is_whitespace) && !last_key.is_empty() {
            if let Some(value) = map.get_mut(&last_key) {
                value.push(' ');
                value.push_str(line.trim());
            }
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let key = name.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            map.insert(key.clone(), value.trim_start().to_string());
            last_key = key;
        }
    }
    HeaderMap(map)
}

/// Extract the `boundary` parameter from an original-case `Content-Type`
/// value. Empty when absent; callers fall through to whole-body heuristics.
pub(crate) fn boundary_param(content_type: &str) -> String {
    BOUNDARY_RE
        .captures(content_type)
        .and_then(|caps| caps.get(1))
        .map_or_else(String::new, |m| m.as_str().trim().to_string())
}

/// Extract the lower-cased `charset` parameter from a `Content-Type` value.
pub(crate) fn charset_param(content_type: &str) -> String {
    CHARSET_RE
        .captures(content_type)
        .and_then(|caps| caps.get(1))
        .map_or_else(String::new, |m| m.as_str().trim().to_lowercase())
}
