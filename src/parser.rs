//! Recursive MIME entity parser

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::decode::decode_body_with_charset;
use crate::headers::{HeaderMap, boundary_param, split_message};
use crate::html::{guess_html_from_raw, text_to_html};
use crate::types::{ContentKind, ParsedBody};

/// Nesting cap for `multipart/*` and `message/rfc822` descent; beyond it the
/// remainder is kept as opaque text and the result is flagged truncated.
const MAX_DEPTH: usize = 16;

// Last-resort sniff: a balanced open/close tag pair anywhere in the body
static TAG_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\w+.*?>.*</\w+>").unwrap());

/// Recover readable text and HTML from a complete raw message
/// (headers + body, CRLF or LF line endings).
///
/// Never fails on malformed input; both fields empty is a valid outcome.
#[must_use]
pub fn parse_email_body(raw: &str) -> ParsedBody {
    if raw.is_empty() {
        return ParsedBody::default();
    }
    let parsed = parse_message(raw, 0);
    debug!(
        text_len = parsed.text.len(),
        html_len = parsed.html.len(),
        truncated = parsed.truncated,
        "parsed message body"
    );
    parsed
}

/// Split a complete raw message and parse the resulting entity.
fn parse_message(raw: &str, depth: usize) -> ParsedBody {
    let (headers, body) = split_message(raw);
    parse_entity(&headers, body, depth)
}

fn parse_entity(headers: &HeaderMap, body: &str, depth: usize) -> ParsedBody {
    if depth >= MAX_DEPTH {
        warn!(depth, "entity nesting too deep, keeping remainder as opaque text");
        return ParsedBody {
            text: body.to_string(),
            html: String::new(),
            truncated: true,
        };
    }

    let ct_raw = headers.get("content-type");
    let ct = ct_raw.to_lowercase();
    let transfer_enc = headers.get("content-transfer-encoding").to_lowercase();
    let kind = ContentKind::classify(&ct);

    let mut out = ParsedBody::default();
    match kind {
        ContentKind::MultipartMixed | ContentKind::MultipartAlternative => {
            // boundary is case-sensitive, extract it from the original-case value
            let boundary = boundary_param(ct_raw);
            if boundary.is_empty() {
                debug!("multipart entity without boundary, using whole-body heuristics");
            } else {
                parse_parts(&mut out, body, &boundary, depth);
            }
        }
        ContentKind::PlainText
        | ContentKind::Html
        | ContentKind::MessageRfc822
        | ContentKind::Rfc822HeadersOnly
        | ContentKind::Other => {
            let decoded = decode_body_with_charset(body, &transfer_enc, &ct);
            // Without any declared type, sniff for a mislabeled HTML document
            // before defaulting to plain text.
            if ct.is_empty() {
                let sniffed =
                    guess_html_from_raw(if decoded.is_empty() { body } else { &decoded });
                if !sniffed.is_empty() {
                    return ParsedBody {
                        html: sniffed,
                        ..ParsedBody::default()
                    };
                }
            }
            if matches!(kind, ContentKind::Html) {
                out.html = decoded;
            } else {
                out.text = decoded;
            }
        }
    }

    // Post-merge fallbacks over the original, undecoded body. Skipped for
    // plain leaf parts inside a multipart: synthesizing HTML there would let
    // an early text part shadow a later real text/html sibling.
    if kind.is_multipart() || depth == 0 {
        if out.html.is_empty() {
            out.html = guess_html_from_raw(body);
            if out.html.is_empty() && TAG_PAIR_RE.is_match(body) {
                out.html = body.to_string();
            }
        }
        if out.html.is_empty() && !out.text.is_empty() {
            out.html = text_to_html(&out.text);
        }
    }
    out
}

/// Split a multipart body and merge sub-entity results first-wins,
/// stopping as soon as both fields are populated.
fn parse_parts(out: &mut ParsedBody, body: &str, boundary: &str, depth: usize) {
    for part in split_multipart(body, boundary) {
        let (part_headers, part_body) = split_message(&part);
        let part_ct = part_headers.get("content-type").to_lowercase();
        let nested = match ContentKind::classify(&part_ct) {
            ContentKind::MultipartMixed | ContentKind::MultipartAlternative => {
                parse_entity(&part_headers, part_body, depth + 1)
            }
            // a complete raw message embedded as a part
            ContentKind::MessageRfc822 => parse_message(part_body, depth + 1),
            // headers-only companion part, the real body follows it
            ContentKind::Rfc822HeadersOnly => continue,
            ContentKind::PlainText | ContentKind::Html | ContentKind::Other => {
                parse_entity(&part_headers, part_body, depth + 1)
            }
        };
        out.merge_first_wins(nested);
        if out.is_complete() {
            break;
        }
    }
}

/// Partition a body into its parts using a textual boundary delimiter.
///
/// Permissive by design: delimiter lines only need to equal `--boundary`
/// after trimming, preamble lines are discarded, and a missing closing
/// delimiter flushes whatever accumulated.
fn split_multipart(body: &str, boundary: &str) -> Vec<String> {
    let delim = format!("--{boundary}");
    let end_delim = format!("{delim}--");
    let mut parts = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_part = false;
    for raw_line in body.lines() {
        let line = raw_line.trim();
        if line == delim {
            if in_part && !current.is_empty() {
                parts.push(current.join("\n"));
            }
            current.clear();
            in_part = true;
            continue;
        }
        if line == end_delim {
            break;
        }
        if in_part {
            current.push(raw_line);
        }
    }
    // flush the last open part whether the closing delimiter appeared or not
    if in_part && !current.is_empty() {
        parts.push(current.join("\n"));
    }
    parts
}
