//! Verification-code extraction heuristics
//!
//! Four ordered tiers, first normalized hit wins: keyword-adjacent digits in
//! the subject, keyword-adjacent digits in the body, any standalone digit
//! run in the body, and finally a plain digit run in the subject. The body
//! is preferred over the subject for keyword-free fallback because subjects
//! often carry unrelated ticket or order numbers.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::decode::decode_header_value;
use crate::html::strip_html;
use crate::types::VerificationInput;

const MIN_DIGITS: usize = 4;
const MAX_DIGITS: usize = 8;

/// Multilingual verification keywords (English plus CJK equivalents).
const KEYWORD: &str = "(?:verification|one[-\\s]?time|two[-\\s]?factor|2fa|security|auth|login\
|confirm|code|otp|验证码|校验码|驗證碼|確認碼|認證碼|認証コード|인증코드|코드)";

/// 4-8 digits allowing a single interleaved separator between neighbors
/// (space, NBSP, dashes, underscore, dots, middots, bullets, apostrophes).
const CODE_RUN: &str = r"[0-9](?:[\x{00A0}\s\-–—_.·•∙‧'’]?[0-9]){3,7}";

static SUBJECT_KW_THEN_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i){KEYWORD}[^\n\r\d]{{0,20}}({CODE_RUN})")).unwrap());

static SUBJECT_CODE_THEN_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)({CODE_RUN})[^\n\r\d]{{0,20}}{KEYWORD}")).unwrap());

static BODY_KW_THEN_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i){KEYWORD}[^\n\r\d]{{0,30}}({CODE_RUN})")).unwrap());

static BODY_CODE_THEN_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)({CODE_RUN})[^\n\r\d]{{0,30}}{KEYWORD}")).unwrap());

static ANY_CODE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(CODE_RUN).unwrap());

static PLAIN_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4,8}").unwrap());

/// Heuristically locate a 4-8 digit verification code in a message.
///
/// Returns the digits with separators stripped, or an empty string; absence
/// of a match is a common, valid outcome. The subject is passed through the
/// encoded-word decoder first so `=?UTF-8?B?…?=` subjects still match.
#[must_use]
pub fn extract_verification_code(input: &VerificationInput) -> String {
    let subject = decode_header_value(&input.subject);
    let body = format!("{} {}", input.text, strip_html(&input.html))
        .trim()
        .to_string();

    for re in [&SUBJECT_KW_THEN_CODE, &SUBJECT_CODE_THEN_KW] {
        if let Some(code) = keyword_adjacent(&subject, re) {
            debug!(tier = "subject-keyword", "verification code matched");
            return code;
        }
    }
    for re in [&BODY_KW_THEN_CODE, &BODY_CODE_THEN_KW] {
        if let Some(code) = keyword_adjacent(&body, re) {
            debug!(tier = "body-keyword", "verification code matched");
            return code;
        }
    }
    if let Some(code) = standalone_code(&body) {
        debug!(tier = "body-standalone", "verification code matched");
        return code;
    }
    if let Some(code) = subject_plain_digits(&subject) {
        debug!(tier = "subject-plain", "verification code matched");
        return code;
    }
    String::new()
}

/// First keyword-adjacent candidate whose digit run has non-digit neighbors.
fn keyword_adjacent(haystack: &str, re: &Regex) -> Option<String> {
    for caps in re.captures_iter(haystack) {
        let Some(m) = caps.get(1) else { continue };
        if !digit_bounded(haystack, m.start(), m.end()) {
            continue;
        }
        let code = normalize_digits(m.as_str());
        if !code.is_empty() {
            return Some(code);
        }
    }
    None
}

/// Any separator-tolerant digit run, independent of keywords.
fn standalone_code(body: &str) -> Option<String> {
    for m in ANY_CODE_RUN.find_iter(body) {
        if !digit_bounded(body, m.start(), m.end()) {
            continue;
        }
        let code = normalize_digits(m.as_str());
        if !code.is_empty() {
            return Some(code);
        }
    }
    None
}

/// Weakest tier: an isolated plain digit run in the subject.
fn subject_plain_digits(subject: &str) -> Option<String> {
    for m in PLAIN_DIGITS.find_iter(subject) {
        if !digit_bounded(subject, m.start(), m.end()) {
            continue;
        }
        // `#`-prefixed runs are ticket/order references, not codes
        if subject[..m.start()].ends_with('#') {
            continue;
        }
        let code = normalize_digits(m.as_str());
        if !code.is_empty() {
            return Some(code);
        }
    }
    None
}

/// Reject candidates clipped out of a longer digit run.
fn digit_bounded(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit())
}

/// Strip separators and enforce the 4-8 digit length window.
fn normalize_digits(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
        digits
    } else {
        String::new()
    }
}
