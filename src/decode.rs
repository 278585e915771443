//! Transfer-encoding reversal and charset reinterpretation

use std::borrow::Cow;
use std::sync::LazyLock;

use charset::Charset;
use data_encoding::{BASE64, BASE64_NOPAD};
use regex::{Captures, Regex};
use tracing::debug;

use crate::error::{DecodeError, Result};
use crate::headers::charset_param;

static ENCODED_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=\?([^?\s]+)\?([bBqQ])\?([^?\s]*)\?=").unwrap());

/// Reverse a transfer encoding, then reinterpret the bytes under the charset
/// declared on the content type (default UTF-8).
///
/// Never fails: a malformed base64 payload yields the original encoded text,
/// an unknown charset falls back to lossy UTF-8. Transfer decoding runs
/// before charset decoding, and the intermediate value stays raw bytes.
#[must_use]
pub fn decode_body_with_charset(body: &str, transfer_encoding: &str, content_type: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    let bytes: Cow<'_, [u8]> = match transfer_encoding.trim().to_ascii_lowercase().as_str() {
        "base64" => match decode_base64(body) {
            Ok(decoded) => Cow::Owned(decoded),
            Err(err) => {
                debug!("base64 decode failed, keeping encoded body: {err}");
                return body.to_string();
            }
        },
        "quoted-printable" => match decode_quoted_printable(body) {
            Ok(decoded) => Cow::Owned(decoded),
            Err(err) => {
                debug!("quoted-printable decode failed, keeping encoded body: {err}");
                Cow::Borrowed(body.as_bytes())
            }
        },
        // 7bit/8bit/binary and anything unrecognized pass through
        _ => Cow::Borrowed(body.as_bytes()),
    };
    decode_with_charset_label(&bytes, &charset_param(content_type))
}

/// Decode RFC 2047 encoded words (`=?charset?B|Q?payload?=`) in a header
/// value, leaving any undecodable token in place literally.
#[must_use]
pub fn decode_header_value(value: &str) -> String {
    if !value.contains("=?") {
        return value.to_string();
    }
    ENCODED_WORD_RE
        .replace_all(value, |caps: &Captures<'_>| {
            decode_encoded_word(&caps[1], &caps[2], &caps[3])
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_encoded_word(label: &str, mode: &str, payload: &str) -> Option<String> {
    let bytes = match mode {
        "B" | "b" => decode_base64(payload).ok()?,
        // Q mode: underscore encodes a space
        _ => decode_quoted_printable(&payload.replace('_', " ")).ok()?,
    };
    let charset = Charset::for_label_no_replacement(label.as_bytes())?;
    let (text, _) = charset.decode_without_bom_handling(&bytes);
    Some(text.into_owned())
}

fn decode_base64(payload: &str) -> Result<Vec<u8>> {
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(cleaned.as_bytes())
        .or_else(|_| BASE64_NOPAD.decode(cleaned.trim_end_matches('=').as_bytes()))
        .map_err(|err| DecodeError::Base64(err.to_string()))
}

fn decode_quoted_printable(payload: &str) -> Result<Vec<u8>> {
    // Robust mode keeps `=` sequences without two valid hex digits literal
    // and strips soft line breaks, matching how real mail deviates.
    quoted_printable::decode(payload, quoted_printable::ParseMode::Robust)
        .map_err(|err| DecodeError::QuotedPrintable(err.to_string()))
}

fn decode_with_charset_label(bytes: &[u8], label: &str) -> String {
    if matches!(label, "" | "utf-8" | "utf8" | "us-ascii") {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    match decode_charset(bytes, label) {
        Ok(text) => text,
        Err(err) => {
            debug!("charset decode failed, falling back to utf-8: {err}");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn decode_charset(bytes: &[u8], label: &str) -> Result<String> {
    let charset = Charset::for_label_no_replacement(label.as_bytes())
        .ok_or_else(|| DecodeError::UnknownCharset(label.to_string()))?;
    let (text, _) = charset.decode_without_bom_handling(bytes);
    Ok(text.into_owned())
}
