//! Core types for recovered message content

use serde::{Deserialize, Serialize};

/// Readable content recovered from one raw message.
///
/// Both fields default to empty; an empty pair is a legitimate terminal
/// result for an empty message, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedBody {
    /// Plain-text rendering, empty when no text part was found
    pub text: String,

    /// HTML rendering, possibly sniffed or synthesized from `text`
    pub html: String,

    /// Set when the recursion-depth guard fired and part of the message was
    /// kept as opaque text instead of being descended into
    #[serde(default)]
    pub truncated: bool,
}

impl ParsedBody {
    /// Check whether neither field was recovered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.html.is_empty()
    }

    /// Check whether both fields are populated
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.text.is_empty() && !self.html.is_empty()
    }

    /// Merge another result in, keeping already-populated fields.
    ///
    /// First non-empty value wins per field; part order is significant.
    pub fn merge_first_wins(&mut self, other: Self) {
        if self.text.is_empty() && !other.text.is_empty() {
            self.text = other.text;
        }
        if self.html.is_empty() && !other.html.is_empty() {
            self.html = other.html;
        }
        self.truncated |= other.truncated;
    }

    /// Build a short whitespace-collapsed preview, preferring plain text and
    /// falling back to the stripped HTML.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let plain = if self.text.trim().is_empty() {
            crate::html::strip_html(&self.html)
        } else {
            self.text.clone()
        };
        let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed.chars().take(max_chars).collect()
    }
}

/// Search surface for [`crate::extract_verification_code`].
///
/// All fields are optional; an empty string means the field is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationInput {
    /// Message subject, raw or RFC 2047 encoded
    #[serde(default)]
    pub subject: String,

    /// Plain-text body
    #[serde(default)]
    pub text: String,

    /// HTML body, stripped to text before searching
    #[serde(default)]
    pub html: String,
}

/// Coarse classification of a MIME entity's `Content-Type`.
///
/// A closed set derived by normalized string matching; strict grammar
/// validation is deliberately out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// `text/plain`, or a missing/empty content type
    PlainText,
    /// `text/html`
    Html,
    /// `multipart/mixed`, `multipart/related` and any other non-alternative composite
    MultipartMixed,
    /// `multipart/alternative`
    MultipartAlternative,
    /// A complete raw message embedded as a part
    MessageRfc822,
    /// `text/rfc822-headers`, a headers-only companion part
    Rfc822HeadersOnly,
    /// Anything else (images, attachments, unknown types)
    Other,
}

impl ContentKind {
    /// Classify an already lower-cased `Content-Type` value.
    #[must_use]
    pub fn classify(content_type: &str) -> Self {
        let ct = content_type.trim();
        if ct.starts_with("multipart/alternative") {
            Self::MultipartAlternative
        } else if ct.starts_with("multipart/") {
            Self::MultipartMixed
        } else if ct.contains("rfc822-headers") {
            Self::Rfc822HeadersOnly
        } else if ct.starts_with("message/rfc822") {
            Self::MessageRfc822
        } else if ct.contains("text/html") {
            Self::Html
        } else if ct.is_empty() || ct.contains("text/plain") {
            Self::PlainText
        } else {
            Self::Other
        }
    }

    /// Check whether this entity is a composite that must be split on a boundary
    #[must_use]
    pub const fn is_multipart(self) -> bool {
        matches!(self, Self::MultipartMixed | Self::MultipartAlternative)
    }
}
