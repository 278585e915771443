//! Error types for content decoding

use thiserror::Error;

/// Errors that can occur while reversing a transfer encoding or charset.
///
/// These never escape [`crate::parse_email_body`]; the parser resolves every
/// decode failure by falling back to the best prior-stage text. They are
/// surfaced only through the lower-level decode helpers.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The base64 payload contains bytes outside the alphabet
    #[error("invalid base64 payload: {0}")]
    Base64(String),

    /// The quoted-printable payload could not be decoded
    #[error("malformed quoted-printable payload: {0}")]
    QuotedPrintable(String),

    /// The declared charset label names no known encoding
    #[error("unknown charset label: {0}")]
    UnknownCharset(String),
}

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, DecodeError>;
