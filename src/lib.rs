// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Tolerant Email Body Extraction
//!
//! Recovers readable plain-text and HTML content from raw, frequently
//! non-conformant MIME messages, then heuristically locates a short numeric
//! verification code in the subject or body.
//!
//! # Features
//!
//! - Permissive recursive-descent MIME parsing (never errors on malformed input)
//! - Transfer-encoding reversal (base64, quoted-printable) with charset reinterpretation
//! - HTML sniffing for mislabeled bodies, text-to-HTML synthesis
//! - Four-tier keyword-adjacency verification-code extraction
//!
//! # Example
//!
//! ```rust
//! use mailcode::{VerificationInput, extract_verification_code, parse_email_body};
//!
//! let raw = "From: noreply@example.com\r\n\
//!            Subject: Your code\r\n\
//!            Content-Type: text/plain\r\n\
//!            \r\n\
//!            Your verification code is 493021.";
//! let body = parse_email_body(raw);
//!
//! let code = extract_verification_code(&VerificationInput {
//!     subject: "Your code".into(),
//!     text: body.text.clone(),
//!     html: body.html.clone(),
//! });
//! assert_eq!(code, "493021");
//! ```

mod code;
mod decode;
mod error;
mod headers;
mod html;
mod parser;
mod types;

pub use code::extract_verification_code;
pub use decode::{decode_body_with_charset, decode_header_value};
pub use error::{DecodeError, Result};
pub use headers::{HeaderMap, split_message};
pub use html::{guess_html_from_raw, strip_html, text_to_html};
pub use parser::parse_email_body;
pub use types::{ContentKind, ParsedBody, VerificationInput};
