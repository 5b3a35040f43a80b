//! Raw message decoding
//!
//! Turns RFC 5322 bytes into the header list and plain-text body the
//! metadata normalizer consumes. Charset and transfer-encoding handling is
//! left to `mailparse`.

use crate::error::{ExtractError, Result};
use crate::metadata::header_value;
use crate::types::EmailMetadata;
use std::fmt::Write;
use tracing::debug;

const STEM_MAX_CHARS: usize = 50;

/// A decoded message: header list in original order plus the best text body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedMessage {
    /// Header name/value pairs, values decoded
    pub headers: Vec<(String, String)>,

    /// Plain-text body. Falls back to tag-stripped HTML when the message
    /// has no text/plain part.
    pub text: String,
}

impl DecodedMessage {
    /// Parse raw message bytes
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let parsed =
            mailparse::parse_mail(raw).map_err(|e| ExtractError::Structure(e.to_string()))?;

        let headers: Vec<(String, String)> = parsed
            .headers
            .iter()
            .map(|h| (h.get_key(), h.get_value()))
            .collect();

        let text = best_text(&parsed);

        debug!(
            "Decoded message with {} headers, {} body chars",
            headers.len(),
            text.len()
        );

        Ok(Self { headers, text })
    }

    /// Build the metadata record for this message
    pub fn into_metadata(self, id: impl Into<String>) -> Result<EmailMetadata> {
        EmailMetadata::build(id, &self.headers, self.text)
    }

    /// Render as a flat decoded message: the four summary headers, a blank
    /// line, then the text body
    ///
    /// The output parses back with [`DecodedMessage::parse`] to the same
    /// subject, sender, recipient, date and body. Used for test fixtures.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 256);
        for name in ["Subject", "From", "To", "Date"] {
            let value = header_value(&self.headers, name).unwrap_or_default();
            let _ = writeln!(out, "{name}: {value}");
        }
        out.push('\n');
        out.push_str(&self.text);
        out
    }

    /// Filesystem-safe name derived from the subject
    ///
    /// Path separators, shell-hostile characters and spaces become `_`, the
    /// result is capped at 50 characters, and an empty subject gives
    /// `no-subject`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        let subject = header_value(&self.headers, "Subject").unwrap_or_default();
        let stem: String = subject
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
                c => c,
            })
            .take(STEM_MAX_CHARS)
            .collect();

        let stem = stem.trim_end_matches('_');
        if stem.is_empty() {
            "no-subject".to_string()
        } else {
            stem.to_string()
        }
    }
}

/// First non-empty text/plain leaf, else the first HTML leaf stripped to text
///
/// A single-part message that is not HTML counts as plain text whatever its
/// declared type.
fn best_text(parsed: &mailparse::ParsedMail) -> String {
    let single_part = parsed.subparts.is_empty();
    let mut html: Option<String> = None;

    for part in parsed.parts().filter(|p| p.subparts.is_empty()) {
        let mimetype = part.ctype.mimetype.to_lowercase();
        let Ok(body) = part.get_body() else {
            continue;
        };

        if mimetype.contains("text/html") {
            if html.is_none() {
                html = Some(body);
            }
        } else if (single_part || mimetype.contains("text/plain")) && !body.trim().is_empty() {
            return body;
        }
    }

    html.as_deref().map(strip_html).unwrap_or_default()
}

/// Reduce an HTML body to text lines
///
/// Block-level closing tags become line breaks so sentence patterns like
/// `You spent ... at X.` stay on one line.
fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut skip_content = false;
    let mut tag = String::new();

    for c in html.chars() {
        match c {
            '<' if !in_tag => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let lower = tag.to_lowercase();
                if lower.starts_with("script") || lower.starts_with("style") {
                    skip_content = true;
                } else if lower.starts_with("/script") || lower.starts_with("/style") {
                    skip_content = false;
                } else if lower.starts_with("br")
                    || lower.starts_with("/p")
                    || lower.starts_with("/div")
                    || lower.starts_with("/td")
                    || lower.starts_with("/tr")
                    || lower.starts_with("/li")
                    || lower.starts_with("/h")
                {
                    result.push('\n');
                }
            }
            _ if in_tag => tag.push(c),
            _ if !skip_content => result.push(c),
            _ => {}
        }
    }

    let result = result
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    result
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
