//! Metadata normalizer

use crate::error::{ExtractError, Result};
use crate::types::EmailMetadata;
use chrono::{DateTime, Utc};
use serde::Deserialize;

impl EmailMetadata {
    /// Build the metadata record from a decoded header list and body
    ///
    /// Header names are matched case-insensitively and the first occurrence
    /// wins. Missing Subject, From or To headers become empty strings; a
    /// missing or unparseable Date becomes `None`.
    pub fn build(
        id: impl Into<String>,
        headers: &[(String, String)],
        text: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        check_id(&id)?;

        Ok(Self {
            id,
            subject: header_value(headers, "subject").unwrap_or_default(),
            from: header_value(headers, "from").unwrap_or_default(),
            to: header_value(headers, "to").unwrap_or_default(),
            date: header_value(headers, "date").as_deref().and_then(parse_date),
            text: text.into(),
        })
    }
}

/// Serialized form of [`EmailMetadata`], checked before it is accepted
#[derive(Deserialize)]
pub(crate) struct MetadataRecord {
    id: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
    #[serde(default)]
    text: String,
}

impl TryFrom<MetadataRecord> for EmailMetadata {
    type Error = ExtractError;

    fn try_from(record: MetadataRecord) -> Result<Self> {
        check_id(&record.id)?;

        Ok(Self {
            id: record.id,
            subject: record.subject,
            from: record.from,
            to: record.to,
            date: record.date,
            text: record.text,
        })
    }
}

fn check_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ExtractError::Metadata("message id is empty".into()));
    }
    Ok(())
}

pub(crate) fn header_value(headers: &[(String, String)], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim().to_string())
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
