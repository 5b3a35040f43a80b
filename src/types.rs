//! Core types shared by the extraction pipeline

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized, immutable view of a decoded email
///
/// Built once by [`EmailMetadata::build`] and read by every recognizer.
///
/// Deserialization goes through the same id check as `build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "crate::metadata::MetadataRecord")]
pub struct EmailMetadata {
    pub(crate) id: String,
    pub(crate) subject: String,
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) date: Option<DateTime<Utc>>,
    pub(crate) text: String,
}

impl EmailMetadata {
    /// Caller-assigned message identifier
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Subject header, empty when absent
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Raw From header
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Raw To header
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Date header, if present and parseable
    #[must_use]
    pub const fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    /// Decoded plain-text body
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Money flow relative to the account holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inbound => write!(f, "inbound"),
            Self::Outbound => write!(f, "outbound"),
        }
    }
}

/// Canonical transaction extracted from a notification email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Id of the email this transaction came from
    pub email_id: String,

    /// Institution tag assigned by the recognizer (e.g. "wise")
    pub bank: String,

    /// Raw account identifier from the email, empty when unresolved
    pub account: String,

    /// Non-negative amount with two fractional digits
    pub amount: Decimal,

    /// Three-letter currency code
    pub currency: String,

    /// Transaction date
    pub date: NaiveDate,

    pub direction: Direction,

    /// Trimmed free-text description, may be empty
    pub description: String,

    /// Backing account id, zero until the caller resolves it
    pub account_id: i64,
}

impl Transaction {
    /// Key used to look up the backing account: `"<bank>-<account>"`
    ///
    /// The bank is lower-cased and leading `*` mask characters are removed
    /// from the account. Returns `None` when no account was parsed.
    #[must_use]
    pub fn account_key(&self) -> Option<String> {
        let account = self.account.trim().trim_start_matches('*');
        if account.is_empty() {
            return None;
        }
        Some(format!("{}-{account}", self.bank.to_lowercase()))
    }

    /// Has the caller resolved a backing account yet?
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.account_id != 0
    }

    /// Record the backing account resolved by the caller
    #[must_use]
    pub fn with_account_id(mut self, account_id: i64) -> Self {
        self.account_id = account_id;
        self
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} on {} ({})",
            self.bank, self.direction, self.amount, self.currency, self.date, self.description
        )
    }
}
