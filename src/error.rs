//! Error types for transaction extraction

use thiserror::Error;

/// Errors that can occur while turning an email into a transaction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Failed to parse the raw message structure
    #[error("Failed to parse email structure: {0}")]
    Structure(String),

    /// Input to the metadata normalizer was unusable
    #[error("Invalid email metadata: {0}")]
    Metadata(String),

    /// A required pattern did not match text its recognizer already claimed
    #[error("Required field '{field}' not found in email text")]
    FieldExtraction { field: String },

    /// An extracted field could not be converted to its typed form
    #[error("Invalid {field} value {value:?}: {reason}")]
    Normalization {
        field: String,
        value: String,
        reason: String,
    },

    /// More than one recognizer matched under strict dispatch
    #[error("Ambiguous match between recognizers: {}", .0.join(", "))]
    AmbiguousMatch(Vec<&'static str>),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ExtractError {
    pub(crate) fn missing_field(field: impl Into<String>) -> Self {
        Self::FieldExtraction {
            field: field.into(),
        }
    }

    pub(crate) fn normalization(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Normalization {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
