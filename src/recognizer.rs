//! Recognizer contract and the ordered registry used for dispatch

use crate::error::{ExtractError, Result};
use crate::types::{EmailMetadata, Transaction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Detects and extracts one institution's notification format
///
/// `extract` is only called after `matches` returned true for the same
/// metadata. It may still fail when content inside the matched shape is
/// malformed, but never returns a partially populated transaction.
pub trait Recognizer: Send + Sync {
    /// Stable name, used in logs and configuration
    fn name(&self) -> &'static str;

    /// Cheap, side-effect-free check that the email belongs to this format
    fn matches(&self, meta: &EmailMetadata) -> bool;

    fn extract(&self, meta: &EmailMetadata) -> Result<Transaction>;
}

impl fmt::Debug for dyn Recognizer + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Recognizer").field(&self.name()).finish()
    }
}

/// How to resolve an email matched by more than one recognizer
///
/// Deserialized through [`FromStr`], so JSON and environment settings
/// accept the same spellings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum DispatchPolicy {
    /// First registered match wins; later matches are shadowed
    #[default]
    FirstMatch,

    /// Any multi-match is an [`ExtractError::AmbiguousMatch`]
    Strict,
}

impl FromStr for DispatchPolicy {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "first-match" | "first_match" | "first" => Ok(Self::FirstMatch),
            "strict" => Ok(Self::Strict),
            other => Err(ExtractError::Config(format!(
                "unknown dispatch policy: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for DispatchPolicy {
    type Error = ExtractError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Ordered, append-only set of recognizers
///
/// Registration takes `&mut self`, so a registry is fully built before it
/// can be shared for lookups. Lookup order is registration order.
#[derive(Debug, Default)]
pub struct Registry {
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, recognizer: impl Recognizer + 'static) {
        self.recognizers.push(Box::new(recognizer));
    }

    pub fn register_boxed(&mut self, recognizer: Box<dyn Recognizer>) {
        self.recognizers.push(recognizer);
    }

    /// First recognizer, in registration order, that matches `meta`
    #[must_use]
    pub fn find(&self, meta: &EmailMetadata) -> Option<&dyn Recognizer> {
        self.recognizers
            .iter()
            .map(Box::as_ref)
            .find(|r| r.matches(meta))
    }

    /// Every recognizer that matches `meta`, in registration order
    #[must_use]
    pub fn find_all(&self, meta: &EmailMetadata) -> Vec<&dyn Recognizer> {
        self.recognizers
            .iter()
            .map(Box::as_ref)
            .filter(|r| r.matches(meta))
            .collect()
    }

    /// Lookup under an explicit dispatch policy
    ///
    /// `Ok(None)` means no recognizer matched.
    pub fn find_with(
        &self,
        meta: &EmailMetadata,
        policy: DispatchPolicy,
    ) -> Result<Option<&dyn Recognizer>> {
        match policy {
            DispatchPolicy::FirstMatch => Ok(self.find(meta)),
            DispatchPolicy::Strict => {
                let matched = self.find_all(meta);
                if matched.len() > 1 {
                    return Err(ExtractError::AmbiguousMatch(
                        matched.iter().map(|r| r.name()).collect(),
                    ));
                }
                Ok(matched.into_iter().next())
            }
        }
    }

    /// Registered names, in order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }
}
