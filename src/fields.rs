//! Field extraction helper
//!
//! Applies named patterns to a text blob and collects the first capture
//! group of each. Purely syntactic: conversion to typed values happens in
//! [`crate::normalize`].

use crate::error::{ExtractError, Result};
use regex::Regex;
use std::collections::HashMap;

/// A named pattern to run against email text
#[derive(Debug, Clone, Copy)]
pub struct FieldPattern {
    pub name: &'static str,
    pub regex: &'static Regex,
    pub required: bool,
}

impl FieldPattern {
    /// Pattern that must match, or extraction fails
    #[must_use]
    pub const fn required(name: &'static str, regex: &'static Regex) -> Self {
        Self {
            name,
            regex,
            required: true,
        }
    }

    /// Pattern whose field is left out when it does not match
    #[must_use]
    pub const fn optional(name: &'static str, regex: &'static Regex) -> Self {
        Self {
            name,
            regex,
            required: false,
        }
    }

    fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Captured field values keyed by pattern name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(HashMap<&'static str, String>);

impl Fields {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value of a field that must be present
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| ExtractError::missing_field(name))
    }

    /// Add every field of `other`, replacing values with the same name
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Run each pattern against `text`, in order
///
/// Fails on the first required pattern without a non-empty capture, naming
/// that field. No partial result is returned.
pub fn extract_fields(text: &str, patterns: &[FieldPattern]) -> Result<Fields> {
    let mut fields = HashMap::with_capacity(patterns.len());

    for pattern in patterns {
        match pattern.capture(text) {
            Some(value) => {
                fields.insert(pattern.name, value.to_string());
            }
            None if pattern.required => return Err(ExtractError::missing_field(pattern.name)),
            None => {}
        }
    }

    Ok(Fields(fields))
}
