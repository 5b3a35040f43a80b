//! Runtime configuration

use crate::error::{ExtractError, Result};
use crate::recognizer::DispatchPolicy;
use serde::{Deserialize, Serialize};

/// Environment variable selecting the [`DispatchPolicy`]
pub const DISPATCH_ENV: &str = "TXN_EXTRACT_DISPATCH";

/// Environment variable listing disabled recognizers, comma-separated
pub const DISABLED_ENV: &str = "TXN_EXTRACT_DISABLED";

/// Extraction settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How ambiguous matches are resolved
    pub dispatch: DispatchPolicy,

    /// Builtin recognizers to leave out of the registry, by name
    pub disabled: Vec<String>,
}

impl Config {
    /// Parse a JSON document; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ExtractError::Config(e.to_string()))
    }

    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dispatch = match lookup(DISPATCH_ENV) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => DispatchPolicy::default(),
        };

        let disabled = lookup(DISABLED_ENV)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { dispatch, disabled })
    }

    #[must_use]
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|d| d.eq_ignore_ascii_case(name))
    }
}
