//! Per-institution recognizers
//!
//! [`builtin`] is the single place that fixes dispatch order. Under
//! first-match-wins an earlier entry shadows any later one that matches the
//! same email, so more specific formats go first.

pub mod wise;

use crate::config::Config;
use crate::recognizer::{Recognizer, Registry};
use tracing::debug;

/// Builtin recognizers in dispatch order
#[must_use]
pub fn builtin() -> Vec<Box<dyn Recognizer>> {
    vec![Box::new(wise::WiseSpend)]
}

impl Registry {
    /// Registry with every builtin recognizer
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for recognizer in builtin() {
            registry.register_boxed(recognizer);
        }
        registry
    }

    /// Builtin registry minus the recognizers disabled in `config`
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        for recognizer in builtin() {
            if config.is_disabled(recognizer.name()) {
                debug!("Recognizer {} disabled by configuration", recognizer.name());
                continue;
            }
            registry.register_boxed(recognizer);
        }
        registry
    }
}
