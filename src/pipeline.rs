//! Dispatch of decoded emails to recognizers

use crate::config::Config;
use crate::error::Result;
use crate::message::DecodedMessage;
use crate::recognizer::{DispatchPolicy, Registry};
use crate::types::{EmailMetadata, Transaction};
use tracing::{debug, warn};

/// Registry plus dispatch policy; shareable across threads once built
#[derive(Debug, Default)]
pub struct Pipeline {
    registry: Registry,
    policy: DispatchPolicy,
}

impl Pipeline {
    #[must_use]
    pub const fn new(registry: Registry, policy: DispatchPolicy) -> Self {
        Self { registry, policy }
    }

    /// Builtin recognizers, filtered and dispatched per `config`
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(Registry::from_config(config), config.dispatch)
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Find the recognizer for `meta` and extract its transaction
    ///
    /// `Ok(None)` means no recognizer claimed the email. Errors are specific
    /// to this one email; callers normally log them and move on.
    pub fn dispatch(&self, meta: &EmailMetadata) -> Result<Option<Transaction>> {
        debug!("Dispatching email {} ({})", meta.id(), meta.subject());

        let recognizer = match self.registry.find_with(meta, self.policy) {
            Ok(Some(recognizer)) => recognizer,
            Ok(None) => {
                warn!(
                    email_id = meta.id(),
                    subject = meta.subject(),
                    "no recognizer matched email"
                );
                return Ok(None);
            }
            Err(e) => {
                warn!(email_id = meta.id(), error = %e, "recognizer dispatch failed");
                return Err(e);
            }
        };

        let txn = recognizer.extract(meta).inspect_err(|e| {
            warn!(
                email_id = meta.id(),
                recognizer = recognizer.name(),
                error = %e,
                "recognizer failed to extract transaction"
            );
        })?;

        debug!(
            email_id = %txn.email_id,
            date = %txn.date,
            bank = %txn.bank,
            account = %txn.account,
            amount = %txn.amount,
            currency = %txn.currency,
            direction = %txn.direction,
            description = %txn.description,
            "parsed transaction"
        );

        Ok(Some(txn))
    }

    /// Decode a raw message, build its metadata and dispatch it
    pub fn process_raw(&self, id: &str, raw: &[u8]) -> Result<Option<Transaction>> {
        let meta = DecodedMessage::parse(raw)?.into_metadata(id)?;
        self.dispatch(&meta)
    }
}
