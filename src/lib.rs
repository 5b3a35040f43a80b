// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

//! Transaction Extractor
//!
//! Rule-based extraction of structured financial transactions from bank and
//! payment notification emails.
//!
//! A [`Registry`] holds one [`Recognizer`] per supported notification format.
//! Each email is normalized into [`EmailMetadata`], dispatched to the first
//! recognizer that claims it, and turned into a canonical [`Transaction`].
//!
//! # Example
//!
//! ```rust
//! use txn_extract::{EmailMetadata, Registry, Recognizer};
//!
//! let headers = vec![("Subject".to_string(), "15.00 CAD spent at Market".to_string())];
//! let body = "Wise\nYou spent 15.00 CAD at Market.\nFebruary 24th, 2026";
//! let meta = EmailMetadata::build("msg-1", &headers, body).unwrap();
//!
//! let registry = Registry::builtin();
//! let recognizer = registry.find(&meta).expect("wise recognizer");
//! let txn = recognizer.extract(&meta).unwrap();
//!
//! assert_eq!(txn.amount.to_string(), "15.00");
//! assert_eq!(txn.currency, "CAD");
//! ```

mod config;
mod error;
mod fields;
mod message;
mod metadata;
pub mod normalize;
mod pipeline;
mod recognizer;
pub mod recognizers;
mod types;

pub use config::{Config, DISABLED_ENV, DISPATCH_ENV};
pub use error::{ExtractError, Result};
pub use fields::{FieldPattern, Fields, extract_fields};
pub use message::DecodedMessage;
pub use normalize::TransactionSource;
pub use pipeline::Pipeline;
pub use recognizer::{DispatchPolicy, Recognizer, Registry};
pub use types::*;
