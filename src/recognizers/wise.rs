//! Wise card notifications

use crate::error::Result;
use crate::fields::{FieldPattern, extract_fields};
use crate::normalize::{TransactionSource, build_transaction, field, strip_ordinals};
use crate::recognizer::Recognizer;
use crate::types::{Direction, EmailMetadata, Transaction};
use regex::Regex;
use std::sync::LazyLock;

static AMOUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)You spent (\d[\d,]*(?:\.\d+)?)").unwrap());

static CURRENCY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)You spent \d[\d,]*(?:\.\d+)? ([A-Z]{3}) at").unwrap());

static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+ \d{1,2}, \d{4})").unwrap());

static DESCRIPTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)You spent \d[\d,]*(?:\.\d+)? [A-Z]{3} at ([^.\n]+)\.").unwrap()
});

const SOURCE: TransactionSource = TransactionSource {
    bank: "wise",
    direction: Direction::Outbound,
    default_currency: None,
};

/// "You spent X CUR at Merchant." card spend notice
#[derive(Debug, Clone, Copy, Default)]
pub struct WiseSpend;

impl Recognizer for WiseSpend {
    fn name(&self) -> &'static str {
        "wise-spend"
    }

    fn matches(&self, meta: &EmailMetadata) -> bool {
        meta.subject().contains("spent at") && meta.text().contains("Wise")
    }

    fn extract(&self, meta: &EmailMetadata) -> Result<Transaction> {
        // descriptions come from the unstripped body so "21st Century" survives
        let text = strip_ordinals(meta.text());

        let mut fields = extract_fields(
            &text,
            &[
                FieldPattern::required(field::AMOUNT, &AMOUNT_REGEX),
                FieldPattern::required(field::CURRENCY, &CURRENCY_REGEX),
                FieldPattern::required(field::DATE, &DATE_REGEX),
            ],
        )?;
        fields.extend(extract_fields(
            meta.text(),
            &[FieldPattern::required(field::DESCRIPTION, &DESCRIPTION_REGEX)],
        )?);

        build_transaction(meta, &fields, &SOURCE)
    }
}
