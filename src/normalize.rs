//! Transaction normalizer
//!
//! Converts raw captured strings into typed transaction fields.

use crate::error::{ExtractError, Result};
use crate::fields::Fields;
use crate::types::{Direction, EmailMetadata, Transaction};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::borrow::Cow;
use std::str::FromStr;
use std::sync::LazyLock;

/// Conventional field names shared by recognizers and [`build_transaction`]
pub mod field {
    pub const AMOUNT: &str = "amount";
    pub const CURRENCY: &str = "currency";
    pub const DATE: &str = "txdate";
    pub const DESCRIPTION: &str = "desc";
    pub const ACCOUNT: &str = "account";
}

/// Accepted date layouts, tried in order, after ordinal stripping
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y", "%Y-%m-%d"];

static ORDINAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:st|nd|rd|th)\b").unwrap());

static AMOUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?$").unwrap());

/// Recognizer-supplied constants for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSource {
    /// Institution tag
    pub bank: &'static str,

    /// Fixed for the notification type
    pub direction: Direction,

    /// Used when the email carries no currency code
    pub default_currency: Option<&'static str>,
}

/// Strip ordinal suffixes from day numbers: "24th" becomes "24"
#[must_use]
pub fn strip_ordinals(text: &str) -> Cow<'_, str> {
    ORDINAL_REGEX.replace_all(text, "$1")
}

/// Parse a non-negative amount into a two-digit decimal
///
/// Thousands separators and embedded whitespace are ignored.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let clean: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if !AMOUNT_REGEX.is_match(&clean) {
        return Err(ExtractError::normalization(
            field::AMOUNT,
            raw,
            "not a non-negative decimal number",
        ));
    }

    let value = Decimal::from_str(&clean)
        .map_err(|e| ExtractError::normalization(field::AMOUNT, raw, e.to_string()))?;

    let mut value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(2);
    if value.scale() != 2 {
        return Err(ExtractError::normalization(
            field::AMOUNT,
            raw,
            "amount out of range",
        ));
    }
    Ok(value)
}

/// Parse a calendar date against the accepted layouts
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let stripped = strip_ordinals(raw.trim());
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&collapsed, fmt).ok())
        .ok_or_else(|| ExtractError::normalization(field::DATE, raw, "unrecognized date format"))
}

/// Pick the parsed currency code, falling back to the recognizer default
///
/// Codes are passed through unchanged; there is no ISO 4217 check.
pub fn normalize_currency(parsed: Option<&str>, default: Option<&str>) -> Result<String> {
    parsed
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or(default)
        .map(str::to_string)
        .ok_or_else(|| {
            ExtractError::normalization(field::CURRENCY, parsed.unwrap_or_default(), "no currency")
        })
}

#[must_use]
pub fn normalize_description(raw: &str) -> String {
    raw.trim().to_string()
}

/// Assemble a transaction from extracted fields
///
/// `amount` and `txdate` are required; `currency`, `desc` and `account` are
/// optional. Nothing is constructed unless every conversion succeeds.
pub fn build_transaction(
    meta: &EmailMetadata,
    fields: &Fields,
    source: &TransactionSource,
) -> Result<Transaction> {
    let amount = parse_amount(fields.require(field::AMOUNT)?)?;
    let date = parse_date(fields.require(field::DATE)?)?;
    let currency = normalize_currency(fields.get(field::CURRENCY), source.default_currency)?;

    Ok(Transaction {
        email_id: meta.id().to_string(),
        bank: source.bank.to_string(),
        account: fields.get(field::ACCOUNT).unwrap_or_default().trim().to_string(),
        amount,
        currency,
        date,
        direction: source.direction,
        description: normalize_description(fields.get(field::DESCRIPTION).unwrap_or_default()),
        account_id: 0,
    })
}
