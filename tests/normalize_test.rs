use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;
use txn_extract::normalize::{
    build_transaction, field, normalize_currency, normalize_description, parse_amount, parse_date,
};
use txn_extract::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// --- Amount ---

#[test]
fn test_amount_canonical_two_digits() {
    assert_eq!(parse_amount("15.00").unwrap().to_string(), "15.00");
    assert_eq!(parse_amount("15").unwrap().to_string(), "15.00");
    assert_eq!(parse_amount("15.5").unwrap().to_string(), "15.50");
}

#[test]
fn test_amount_rounds_extra_digits() {
    assert_eq!(parse_amount("2.345").unwrap().to_string(), "2.35");
    assert_eq!(parse_amount("2.344").unwrap().to_string(), "2.34");
}

#[test]
fn test_amount_thousands_separators() {
    assert_eq!(
        parse_amount("1,234.56").unwrap(),
        Decimal::from_str("1234.56").unwrap()
    );
    assert_eq!(parse_amount(" 1 000 ").unwrap().to_string(), "1000.00");
}

#[test]
fn test_amount_rejects_non_numeric() {
    for raw in ["", "abc", "12.3.4", "-5.00", "$5", ".50"] {
        let err = parse_amount(raw).unwrap_err();
        assert!(
            matches!(err, ExtractError::Normalization { ref field, .. } if field == "amount"),
            "expected normalization error for {raw:?}, got {err:?}"
        );
    }
}

#[test]
fn test_amount_too_large_for_two_digits() {
    for raw in [
        "79228162514264337593543950335",
        "9999999999999999999999999999.999",
    ] {
        let err = parse_amount(raw).unwrap_err();
        assert!(
            matches!(err, ExtractError::Normalization { ref reason, .. } if reason == "amount out of range"),
            "expected out of range for {raw:?}, got {err:?}"
        );
    }
}

#[test]
fn test_amount_large_but_representable() {
    let value = parse_amount("12345678901234567890.5").unwrap();
    assert_eq!(value.scale(), 2);
    assert_eq!(value.to_string(), "12345678901234567890.50");
}

// --- Date ---

#[test]
fn test_date_month_day_year() {
    assert_eq!(parse_date("February 24, 2026").unwrap(), date(2026, 2, 24));
    assert_eq!(parse_date("Feb 4, 2026").unwrap(), date(2026, 2, 4));
}

#[test]
fn test_date_ordinal_equivalence() {
    assert_eq!(
        parse_date("February 24th, 2026").unwrap(),
        parse_date("February 24, 2026").unwrap()
    );
    assert_eq!(parse_date("March 1st, 2025").unwrap(), date(2025, 3, 1));
    assert_eq!(parse_date("March 2nd, 2025").unwrap(), date(2025, 3, 2));
    assert_eq!(parse_date("March 3rd, 2025").unwrap(), date(2025, 3, 3));
}

#[test]
fn test_date_other_layouts() {
    assert_eq!(parse_date("24 February 2026").unwrap(), date(2026, 2, 24));
    assert_eq!(parse_date("24 Feb 2026").unwrap(), date(2026, 2, 24));
    assert_eq!(parse_date("2026-02-24").unwrap(), date(2026, 2, 24));
}

#[test]
fn test_date_rejects_unknown() {
    assert!(matches!(
        parse_date("24/02/2026"),
        Err(ExtractError::Normalization { .. })
    ));
    assert!(parse_date("February 30, 2026").is_err());
    assert!(parse_date("Smarch 3, 2026").is_err());
}

// --- Currency & description ---

#[test]
fn test_currency_parsed_or_default() {
    assert_eq!(normalize_currency(Some("CAD"), Some("USD")).unwrap(), "CAD");
    assert_eq!(normalize_currency(Some("  "), Some("USD")).unwrap(), "USD");
    assert_eq!(normalize_currency(None, Some("EUR")).unwrap(), "EUR");
    assert!(normalize_currency(None, None).is_err());
}

#[test]
fn test_currency_not_validated() {
    assert_eq!(normalize_currency(Some("XYZ"), None).unwrap(), "XYZ");
}

#[test]
fn test_description_trimmed() {
    assert_eq!(normalize_description("  Corner Shop \n"), "Corner Shop");
    assert_eq!(normalize_description("   "), "");
}

// --- build_transaction ---

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"sent (\S+)").unwrap());
static DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"on (\d{4}-\d{2}-\d{2})").unwrap());
static DESC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"to ([^,]+),").unwrap());
static ACCOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"from (\*+\d+)").unwrap());

const SOURCE: TransactionSource = TransactionSource {
    bank: "TestBank",
    direction: Direction::Inbound,
    default_currency: Some("EUR"),
};

fn fields(text: &str) -> Fields {
    extract_fields(
        text,
        &[
            FieldPattern::required(field::AMOUNT, &AMOUNT),
            FieldPattern::required(field::DATE, &DATE),
            FieldPattern::optional(field::DESCRIPTION, &DESC),
            FieldPattern::optional(field::ACCOUNT, &ACCOUNT),
        ],
    )
    .unwrap()
}

#[test]
fn test_build_transaction_with_defaults() {
    let meta = EmailMetadata::build("m-1", &[], "").unwrap();
    let txn = build_transaction(&meta, &fields("sent 40 on 2026-01-05 to  Alice ,"), &SOURCE)
        .unwrap();

    assert_eq!(txn.email_id, "m-1");
    assert_eq!(txn.bank, "TestBank");
    assert_eq!(txn.account, "");
    assert_eq!(txn.amount.to_string(), "40.00");
    assert_eq!(txn.currency, "EUR");
    assert_eq!(txn.date, date(2026, 1, 5));
    assert_eq!(txn.direction, Direction::Inbound);
    assert_eq!(txn.description, "Alice");
    assert_eq!(txn.account_id, 0);
}

#[test]
fn test_build_transaction_with_account() {
    let meta = EmailMetadata::build("m-2", &[], "").unwrap();
    let txn = build_transaction(&meta, &fields("sent 1.5 on 2026-01-05 from **9876"), &SOURCE)
        .unwrap();

    assert_eq!(txn.account, "**9876");
    assert_eq!(txn.description, "");
    assert_eq!(txn.account_key().as_deref(), Some("testbank-9876"));
}

#[test]
fn test_build_transaction_bad_amount_is_normalization_error() {
    let meta = EmailMetadata::build("m-3", &[], "").unwrap();
    let err = build_transaction(&meta, &fields("sent lots on 2026-01-05"), &SOURCE).unwrap_err();
    assert!(matches!(err, ExtractError::Normalization { ref value, .. } if value == "lots"));
}

#[test]
fn test_build_transaction_requires_date_field() {
    let meta = EmailMetadata::build("m-4", &[], "").unwrap();
    let only_amount = extract_fields("sent 3", &[FieldPattern::required(field::AMOUNT, &AMOUNT)])
        .unwrap();
    let err = build_transaction(&meta, &only_amount, &SOURCE).unwrap_err();
    assert_eq!(
        err,
        ExtractError::FieldExtraction {
            field: "txdate".into()
        }
    );
}
