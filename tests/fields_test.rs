use regex::Regex;
use std::sync::LazyLock;
use txn_extract::*;

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"paid (\d+\.\d{2})").unwrap());
static MERCHANT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"at ([A-Za-z ]+)\.").unwrap());
static ACCOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"card (\*\d{4})").unwrap());
static EMPTY_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"paid ()").unwrap());

#[test]
fn test_extract_first_capture_of_first_match() {
    let text = "You paid 12.50 at Corner Shop. Later you paid 99.99 at Other Place.";
    let fields = extract_fields(
        text,
        &[
            FieldPattern::required("amount", &AMOUNT),
            FieldPattern::required("desc", &MERCHANT),
        ],
    )
    .unwrap();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields.get("amount"), Some("12.50"));
    assert_eq!(fields.get("desc"), Some("Corner Shop"));
}

#[test]
fn test_missing_required_field_fails_naming_field() {
    let text = "You paid at Corner Shop.";
    let err = extract_fields(
        text,
        &[
            FieldPattern::required("desc", &MERCHANT),
            FieldPattern::required("amount", &AMOUNT),
        ],
    )
    .unwrap_err();

    assert_eq!(
        err,
        ExtractError::FieldExtraction {
            field: "amount".into()
        }
    );
}

#[test]
fn test_first_missing_required_field_is_reported() {
    let err = extract_fields(
        "nothing here",
        &[
            FieldPattern::required("desc", &MERCHANT),
            FieldPattern::required("amount", &AMOUNT),
        ],
    )
    .unwrap_err();

    assert!(err.to_string().contains("'desc'"));
}

#[test]
fn test_optional_field_absent_when_unmatched() {
    let text = "You paid 12.50 at Corner Shop.";
    let fields = extract_fields(
        text,
        &[
            FieldPattern::required("amount", &AMOUNT),
            FieldPattern::optional("account", &ACCOUNT),
        ],
    )
    .unwrap();

    assert!(!fields.contains("account"));
    assert_eq!(fields.get("account"), None);
    assert!(fields.require("account").is_err());
}

#[test]
fn test_optional_field_present_when_matched() {
    let text = "You paid 12.50 with card *1234 at Corner Shop.";
    let fields = extract_fields(text, &[FieldPattern::optional("account", &ACCOUNT)]).unwrap();
    assert_eq!(fields.require("account").unwrap(), "*1234");
}

#[test]
fn test_empty_capture_counts_as_missing() {
    let err = extract_fields("You paid ", &[FieldPattern::required("amount", &EMPTY_GROUP)])
        .unwrap_err();
    assert!(matches!(err, ExtractError::FieldExtraction { .. }));
}

#[test]
fn test_no_patterns_yields_empty_fields() {
    let fields = extract_fields("anything", &[]).unwrap();
    assert!(fields.is_empty());
}

#[test]
fn test_extend_merges_fields() {
    let mut fields = extract_fields("You paid 12.50", &[FieldPattern::required("amount", &AMOUNT)])
        .unwrap();
    let more = extract_fields("at Corner Shop.", &[FieldPattern::required("desc", &MERCHANT)])
        .unwrap();
    fields.extend(more);

    assert_eq!(fields.len(), 2);
    assert_eq!(fields.get("amount"), Some("12.50"));
    assert_eq!(fields.get("desc"), Some("Corner Shop"));
}
