//! Tests for transaction boundary detection

use super::*;
use crate::app::services::line_filter::{build_separator, is_transaction_start, transaction_label};

#[test]
fn test_transaction_start_markers() {
    assert!(is_transaction_start(CARD_INSERTED_LINE));
    assert!(is_transaction_start(CARD_LESS_LINE));
    assert!(is_transaction_start(
        "12.03.2024 09:00:00.000 [INFO:10] SUPERVISOR SAFE OPEN"
    ));
    assert!(!is_transaction_start(PRINT_LINE));
}

#[test]
fn test_transaction_label_priority() {
    assert_eq!(transaction_label(CARD_INSERTED_LINE), Some("CARD INSERTED"));
    assert_eq!(transaction_label(CARD_LESS_LINE), Some("CARD LESS SELECTED"));
    assert_eq!(
        transaction_label("CARD LESS SELECTED then CARD INSERTED"),
        Some("CARD INSERTED")
    );
    assert_eq!(transaction_label("SUPERVISOR SAFE OPEN"), None);
}

#[test]
fn test_build_separator_layout() {
    let separator = build_separator(CARD_INSERTED_LINE);
    let rule = "=".repeat(80);

    assert_eq!(
        separator,
        format!(
            "\n\n{}\n                           CARD INSERTED TRANSACTION\n{}\n",
            rule, rule
        )
    );

    let lines: Vec<&str> = separator.split('\n').collect();
    assert_eq!(lines[2].len(), 80);
    assert!(lines[3].starts_with(&" ".repeat(27)));
}

#[test]
fn test_build_separator_unknown() {
    let separator = build_separator("12.03.2024 09:00:00.000 SUPERVISOR SAFE OPEN");
    assert!(separator.contains("\n                           UNKNOWN TRANSACTION\n"));
    assert!(!separator.contains("UNKNOWN TRANSACTION TRANSACTION"));
}
