//! Transaction boundary detection and banner separators

use crate::constants;

/// True if the line opens a transaction segment
pub fn is_transaction_start(line: &str) -> bool {
    constants::TRANSACTION_START_MARKERS
        .iter()
        .any(|marker| line.contains(marker))
}

/// First labeling marker found on the line
pub fn transaction_label(line: &str) -> Option<&'static str> {
    constants::TRANSACTION_LABEL_MARKERS
        .iter()
        .copied()
        .find(|marker| line.contains(marker))
}

/// Banner written before a transaction start line
///
/// Two line breaks, an `=` rule, the centered title and a closing rule.
pub fn build_separator(line: &str) -> String {
    let rule = "=".repeat(constants::RULE_WIDTH);
    let title = match transaction_label(line) {
        Some(label) => format!("{} TRANSACTION", label),
        None => "UNKNOWN TRANSACTION".to_string(),
    };

    format!(
        "\n\n{rule}\n{indent}{title}\n{rule}\n",
        rule = rule,
        indent = " ".repeat(constants::BANNER_INDENT),
        title = title
    )
}
