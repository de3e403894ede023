//! Currency amount formatting

use crate::constants;

/// Format an amount with `.` thousands grouping and a symbol prefix
///
/// `format_currency(1234567, "Rp")` gives `Rp 1.234.567`; zero is `Rp 0`.
/// An empty symbol still leaves the separating space.
pub fn format_currency(value: i64, symbol: &str) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(constants::THOUSANDS_SEPARATOR);
        }
        grouped.push(digit);
    }

    let sign = if value < 0 { "-" } else { "" };
    format!("{} {}{}", symbol, sign, grouped)
}
