//! Telemetry text handling: prefix, bare values, elements and attributes

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static TELEMETRY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\d{2}\.\d{2}\.\d{4} \d{2}:\d{2}:\d{2}\.\d{3} \[TID:0x[0-9A-Fa-f]+\] \[XML:\d+\] ",
    )
    .unwrap()
});

static BARE_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)=([\w|]+)").unwrap());

static CASH_UNIT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<cu\s+([^>]+)>").unwrap());

static QUOTED_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)=['"](.*?)['"]"#).unwrap());

/// Remove the leading `<timestamp> [TID:0x..] [XML:n] ` prefix
pub fn strip_telemetry_prefix(line: &str) -> &str {
    match TELEMETRY_PREFIX.find(line) {
        Some(prefix) => &line[prefix.end()..],
        None => line,
    }
}

/// Quote bare values so `key=v1|v2` parses like `key='v1|v2'`
pub fn quote_bare_values(xml: &str) -> String {
    BARE_VALUE.replace_all(xml, "$1='$2'").into_owned()
}

/// Attribute text of every `<cu ...>` element, in document order
pub fn cash_unit_elements(xml: &str) -> Vec<&str> {
    CASH_UNIT_ELEMENT
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Parse `name='value'` / `name="value"` pairs; a repeated name keeps the last value
pub fn parse_attributes(attrs: &str) -> HashMap<String, String> {
    QUOTED_ATTRIBUTE
        .captures_iter(attrs)
        .filter_map(|caps| match (caps.get(1), caps.get(2)) {
            (Some(name), Some(value)) => Some((name.as_str().to_string(), value.as_str().to_string())),
            _ => None,
        })
        .collect()
}

/// Leading integer of an attribute value; missing or non-numeric text is 0
pub fn parse_count(value: Option<&String>) -> i64 {
    let Some(value) = value else {
        return 0;
    };
    let text = value.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude = digits[..end].parse::<i64>().unwrap_or(0);

    if negative { -magnitude } else { magnitude }
}
