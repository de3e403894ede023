//! Symbolic names for completion HRESULT sections

use crate::constants::cdm;
use regex::Regex;
use std::sync::LazyLock;

static RESULT_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").unwrap());

/// Map the text after `HR:` to a result name
///
/// Checked in order:
/// 1. a parenthesized name, returned verbatim
/// 2. a `0` without any minus sign means success
/// 3. the known negative codes
/// 4. otherwise the raw section
pub fn map_result(hr_section: &str) -> String {
    if let Some(name) = RESULT_NAME
        .captures(hr_section)
        .and_then(|caps| caps.get(1))
    {
        return name.as_str().to_string();
    }

    if hr_section.contains('0') && !hr_section.contains('-') {
        return cdm::RESULT_SUCCESS.to_string();
    }

    cdm::RESULT_CODES
        .iter()
        .find(|(code, _)| hr_section.contains(*code))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| hr_section.to_string())
}
