//! Tests for line filtering and segmentation
//!
//! Shared journal line fixtures live here; component tests are split by file.

pub mod segmenter_tests;

/// A card insertion line as written by the journal
pub const CARD_INSERTED_LINE: &str =
    "12.03.2024 10:15:30.123 [TID:0x1A2B] [INFO:10] CARD INSERTED";

/// A receipt print line
pub const PRINT_LINE: &str = "12.03.2024 10:15:41.500 [TID:0x1A2B] [PRINT:10] AMOUNT RP 500.000";

/// A card-less selection line
pub const CARD_LESS_LINE: &str =
    "12.03.2024 11:00:00.000 [TID:0x1A2B] [INFO:10] CARD LESS SELECTED";

/// Reader self-test noise
pub const NOISE_LINE: &str =
    "12.03.2024 10:15:29.000 [TID:0x1A2B] [INFO:10] Motorized card reader detected";

/// Build a filter from string slices
pub fn create_filter(keywords: &[&str], removes: &[&str]) -> super::PatternFilter {
    let keywords: Vec<String> = keywords.iter().map(|s| s.to_string()).collect();
    let removes: Vec<String> = removes.iter().map(|s| s.to_string()).collect();
    super::PatternFilter::new(&keywords, &removes)
}
