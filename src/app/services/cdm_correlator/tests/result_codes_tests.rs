//! Tests for HRESULT section mapping

use crate::app::services::cdm_correlator::map_result;

#[test]
fn test_parenthesized_name_wins() {
    assert_eq!(map_result("0 (WFS_SUCCESS)"), "WFS_SUCCESS");
    assert_eq!(
        map_result("-14 (WFS_ERR_CUSTOM_NAME)"),
        "WFS_ERR_CUSTOM_NAME"
    );
}

#[test]
fn test_plain_zero_is_success() {
    assert_eq!(map_result("0"), "WFS_SUCCESS");
    assert_eq!(map_result("00000000"), "WFS_SUCCESS");
}

#[test]
fn test_known_negative_codes() {
    assert_eq!(map_result("-302"), "WFS_ERR_CDM_CASHUNITERROR");
    assert_eq!(map_result("-306"), "WFS_ERR_CDM_NOTDISPENSABLE");
    assert_eq!(map_result("-320"), "WFS_ERR_CDM_PRERRORNOITEMS");
    assert_eq!(map_result("-322"), "WFS_ERR_CDM_PRERRORUNKNOWN");
    assert_eq!(map_result("-14"), "WFS_ERR_HARDWARE_ERROR");
}

#[test]
fn test_unknown_section_passes_through() {
    assert_eq!(map_result("-999"), "-999");
    assert_eq!(map_result("PENDING"), "PENDING");
}
