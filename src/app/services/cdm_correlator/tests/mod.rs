//! Tests for CDM correlation
//!
//! Journal line builders shared by the correlator and result code tests.

pub mod result_codes_tests;

/// Dispense command line for a request id
pub fn dispense_line(time: &str, req_id: &str) -> String {
    format!(
        "12.03.2024 {}.000 [TID:0x1A2B] [INFO:12] XFS WFSAsyncExecute HService: 5 CMD: 302 WFS_CMD_CDM_DISPENSE ReqID: {}",
        time, req_id
    )
}

/// Present command line for a request id
pub fn present_line(time: &str, req_id: &str) -> String {
    format!(
        "12.03.2024 {}.000 [TID:0x1A2B] [INFO:12] WFS_CMD_CDM_PRESENT ReqID: {}",
        time, req_id
    )
}

/// Dispenser error line
pub fn error_line(time: &str, text: &str) -> String {
    format!("12.03.2024 {}.000 [TID:0x1A2B] [INFO:12] DSP--{}", time, text)
}

/// Execute completion line
pub fn completion_line(time: &str, req_id: &str, event_id: &str, hr: &str) -> String {
    format!(
        "12.03.2024 {}.000 [TID:0x1A2B] [INFO:12] WFS_EXECUTE_COMPLETE HService: 5 ReqID: {} EventID: {} HR: {}",
        time, req_id, event_id, hr
    )
}
