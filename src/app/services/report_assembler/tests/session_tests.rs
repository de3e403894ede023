//! Tests for supervisor session skipping and noise drops

use super::*;
use crate::app::services::report_assembler::{LineAdmission, SessionGate};

#[test]
fn test_supervisor_session_skips_until_card_marker() {
    let mut gate = SessionGate::new();

    assert_eq!(
        gate.admit(&journal_line("09:00:00.000", "INFO:10", "SUPERVISOR SAFE OPEN")),
        LineAdmission::SupervisorSkipped
    );
    assert!(gate.in_supervisor_session());
    assert_eq!(
        gate.admit(&journal_line("09:00:05.000", "INFO:10", "CASSETTE REPLENISHED")),
        LineAdmission::SupervisorSkipped
    );
    assert_eq!(
        gate.admit(&journal_line("09:10:00.000", "INFO:10", "CARD INSERTED")),
        LineAdmission::Accepted
    );
    assert!(!gate.in_supervisor_session());
}

#[test]
fn test_card_less_selection_also_ends_session() {
    let mut gate = SessionGate::new();
    gate.admit(&journal_line("09:00:00.000", "INFO:10", "SUPERVISOR SAFE OPEN"));

    assert_eq!(
        gate.admit(&journal_line("09:10:00.000", "INFO:10", "CARD LESS SELECTED")),
        LineAdmission::Accepted
    );
}

#[test]
fn test_noise_markers_are_dropped() {
    let mut gate = SessionGate::new();

    assert_eq!(
        gate.admit(&journal_line("10:00:00.000", "INFO:10", "Motorized card reader detected")),
        LineAdmission::Noise
    );
    assert_eq!(
        gate.admit(&journal_line("10:00:01.000", "DEBUG:20", "poll")),
        LineAdmission::Noise
    );
    assert_eq!(
        gate.admit(&journal_line("10:00:02.000", "INFO:12", "WFS_GETINFO_COMPLETE ReqID: 3")),
        LineAdmission::Noise
    );
    assert_eq!(
        gate.admit(&journal_line("10:00:03.000", "INFO:10", "CARD INSERTED")),
        LineAdmission::Accepted
    );
}

#[test]
fn test_noise_inside_session_counts_as_skipped() {
    let mut gate = SessionGate::new();
    gate.admit(&journal_line("09:00:00.000", "INFO:10", "SUPERVISOR SAFE OPEN"));

    assert_eq!(
        gate.admit(&journal_line("09:00:01.000", "DEBUG:20", "poll")),
        LineAdmission::SupervisorSkipped
    );
}
