//! Tests for report rendering and jam detection

use super::*;
use crate::app::services::cassette_detector::{
    CassetteDetector, CassetteReport, CassetteSnapshot, DiscrepancyScope,
};

fn render(units: &[String]) -> CassetteReport {
    CassetteDetector::default().detect(&telemetry_line(units))
}

#[test]
fn test_balanced_cassette_has_no_discrepancy() {
    let report = render(&[fifty_cassette(1, 100, 60, 10, 30)]);
    let text = report.text();

    assert!(!report.has_discrepancy());
    assert!(text.starts_with(&"=".repeat(80)));
    assert!(text.contains("CASH DISPENSER STATUS REPORT"));
    assert!(text.contains("CASSETTE SUMMARY:"));
    assert!(text.contains("CASSETTE_1 (DISPENSER):"));
    assert!(text.contains("  Initial Amount   : Rp 5.000"));
    assert!(text.contains("  Dispensed Amount : Rp 3.000"));
    assert!(text.contains("  Rejected Amount  : Rp 500"));
    assert!(text.contains("  Remaining Amount : Rp 1.500"));
    assert!(text.contains("  Total Calculated : Rp 5.000"));
    assert!(text.contains("Total in Dispenser      : Rp 5.000"));
    assert!(!text.contains("SUSPECT JAMMED"));
    assert!(!text.contains("ATTENTION"));
    assert!(text.ends_with(&format!("\n\n{}", "=".repeat(80))));
}

#[test]
fn test_slot_table_row_layout() {
    let report = render(&[fifty_cassette(1, 100, 60, 10, 30)]);
    let row = format!(
        "{:<16}{:<16}{:<11}{:<12}{:<11}{:<10}",
        "CASSETTE_1", " 50", 100, 60, 10, 30
    );
    assert!(report.text().lines().any(|line| line == row));
}

#[test]
fn test_jammed_cassette_reports_difference() {
    let report = render(&[fifty_cassette(1, 100, 60, 10, 25)]);
    let text = report.text();

    assert!(text.contains("*** SUSPECT JAMMED DETECTED ***"));
    assert!(text.contains(
        "  TOTAL COUNTER NOT MATCH Rp 4.750 WITH INITIAL COUNT Rp 5.000 ON CASSETTE_1"
    ));
    assert!(text.contains("  DIFFERENCE: Rp 250"));
    assert!(text.contains("*** OVERALL DISCREPANCY DETECTED ***"));
    assert!(text.contains("Expected Total: Rp 5.000"));
    assert!(text.contains("Actual Total:   Rp 4.750"));
    assert!(text.contains("Difference:     Rp 250"));
    assert!(text.contains("*** ATTENTION: CASSETTE DISCREPANCIES DETECTED ***"));

    let discrepancies = report.discrepancies();
    assert_eq!(discrepancies.len(), 2);
    assert_eq!(
        discrepancies[0].scope,
        DiscrepancyScope::Cassette("CASSETTE_1".to_string())
    );
    assert_eq!(discrepancies[0].difference(), 250);
    assert_eq!(discrepancies[1].scope, DiscrepancyScope::Overall);
}

#[test]
fn test_zero_initial_is_never_a_discrepancy() {
    let report = render(&[fifty_cassette(1, 0, 0, 0, 40)]);
    assert!(!report.has_discrepancy());
}

#[test]
fn test_no_active_cassettes() {
    let report = render(&[fifty_cassette(1, 0, 0, 0, 0)]);
    let rule = "=".repeat(80);
    let expected = format!(
        "{rule}\n                          CASH DISPENSER STATUS REPORT\n{rule}\nNo active cassettes detected.\n{rule}\n"
    );
    assert_eq!(report.text(), expected);
}

#[test]
fn test_reject_only_snapshot() {
    let report = render(&[cash_unit(1, 5000, 2, "1", 0, 0, 12, 0)]);
    let text = report.text();

    assert!(text.contains("REJECT_1"));
    assert!(text.contains(
        "No dispenser cassettes found (only reject/retract cassettes detected)."
    ));
    assert!(!text.contains("OVERALL CASH DISPENSER SUMMARY:"));
    assert!(!report.has_discrepancy());
}

#[test]
fn test_mixed_denominations_section() {
    let report = render(&[
        fifty_cassette(1, 100, 60, 10, 30),
        cash_unit(2, 10000, 3, "2", 200, 20, 0, 170),
    ]);
    let text = report.text();

    assert!(text.contains("SUMMARY BY DENOMINATION:"));
    assert!(text.contains("Denomination 50 :"));
    assert!(text.contains("Denomination 100 :"));
    assert!(text.contains(
        "  TOTAL COUNTER NOT MATCH Rp 19.000 WITH INITIAL COUNT Rp 20.000 ON DENOMINATION 100"
    ));

    let scopes: Vec<&DiscrepancyScope> =
        report.discrepancies().iter().map(|d| &d.scope).collect();
    assert_eq!(
        scopes,
        vec![
            &DiscrepancyScope::Cassette("CASSETTE_2".to_string()),
            &DiscrepancyScope::Denomination(100),
            &DiscrepancyScope::Overall,
        ]
    );
}

#[test]
fn test_single_denomination_has_no_denomination_section() {
    let report = render(&[
        fifty_cassette(1, 100, 60, 10, 30),
        fifty_cassette(2, 100, 0, 0, 100),
    ]);
    assert!(!report.text().contains("SUMMARY BY DENOMINATION:"));
}

#[test]
fn test_long_labels_are_truncated_in_table() {
    let report = render(&[cash_unit(1, 5000, 3, "1ABCDEFGHIJKLMNOP", 10, 0, 0, 10)]);
    let text = report.text();

    // Full label in the per-cassette section, 16 characters in the table
    assert!(text.contains("CASSETTE_1ABCDEFGHIJKLMNOP (DISPENSER):"));
    assert!(text.lines().any(|line| line.starts_with("CASSETTE_1ABCDEF 50")));
}

#[test]
fn test_custom_currency_symbol() {
    let detector = CassetteDetector::new("IDR");
    let text = detector.parse_snapshot(&telemetry_line(&[fifty_cassette(1, 100, 60, 10, 30)]));
    assert!(text.contains("  Initial Amount   : IDR 5.000"));
}

#[test]
fn test_process_cassette_line_uses_crlf() {
    let detector = CassetteDetector::default();
    let line = telemetry_line(&[fifty_cassette(1, 100, 60, 10, 30)]);

    let report = detector.process_cassette_line(&line).unwrap();
    assert!(report.contains("CASSETTE SUMMARY:\r\n"));
    assert!(!report.replace("\r\n", "").contains('\n'));
    assert_eq!(report, CassetteReport::render(&CassetteSnapshot::parse(&line), "Rp").to_crlf());
}

#[test]
fn test_process_cassette_line_ignores_other_lines() {
    let detector = CassetteDetector::default();

    assert!(detector
        .process_cassette_line("12.03.2024 10:16:00.000 [TID:0x1A2B] [INFO:10] CARD INSERTED")
        .is_none());
    assert!(detector
        .process_cassette_line("12.03.2024 10:16:00.000 [XML:15] <status/>")
        .is_none());
    assert!(CassetteDetector::is_cassette_data(&telemetry_line(&[])));
}

#[test]
fn test_reject_bin_does_not_trigger_denomination_section() {
    let report = render(&[
        fifty_cassette(1, 100, 60, 10, 25),
        cash_unit(2, 0, 2, "2", 0, 0, 0, 4),
    ]);

    assert!(!report.text().contains("SUMMARY BY DENOMINATION"));

    let scopes: Vec<&DiscrepancyScope> =
        report.discrepancies().iter().map(|d| &d.scope).collect();
    assert_eq!(
        scopes,
        vec![
            &DiscrepancyScope::Cassette("CASSETTE_1".to_string()),
            &DiscrepancyScope::Overall,
        ]
    );
}

#[test]
fn test_oversized_counters_saturate() {
    let detector = CassetteDetector::default();
    let line = telemetry_line(&[cash_unit(1, 9_000_000_000_000, 3, "1", 9_000_000_000, 0, 0, 1)]);

    let text = detector.parse_snapshot(&line);
    assert!(text.contains("  Initial Amount   : Rp 9.223.372.036.854.775.807"));
    assert!(text.contains("Total Initial Amount    : Rp 9.223.372.036.854.775.807"));
    assert!(text.contains("*** SUSPECT JAMMED DETECTED ***"));
    assert!(detector.detect(&line).has_discrepancy());
}
