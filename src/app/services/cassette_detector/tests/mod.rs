//! Tests for cassette reconciliation
//!
//! Telemetry line builders shared by the component tests.

pub mod report_tests;
pub mod snapshot_tests;

/// Wrap cash unit elements in a journal telemetry line
pub fn telemetry_line(units: &[String]) -> String {
    format!(
        "12.03.2024 10:16:00.000 [TID:0x1A2B] [XML:15] <cunits count='{}'>{}</cunits>",
        units.len(),
        units.join("")
    )
}

/// One `<cu .../>` element with quoted attributes
#[allow(clippy::too_many_arguments)]
pub fn cash_unit(
    n: usize,
    note_value: i64,
    typ: i64,
    dc: &str,
    ic: i64,
    ds: i64,
    rj: i64,
    c: i64,
) -> String {
    format!(
        "<cu n='{}' v='{}' typ='{}' dc='{}' ic='{}' ds='{}' rj='{}' c='{}'/>",
        n, note_value, typ, dc, ic, ds, rj, c
    )
}

/// Dispenser cassette of 50 notes (value 5000 minor units) with the given counters
pub fn fifty_cassette(n: usize, ic: i64, ds: i64, rj: i64, c: i64) -> String {
    cash_unit(n, 5000, 3, &n.to_string(), ic, ds, rj, c)
}
