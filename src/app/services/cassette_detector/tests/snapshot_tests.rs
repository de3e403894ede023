//! Tests for snapshot parsing, labels and denomination totals

use super::*;
use crate::app::models::CassetteType;
use crate::app::services::cassette_detector::CassetteSnapshot;

#[test]
fn test_parse_populates_slots() {
    let line = telemetry_line(&[
        fifty_cassette(1, 100, 60, 10, 30),
        cash_unit(2, 10000, 3, "2", 200, 20, 0, 180),
    ]);
    let snapshot = CassetteSnapshot::parse(&line);

    let slots = snapshot.slots();
    assert_eq!(slots.len(), 5);
    assert_eq!(slots[0].denomination, 50);
    assert_eq!(slots[0].cassette_type, CassetteType::Dispenser);
    assert_eq!(slots[0].initial, 100);
    assert_eq!(slots[0].dispensed, 60);
    assert_eq!(slots[0].rejected, 10);
    assert_eq!(slots[0].remaining, 30);
    assert_eq!(slots[1].denomination, 100);
    assert!(!slots[2].is_active());

    assert_eq!(snapshot.active_slots().count(), 2);
    assert!(snapshot.has_mixed_denominations());
}

#[test]
fn test_parse_skips_unusable_elements() {
    let line = telemetry_line(&[
        "<cu v='5000' typ='3' ic='10'/>".to_string(),
        cash_unit(0, 5000, 3, "1", 10, 0, 0, 10),
        cash_unit(6, 5000, 3, "1", 10, 0, 0, 10),
        "<cu n='3' typ='3' ic='abc' ds='5'/>".to_string(),
    ]);
    let snapshot = CassetteSnapshot::parse(&line);

    let active: Vec<usize> = snapshot.active_slots().map(|slot| slot.index).collect();
    assert_eq!(active, vec![3]);

    let slot = &snapshot.slots()[2];
    assert_eq!(slot.initial, 0);
    assert_eq!(slot.dispensed, 5);
    assert_eq!(slot.denomination, 0);
}

#[test]
fn test_parse_bare_values() {
    let line = "12.03.2024 10:16:00.000 [TID:0x1A2B] [XML:15] <cunits><cu n=2 v=5000 typ=3 dc=2 ic=40 ds=0 rj=0 c=40 pcu=A|B/></cunits>";
    let snapshot = CassetteSnapshot::parse(line);

    let slot = &snapshot.slots()[1];
    assert_eq!(slot.denomination, 50);
    assert_eq!(slot.initial, 40);
    assert_eq!(slot.remaining, 40);
    assert_eq!(snapshot.label_for(slot), "CASSETTE_2");
}

#[test]
fn test_labels_by_type_and_first_wins() {
    let line = telemetry_line(&[
        cash_unit(1, 0, 2, "1", 0, 0, 5, 0),
        cash_unit(2, 5000, 3, "1", 100, 0, 0, 100),
        cash_unit(3, 5000, 3, "3", 100, 0, 0, 100),
        cash_unit(5, 0, 6, "5", 0, 0, 0, 2),
    ]);
    let snapshot = CassetteSnapshot::parse(&line);

    let labels = snapshot.labels();
    assert_eq!(labels[&1], "REJECT_1");
    assert_eq!(labels[&3], "CASSETTE_3");
    assert_eq!(labels[&5], "RETRACT_5");
    assert!(!labels.contains_key(&2));

    let slots = snapshot.slots();
    assert_eq!(snapshot.label_for(&slots[0]), "REJECT_1");
    assert_eq!(snapshot.label_for(&slots[1]), "CASSETTE_2");
    assert_eq!(snapshot.label_for(&slots[4]), "RETRACT_5");
}

#[test]
fn test_labels_sequential_without_change_id() {
    let line = telemetry_line(&[
        cash_unit(1, 5000, 3, "0", 10, 0, 0, 10),
        cash_unit(2, 5000, 3, "", 10, 0, 0, 10),
        cash_unit(3, 5000, 3, "x", 10, 0, 0, 10),
    ]);
    let snapshot = CassetteSnapshot::parse(&line);

    let labels = snapshot.labels();
    assert_eq!(labels[&1], "CASSETTE_0");
    assert_eq!(labels[&2], "CASSETTE_");
    assert_eq!(labels[&3], "CASSETTE_x");
}

#[test]
fn test_denomination_totals() {
    let line = telemetry_line(&[
        fifty_cassette(1, 100, 60, 10, 30),
        fifty_cassette(2, 100, 50, 0, 50),
        cash_unit(3, 10000, 3, "3", 200, 20, 0, 180),
        cash_unit(4, 10000, 2, "4", 0, 0, 7, 0),
    ]);
    let snapshot = CassetteSnapshot::parse(&line);

    let totals = snapshot.denomination_totals();
    assert_eq!(totals.len(), 2);

    assert_eq!(totals[0].denomination, 50);
    assert_eq!(totals[0].initial, 10_000);
    assert_eq!(totals[0].dispensed, 5_500);
    assert_eq!(totals[0].rejected, 500);
    assert_eq!(totals[0].remaining, 4_000);
    assert_eq!(totals[0].total(), 10_000);

    // The reject bin shares the denomination but is excluded
    assert_eq!(totals[1].denomination, 100);
    assert_eq!(totals[1].initial, 20_000);
    assert_eq!(totals[1].rejected, 0);
}

#[test]
fn test_snapshot_without_elements() {
    let snapshot = CassetteSnapshot::parse("12.03.2024 10:16:00.000 [TID:0x1A2B] [XML:15] <cunits></cunits>");
    assert!(!snapshot.has_active_slots());
    assert!(!snapshot.has_financial_slots());
    assert!(!snapshot.has_mixed_denominations());
}

#[test]
fn test_denominations_come_from_financial_slots() {
    let line = telemetry_line(&[
        fifty_cassette(1, 100, 60, 10, 30),
        cash_unit(2, 10000, 3, "2", 0, 0, 0, 0),
        cash_unit(3, 0, 2, "3", 0, 0, 0, 4),
        cash_unit(4, 20000, 6, "4", 0, 0, 0, 2),
    ]);
    let snapshot = CassetteSnapshot::parse(&line);

    assert_eq!(snapshot.denominations().into_iter().collect::<Vec<_>>(), vec![50]);
    assert!(!snapshot.has_mixed_denominations());

    let totals = snapshot.denomination_totals();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].denomination, 50);
}

#[test]
fn test_amounts_saturate_instead_of_overflowing() {
    let line = telemetry_line(&[cash_unit(1, 9_000_000_000_000, 3, "1", 9_000_000_000, 0, 0, 1)]);
    let snapshot = CassetteSnapshot::parse(&line);

    let slot = &snapshot.slots()[0];
    assert_eq!(slot.initial_amount(), i64::MAX);
    assert_eq!(slot.total_amount(), 90_000_000_000);
    assert_eq!(snapshot.denomination_totals()[0].initial, i64::MAX);
}
