//! Cash dispenser status report rendering
//!
//! Rendering and discrepancy detection happen in one pass so the report text
//! and the list of discrepancies always agree.

use super::currency::format_currency;
use super::snapshot::CassetteSnapshot;
use crate::app::models::{CassetteSlot, CassetteType};
use crate::constants::RULE_WIDTH;
use serde::Serialize;

/// Where a counter mismatch was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiscrepancyScope {
    Cassette(String),
    Denomination(i64),
    Overall,
}

/// Counter mismatch: the calculated total differs from the initial value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub scope: DiscrepancyScope,
    /// Initial value
    pub expected: i64,
    /// Remaining + dispensed + rejected value
    pub actual: i64,
}

impl Discrepancy {
    /// Absolute difference between expected and actual value
    pub fn difference(&self) -> i64 {
        self.actual.saturating_sub(self.expected).saturating_abs()
    }

    /// A mismatch exists only against a nonzero initial value
    fn check(scope: DiscrepancyScope, expected: i64, actual: i64) -> Option<Self> {
        (expected > 0 && actual != expected).then_some(Self {
            scope,
            expected,
            actual,
        })
    }
}

/// Rendered status report for one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CassetteReport {
    text: String,
    discrepancies: Vec<Discrepancy>,
}

impl CassetteReport {
    /// Render the report for a snapshot with the given currency symbol
    pub fn render(snapshot: &CassetteSnapshot, currency: &str) -> Self {
        let mut writer = ReportWriter::new(currency);
        writer.render(snapshot);
        Self {
            text: writer.out,
            discrepancies: writer.discrepancies,
        }
    }

    /// Report text with `\n` line endings
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Report text with `\r\n` line endings, as written to the journal report
    pub fn to_crlf(&self) -> String {
        self.text.replace('\n', "\r\n")
    }

    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.discrepancies
    }

    pub fn has_discrepancy(&self) -> bool {
        !self.discrepancies.is_empty()
    }
}

struct ReportWriter<'a> {
    currency: &'a str,
    out: String,
    discrepancies: Vec<Discrepancy>,
}

impl<'a> ReportWriter<'a> {
    fn new(currency: &'a str) -> Self {
        Self {
            currency,
            out: String::new(),
            discrepancies: Vec::new(),
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn double_rule(&mut self) {
        self.line("=".repeat(RULE_WIDTH));
    }

    fn single_rule(&mut self) {
        self.line("-".repeat(RULE_WIDTH));
    }

    fn money(&self, value: i64) -> String {
        format_currency(value, self.currency)
    }

    fn render(&mut self, snapshot: &CassetteSnapshot) {
        self.double_rule();
        self.line("                          CASH DISPENSER STATUS REPORT");
        self.double_rule();

        if !snapshot.has_active_slots() {
            self.line("No active cassettes detected.");
            self.double_rule();
            return;
        }

        self.slot_table(snapshot);
        self.cassette_section(snapshot);

        if snapshot.has_financial_slots() {
            if snapshot.has_mixed_denominations() {
                self.denomination_section(snapshot);
            }
            self.overall_section(snapshot);

            if !self.discrepancies.is_empty() {
                self.blank();
                self.line("*** ATTENTION: CASSETTE DISCREPANCIES DETECTED ***");
                self.line("Please check the dispenser for possible jamming or mechanical issues.");
            }
        }

        self.blank();
        self.out.push_str(&"=".repeat(RULE_WIDTH));
    }

    fn slot_table(&mut self, snapshot: &CassetteSnapshot) {
        self.blank();
        self.line("CASSETTE SUMMARY:");
        self.single_rule();
        self.line("CASSETTE        DENOMINATION    INITIAL    DISPENSED   REJECTED   REMAINING");
        self.single_rule();

        for slot in snapshot.active_slots() {
            let label: String = snapshot.label_for(slot).chars().take(16).collect();
            self.line(format!(
                "{:<16}{:<16}{:<11}{:<12}{:<11}{:<10}",
                label,
                format_currency(slot.denomination, ""),
                slot.initial,
                slot.dispensed,
                slot.rejected,
                slot.remaining
            ));
        }

        self.single_rule();
    }

    fn cassette_section(&mut self, snapshot: &CassetteSnapshot) {
        self.blank();
        self.line("SUMMARY PER DISPENSER CASSETTE:");
        self.single_rule();

        if !snapshot.has_financial_slots() {
            self.line("No dispenser cassettes found (only reject/retract cassettes detected).");
            return;
        }

        for slot in snapshot.financial_slots() {
            self.cassette_entry(&snapshot.label_for(slot), slot);
        }
    }

    fn cassette_entry(&mut self, label: &str, slot: &CassetteSlot) {
        let type_info = if slot.cassette_type == CassetteType::Dispenser {
            " (DISPENSER)"
        } else {
            ""
        };

        self.line(format!("{}{}:", label, type_info));
        self.line(format!("  Initial Amount   : {}", self.money(slot.initial_amount())));
        self.line(format!("  Dispensed Amount : {}", self.money(slot.dispensed_amount())));
        self.line(format!("  Rejected Amount  : {}", self.money(slot.rejected_amount())));
        self.line(format!("  Remaining Amount : {}", self.money(slot.remaining_amount())));
        self.line(format!("  Total Calculated : {}", self.money(slot.total_amount())));

        let scope = DiscrepancyScope::Cassette(label.to_string());
        if let Some(discrepancy) = Discrepancy::check(scope, slot.initial_amount(), slot.total_amount())
        {
            self.line("  ");
            self.line("*** SUSPECT JAMMED DETECTED ***");
            self.line(format!(
                "  TOTAL COUNTER NOT MATCH {} WITH INITIAL COUNT {} ON {}",
                self.money(discrepancy.actual),
                self.money(discrepancy.expected),
                label
            ));
            self.line(format!("  DIFFERENCE: {}", self.money(discrepancy.difference())));
            self.discrepancies.push(discrepancy);
        }
    }

    fn denomination_section(&mut self, snapshot: &CassetteSnapshot) {
        self.blank();
        self.line("SUMMARY BY DENOMINATION:");
        self.single_rule();

        for aggregate in snapshot.denomination_totals() {
            if !aggregate.is_active() {
                continue;
            }
            let denomination = format_currency(aggregate.denomination, "");

            self.line(format!("Denomination{} :", denomination));
            self.line(format!("  Initial   : {}", self.money(aggregate.initial)));
            self.line(format!("  Dispensed : {}", self.money(aggregate.dispensed)));
            self.line(format!("  Rejected  : {}", self.money(aggregate.rejected)));
            self.line(format!("  Remaining : {}", self.money(aggregate.remaining)));

            let scope = DiscrepancyScope::Denomination(aggregate.denomination);
            if let Some(discrepancy) = Discrepancy::check(scope, aggregate.initial, aggregate.total())
            {
                self.line("  ");
                self.line("*** SUSPECT JAMMED DETECTED ***");
                self.line(format!(
                    "  TOTAL COUNTER NOT MATCH {} WITH INITIAL COUNT {} ON DENOMINATION{}",
                    self.money(discrepancy.actual),
                    self.money(discrepancy.expected),
                    denomination
                ));
                self.discrepancies.push(discrepancy);
            }
        }
    }

    fn overall_section(&mut self, snapshot: &CassetteSnapshot) {
        let (initial, dispensed, rejected, remaining) = snapshot.financial_slots().fold(
            (0i64, 0i64, 0i64, 0i64),
            |(initial, dispensed, rejected, remaining), slot| {
                (
                    initial.saturating_add(slot.initial_amount()),
                    dispensed.saturating_add(slot.dispensed_amount()),
                    rejected.saturating_add(slot.rejected_amount()),
                    remaining.saturating_add(slot.remaining_amount()),
                )
            },
        );
        let total = dispensed.saturating_add(rejected).saturating_add(remaining);

        self.blank();
        self.line("OVERALL CASH DISPENSER SUMMARY:");
        self.single_rule();
        self.line(format!("Total Initial Amount    : {}", self.money(initial)));
        self.line(format!("Total Dispensed Amount  : {}", self.money(dispensed)));
        self.line(format!("Total Rejected Amount   : {}", self.money(rejected)));
        self.line(format!("Total Remaining Amount  : {}", self.money(remaining)));
        self.line(format!("Total in Dispenser      : {}", self.money(total)));

        if let Some(discrepancy) = Discrepancy::check(DiscrepancyScope::Overall, initial, total) {
            self.blank();
            self.line("*** OVERALL DISCREPANCY DETECTED ***");
            self.line(format!("Expected Total: {}", self.money(discrepancy.expected)));
            self.line(format!("Actual Total:   {}", self.money(discrepancy.actual)));
            self.line(format!("Difference:     {}", self.money(discrepancy.difference())));
            self.discrepancies.push(discrepancy);
        }
    }
}
