//! Cassette snapshot parsed from one telemetry line
//!
//! Slots are re-derived from scratch for every line; nothing carries over
//! between snapshots.

use super::attributes::{
    cash_unit_elements, parse_attributes, parse_count, quote_bare_values, strip_telemetry_prefix,
};
use crate::app::models::{CassetteSlot, CassetteType};
use crate::constants::{MAX_CASSETTES, MINOR_UNITS_PER_MAJOR};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Summed values of the financial slots sharing one denomination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DenominationAggregate {
    pub denomination: i64,
    pub initial: i64,
    pub dispensed: i64,
    pub rejected: i64,
    pub remaining: i64,
}

impl DenominationAggregate {
    /// Remaining + dispensed + rejected value
    pub fn total(&self) -> i64 {
        self.remaining
            .saturating_add(self.dispensed)
            .saturating_add(self.rejected)
    }

    /// Any value is nonzero
    pub fn is_active(&self) -> bool {
        self.initial > 0 || self.dispensed > 0 || self.rejected > 0 || self.remaining > 0
    }
}

/// The five cash units plus the labels seen on one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CassetteSnapshot {
    slots: [CassetteSlot; MAX_CASSETTES],
    labels: BTreeMap<usize, String>,
}

impl Default for CassetteSnapshot {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|i| CassetteSlot::empty(i + 1)),
            labels: BTreeMap::new(),
        }
    }
}

impl CassetteSnapshot {
    /// Parse a telemetry line; unusable elements are skipped
    pub fn parse(line: &str) -> Self {
        let xml = quote_bare_values(strip_telemetry_prefix(line));
        let mut snapshot = Self::default();
        let mut sequential_index = 1;

        for element in cash_unit_elements(&xml) {
            let attrs = parse_attributes(element);

            let Some(slot_number) = attrs.get("n") else {
                trace!("Cash unit without slot number: {}", element);
                continue;
            };
            let slot_number = parse_count(Some(slot_number));
            if slot_number < 1 || slot_number > MAX_CASSETTES as i64 {
                trace!("Cash unit slot {} out of range", slot_number);
                continue;
            }

            let note_value = parse_count(attrs.get("v"));
            let cassette_type = CassetteType::from(parse_count(attrs.get("typ")));
            let change_id = attrs.get("dc").map(String::as_str).unwrap_or_default();

            let logical_index = match leading_index(change_id) {
                Some(index) => index,
                None => {
                    let index = sequential_index;
                    sequential_index += 1;
                    index
                }
            };

            if let Some(prefix) = cassette_type.label_prefix() {
                snapshot
                    .labels
                    .entry(logical_index)
                    .or_insert_with(|| format!("{}{}", prefix, change_id));
            }

            let index = slot_number as usize;
            snapshot.slots[index - 1] = CassetteSlot {
                index,
                denomination: note_value / MINOR_UNITS_PER_MAJOR,
                cassette_type,
                initial: parse_count(attrs.get("ic")),
                dispensed: parse_count(attrs.get("ds")),
                rejected: parse_count(attrs.get("rj")),
                remaining: parse_count(attrs.get("c")),
            };
        }

        snapshot
    }

    /// All five slots in slot order
    pub fn slots(&self) -> &[CassetteSlot] {
        &self.slots
    }

    /// Slots with any nonzero counter
    pub fn active_slots(&self) -> impl Iterator<Item = &CassetteSlot> {
        self.slots.iter().filter(|slot| slot.is_active())
    }

    /// Active slots holding dispensable stock
    pub fn financial_slots(&self) -> impl Iterator<Item = &CassetteSlot> {
        self.slots.iter().filter(|slot| slot.is_financial())
    }

    pub fn has_active_slots(&self) -> bool {
        self.active_slots().next().is_some()
    }

    pub fn has_financial_slots(&self) -> bool {
        self.financial_slots().next().is_some()
    }

    /// Display label of a slot: its cash total label, else `CASSETTE_<n>`
    pub fn label_for(&self, slot: &CassetteSlot) -> String {
        self.labels
            .get(&slot.index)
            .cloned()
            .unwrap_or_else(|| slot.default_label())
    }

    /// Cash total labels by logical index
    pub fn labels(&self) -> &BTreeMap<usize, String> {
        &self.labels
    }

    /// Distinct nonzero denominations of the financial slots, ascending
    pub fn denominations(&self) -> BTreeSet<i64> {
        self.financial_slots()
            .map(|slot| slot.denomination)
            .filter(|denomination| *denomination != 0)
            .collect()
    }

    /// More than one denomination among the financial slots
    pub fn has_mixed_denominations(&self) -> bool {
        self.denominations().len() > 1
    }

    /// Per-denomination totals over financial slots, ascending
    pub fn denomination_totals(&self) -> Vec<DenominationAggregate> {
        self.denominations()
            .into_iter()
            .map(|denomination| {
                self.financial_slots()
                    .filter(|slot| slot.denomination == denomination)
                    .fold(
                        DenominationAggregate {
                            denomination,
                            ..Default::default()
                        },
                        |mut aggregate, slot| {
                            aggregate.initial = aggregate.initial.saturating_add(slot.initial_amount());
                            aggregate.dispensed =
                                aggregate.dispensed.saturating_add(slot.dispensed_amount());
                            aggregate.rejected =
                                aggregate.rejected.saturating_add(slot.rejected_amount());
                            aggregate.remaining =
                                aggregate.remaining.saturating_add(slot.remaining_amount());
                            aggregate
                        },
                    )
            })
            .collect()
    }
}

/// Logical index from a `dc` value that starts with a digit and is nonzero
fn leading_index(change_id: &str) -> Option<usize> {
    if !change_id.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let end = change_id
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(change_id.len());
    match change_id[..end].parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(index) => Some(index),
    }
}
