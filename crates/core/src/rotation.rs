//! Resolved rotation: which cycle entry governs each (day, shift) cell, and
//! which day anchors template propagation for each shift.

use std::collections::BTreeMap;

use crate::model::{order_by_sequence, CycleEntry, Day, DutyTiming, Shift};

/// The fully resolved rotation for one roster. Shift `s` (by rotation order)
/// on day `d` (zero-based) is governed by cycle position `(d + s) mod len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rotation {
    entries: BTreeMap<(u32, String), CycleEntry>,
    template_days: BTreeMap<String, u32>,
}

impl Rotation {
    /// Resolves the rotation grid. The cycle is expected to be sanitized
    /// against `active_timings` already. Under the two-period configuration a
    /// timing entry whose binding is not active is re-resolved to
    /// `active[(d + s) mod active.len()]`, degrading to an off day only when
    /// no timing can be found.
    pub fn build(
        days: &[Day],
        shifts: &[Shift],
        cycle: &[CycleEntry],
        active_timings: &[DutyTiming],
        periods_of_duty: u32,
    ) -> Self {
        if days.is_empty() || shifts.is_empty() || cycle.is_empty() || active_timings.is_empty() {
            return Self::default();
        }

        let ordered_shifts = order_by_sequence(shifts);

        let mut entries = BTreeMap::new();
        for (day_index, day) in days.iter().enumerate() {
            for (shift_index, shift) in ordered_shifts.iter().enumerate() {
                let cycle_index = (day_index + shift_index) % cycle.len();
                let template = &cycle[cycle_index];
                let resolved = if periods_of_duty == 2 && template.is_timing() {
                    resolve_two_period_timing(
                        template,
                        active_timings,
                        day_index + shift_index,
                        cycle_index,
                    )
                } else {
                    template.clone()
                };
                entries.insert((day.sequence, shift.code.clone()), resolved);
            }
        }

        let mut rotation = Self {
            entries,
            template_days: BTreeMap::new(),
        };
        let template_days = compute_template_days(&rotation, days, shifts);
        rotation.template_days = template_days;
        rotation
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, day_sequence: u32, shift_code: &str) -> Option<&CycleEntry> {
        self.entries.get(&(day_sequence, shift_code.to_string()))
    }

    /// True when the cell resolves to a duty timing and can hold assignments.
    pub fn is_duty_cell(&self, day_sequence: u32, shift_code: &str) -> bool {
        self.entry(day_sequence, shift_code)
            .map(CycleEntry::is_timing)
            .unwrap_or(false)
    }

    /// The day whose assignments act as the template for `shift_code`,
    /// falling back to the first roster day when the shift never comes on
    /// duty.
    pub fn template_day(&self, shift_code: &str, days: &[Day]) -> Option<u32> {
        if let Some(sequence) = self.template_days.get(shift_code) {
            return Some(*sequence);
        }
        days.first().map(|day| day.sequence)
    }

    /// The shift on duty for `timing_id` on the given day, if any.
    pub fn shift_for_timing<'a>(
        &self,
        day_sequence: u32,
        timing_id: &str,
        shifts: &'a [Shift],
    ) -> Option<&'a Shift> {
        if timing_id.is_empty() {
            return None;
        }
        shifts.iter().find(|shift| {
            self.entry(day_sequence, &shift.code)
                .map(|entry| entry.is_timing() && entry.timing_id == timing_id)
                .unwrap_or(false)
        })
    }
}

fn resolve_two_period_timing(
    template: &CycleEntry,
    active_timings: &[DutyTiming],
    rotation_offset: usize,
    cycle_index: usize,
) -> CycleEntry {
    let preferred = active_timings
        .iter()
        .find(|timing| timing.id == template.timing_id);
    let resolved = preferred.or_else(|| active_timings.get(rotation_offset % active_timings.len()));
    match resolved {
        Some(timing) => {
            let mut entry = template.clone();
            entry.timing_id = timing.id.clone();
            entry
        }
        None => {
            let mut off = CycleEntry::off(if template.sequence > 0 {
                template.sequence
            } else {
                cycle_index as u32 + 1
            });
            if !template.label.is_empty() {
                off.label = template.label.clone();
            }
            off
        }
    }
}

fn compute_template_days(
    rotation: &Rotation,
    days: &[Day],
    shifts: &[Shift],
) -> BTreeMap<String, u32> {
    let mut ordered_days = days.to_vec();
    ordered_days.sort_by_key(|day| day.sequence);

    let mut mapping = BTreeMap::new();
    for shift in shifts {
        for day in &ordered_days {
            if rotation.is_duty_cell(day.sequence, &shift.code) {
                mapping.insert(shift.code.clone(), day.sequence);
                break;
            }
        }
    }
    mapping
}
