//! Cycle template derivation: the repeating pattern (length = shift count)
//! assigning each cycle position a duty timing, a rest slot or an off day.

use crate::model::{CycleEntry, CycleKind, DutyTiming, ALLOWED_PERIODS_OF_DUTY};

/// Timings actually in play for the configured periods of duty. Extra rows
/// beyond the period count are dropped; an out-of-range period count keeps
/// every timing.
pub fn active_timings(timings: &[DutyTiming], periods_of_duty: u32) -> Vec<DutyTiming> {
    let limit = if ALLOWED_PERIODS_OF_DUTY.contains(&periods_of_duty) {
        periods_of_duty as usize
    } else {
        timings.len()
    };
    timings.iter().take(limit).cloned().collect()
}

/// Default entry for cycle position `index`: one timing per leading position,
/// then a rest slot (two-period pattern only occupies it implicitly via
/// `index == timings.len()`), then off days.
pub fn default_cycle_entry(index: usize, timings: &[DutyTiming]) -> CycleEntry {
    let sequence = index as u32 + 1;
    if timings.is_empty() {
        return CycleEntry::off(sequence);
    }
    if index < timings.len() {
        return CycleEntry::timing(sequence, timings[index].id.clone());
    }
    if index == timings.len() {
        return CycleEntry::rest(sequence);
    }
    CycleEntry::off(sequence)
}

/// Builds a fresh cycle of `cycle_length` default entries.
pub fn build_cycle(cycle_length: u32, timings: &[DutyTiming]) -> Vec<CycleEntry> {
    (0..cycle_length as usize)
        .map(|index| default_cycle_entry(index, timings))
        .collect()
}

/// Repairs an edited or loaded cycle against the active timing set. A timing
/// entry whose binding no longer references an active timing is remapped: to
/// the rest slot when it falls past the timings under a two-period
/// configuration, otherwise re-bound to `active[index % active.len()]`. With
/// no active timings at all, timing entries degrade to off days.
pub fn sanitize_cycle(
    entries: &[CycleEntry],
    timings: &[DutyTiming],
    periods_of_duty: u32,
) -> Vec<CycleEntry> {
    let active = active_timings(timings, periods_of_duty);
    let normalized_periods = if ALLOWED_PERIODS_OF_DUTY.contains(&periods_of_duty) {
        periods_of_duty as usize
    } else {
        active.len()
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let sequence = if entry.sequence > 0 {
                entry.sequence
            } else {
                index as u32 + 1
            };
            if entry.kind != CycleKind::Timing {
                let mut kept = entry.clone();
                kept.sequence = sequence;
                return kept;
            }
            if active.is_empty() {
                let mut off = CycleEntry::off(sequence);
                if !entry.label.is_empty() {
                    off.label = entry.label.clone();
                }
                return off;
            }
            if active.iter().any(|timing| timing.id == entry.timing_id) {
                let mut kept = entry.clone();
                kept.sequence = sequence;
                return kept;
            }
            if normalized_periods == 2 && index >= active.len() {
                let mut rest = CycleEntry::rest(sequence);
                if !entry.label.is_empty() {
                    rest.label = entry.label.clone();
                }
                return rest;
            }
            let fallback = &active[index % active.len()];
            let mut rebound = entry.clone();
            rebound.sequence = sequence;
            rebound.timing_id = fallback.id.clone();
            rebound
        })
        .collect()
}
