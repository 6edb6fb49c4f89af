//! The roster draft: scheduling configuration, the resolved rotation and the
//! assignment store, with template-day propagation and manual overrides.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::cycle::{active_timings, sanitize_cycle};
use crate::model::{
    build_days, dedupe_officers, AssignmentEntry, CycleEntry, Day, DutyTiming, RosterConfig, Shift,
};
use crate::rotation::Rotation;

/// Assignments keyed day sequence -> shift code -> unit key.
pub type AssignmentMap = BTreeMap<u32, BTreeMap<String, BTreeMap<String, AssignmentEntry>>>;

/// Team deployments keyed shift code -> unit key -> officer ids.
pub type TeamAssignmentMap = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// A duty roster being edited. All mutation goes through this type so the
/// rotation, manual flags and team deployments stay consistent.
#[derive(Debug, Clone, Default)]
pub struct RosterDraft {
    config: RosterConfig,
    shifts: Vec<Shift>,
    timings: Vec<DutyTiming>,
    cycle: Vec<CycleEntry>,
    days: Vec<Day>,
    units: Vec<String>,
    rotation: Rotation,
    assignments: AssignmentMap,
    team_assignments: TeamAssignmentMap,
    non_operational: BTreeMap<String, Vec<String>>,
}

impl RosterDraft {
    /// Builds a fresh draft from a configuration. The day list is derived
    /// from the effective month and the rotation is resolved immediately.
    pub fn new(
        config: RosterConfig,
        shifts: Vec<Shift>,
        timings: Vec<DutyTiming>,
        cycle: Vec<CycleEntry>,
        units: Vec<String>,
    ) -> Self {
        let days = build_days(
            config.effective_year,
            config.effective_month,
            &config.effective_from,
            config.duration_days,
        );
        let mut draft = Self {
            config,
            shifts,
            timings,
            cycle,
            days,
            units,
            ..Self::default()
        };
        draft.rebuild_rotation();
        draft
    }

    /// Rebuilds a draft from persisted state, trusting the stored day list
    /// rather than re-deriving it. Assignments are replayed separately via
    /// [`RosterDraft::restore_assignment`].
    pub fn from_saved(
        config: RosterConfig,
        shifts: Vec<Shift>,
        timings: Vec<DutyTiming>,
        cycle: Vec<CycleEntry>,
        units: Vec<String>,
        days: Vec<Day>,
    ) -> Self {
        let mut draft = Self {
            config,
            shifts,
            timings,
            cycle,
            days,
            units,
            ..Self::default()
        };
        draft.rebuild_rotation();
        draft
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn timings(&self) -> &[DutyTiming] {
        &self.timings
    }

    pub fn cycle(&self) -> &[CycleEntry] {
        &self.cycle
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    pub fn team_assignments(&self) -> &TeamAssignmentMap {
        &self.team_assignments
    }

    pub fn non_operational(&self) -> &BTreeMap<String, Vec<String>> {
        &self.non_operational
    }

    /// Re-applies a changed configuration over the existing assignments. The
    /// rotation is rebuilt, stale assignments are pruned and the recorded
    /// team deployments are re-applied to the grid.
    pub fn apply_configuration(
        &mut self,
        config: RosterConfig,
        shifts: Vec<Shift>,
        timings: Vec<DutyTiming>,
        cycle: Vec<CycleEntry>,
        units: Vec<String>,
    ) {
        debug!(title = %config.title, "applying roster configuration");
        self.days = build_days(
            config.effective_year,
            config.effective_month,
            &config.effective_from,
            config.duration_days,
        );
        self.config = config;
        self.shifts = shifts;
        self.timings = timings;
        self.cycle = cycle;
        self.units = units;
        self.rebuild_rotation();
        self.prune_assignments();
        self.prune_team_assignments();
        self.apply_all_team_assignments();
    }

    /// Resolves the rotation from the current cycle template. Trims the
    /// timing list to the active set and repairs the cycle first; an empty
    /// cycle or timing set clears the rotation entirely.
    pub fn rebuild_rotation(&mut self) {
        if self.days.is_empty() || self.shifts.is_empty() {
            self.rotation = Rotation::default();
            return;
        }
        let periods = if self.config.periods_of_duty > 0 {
            self.config.periods_of_duty
        } else {
            self.timings.len() as u32
        };
        self.timings = active_timings(&self.timings, periods);
        self.cycle = sanitize_cycle(&self.cycle, &self.timings, periods);
        if self.cycle.is_empty() || self.timings.is_empty() {
            self.rotation = Rotation::default();
            return;
        }
        self.rotation = Rotation::build(&self.days, &self.shifts, &self.cycle, &self.timings, periods);
    }

    pub fn entry(&self, day_sequence: u32, shift_code: &str, unit_key: &str) -> Option<&AssignmentEntry> {
        self.assignments
            .get(&day_sequence)?
            .get(shift_code)?
            .get(unit_key)
    }

    fn entry_mut(
        &mut self,
        day_sequence: u32,
        shift_code: &str,
        unit_key: &str,
    ) -> Option<&mut AssignmentEntry> {
        self.assignments
            .get_mut(&day_sequence)?
            .get_mut(shift_code)?
            .get_mut(unit_key)
    }

    /// Returns the entry for a duty cell, creating it when absent. Cells
    /// whose rotation does not resolve to a duty timing have no entries.
    pub fn ensure_entry(
        &mut self,
        day_sequence: u32,
        shift_code: &str,
        unit_key: &str,
    ) -> Option<&mut AssignmentEntry> {
        if !self.rotation.is_duty_cell(day_sequence, shift_code) {
            return None;
        }
        Some(
            self.assignments
                .entry(day_sequence)
                .or_default()
                .entry(shift_code.to_string())
                .or_default()
                .entry(unit_key.to_string())
                .or_default(),
        )
    }

    /// Replaces the officer list of one duty cell, then recomputes its
    /// manual flag, propagates from the template day and syncs the recorded
    /// team deployment.
    pub fn set_officers(
        &mut self,
        day_sequence: u32,
        shift_code: &str,
        unit_key: &str,
        officers: Vec<String>,
    ) {
        let officers = dedupe_officers(officers);
        let Some(entry) = self.ensure_entry(day_sequence, shift_code, unit_key) else {
            return;
        };
        entry.officers = officers;
        debug!(day_sequence, shift_code, unit_key, "duty cell officers updated");
        self.update_manual_flag(day_sequence, shift_code, unit_key);
        self.propagate_template_assignment(day_sequence, shift_code, unit_key);
        self.sync_team_assignment_from_template(day_sequence, shift_code, unit_key);
    }

    /// Replaces the remarks of one duty cell and propagates from the
    /// template day.
    pub fn set_remarks(
        &mut self,
        day_sequence: u32,
        shift_code: &str,
        unit_key: &str,
        remarks: &str,
    ) {
        let remarks = remarks.trim().to_string();
        let Some(entry) = self.ensure_entry(day_sequence, shift_code, unit_key) else {
            return;
        };
        entry.remarks = remarks;
        self.update_manual_flag(day_sequence, shift_code, unit_key);
        self.propagate_template_assignment(day_sequence, shift_code, unit_key);
    }

    /// Replays one persisted assignment row into the grid without touching
    /// manual flags or team deployments; used when loading a saved roster.
    pub fn restore_assignment(
        &mut self,
        day_sequence: u32,
        shift_code: &str,
        unit_key: &str,
        officer: &str,
        remarks: &str,
    ) {
        let Some(entry) = self.ensure_entry(day_sequence, shift_code, unit_key) else {
            return;
        };
        if !entry.officers.iter().any(|existing| existing == officer) {
            entry.officers.push(officer.to_string());
        }
        if !remarks.is_empty() {
            entry.remarks = remarks.to_string();
        }
    }

    /// Recomputes the manual flag of one entry against its shift's template
    /// day. The template day itself is always manual; elsewhere an entry is
    /// manual when it diverges from the template entry.
    fn update_manual_flag(&mut self, day_sequence: u32, shift_code: &str, unit_key: &str) {
        let Some(current) = self.entry(day_sequence, shift_code, unit_key).cloned() else {
            return;
        };
        let has_any = !current.is_empty();

        let manual = match self.rotation.template_day(shift_code, &self.days) {
            None => has_any,
            Some(template_day) if day_sequence == template_day => true,
            Some(template_day) => {
                if !self.rotation.is_duty_cell(template_day, shift_code) {
                    has_any
                } else {
                    match self.ensure_entry(template_day, shift_code, unit_key).cloned() {
                        None => has_any,
                        Some(template) => {
                            if !has_any && template.is_empty() {
                                false
                            } else {
                                !(current.officers_match(&template)
                                    && current.remarks == template.remarks)
                            }
                        }
                    }
                }
            }
        };

        if let Some(entry) = self.entry_mut(day_sequence, shift_code, unit_key) {
            entry.is_manual = manual;
        }
    }

    /// Recomputes every manual flag in the grid.
    pub fn refresh_manual_flags(&mut self) {
        let keys: Vec<(u32, String, String)> = self
            .assignments
            .iter()
            .flat_map(|(day, day_map)| {
                day_map.iter().flat_map(move |(shift, unit_map)| {
                    unit_map
                        .keys()
                        .map(move |unit| (*day, shift.clone(), unit.clone()))
                })
            })
            .collect();
        for (day, shift, unit) in keys {
            self.update_manual_flag(day, &shift, &unit);
        }
    }

    /// Copies the template-day entry of (shift, unit) to every other day of
    /// that shift, skipping entries marked manual. A no-op unless
    /// `source_day` is the shift's template day.
    fn propagate_template_assignment(&mut self, source_day: u32, shift_code: &str, unit_key: &str) {
        let Some(template_day) = self.rotation.template_day(shift_code, &self.days) else {
            return;
        };
        if source_day != template_day {
            return;
        }
        let Some(template) = self.ensure_entry(template_day, shift_code, unit_key) else {
            return;
        };
        let officers = template.officers.clone();
        let remarks = template.remarks.clone();

        let day_sequences: Vec<u32> = self.days.iter().map(|day| day.sequence).collect();
        for day_sequence in day_sequences {
            if day_sequence == template_day {
                continue;
            }
            let Some(target) = self.ensure_entry(day_sequence, shift_code, unit_key) else {
                continue;
            };
            if target.is_manual {
                continue;
            }
            target.officers = officers.clone();
            target.remarks = remarks.clone();
        }
    }

    pub fn team_assignment(&self, shift_code: &str, unit_key: &str) -> Vec<String> {
        self.team_assignments
            .get(shift_code)
            .and_then(|units| units.get(unit_key))
            .cloned()
            .unwrap_or_default()
    }

    /// Records the officers deployed to (shift, unit). An empty list removes
    /// the deployment.
    pub fn set_team_assignment(&mut self, shift_code: &str, unit_key: &str, officers: Vec<String>) {
        let officers = dedupe_officers(officers);
        if officers.is_empty() {
            if let Some(units) = self.team_assignments.get_mut(shift_code) {
                units.remove(unit_key);
                if units.is_empty() {
                    self.team_assignments.remove(shift_code);
                }
            }
            return;
        }
        self.team_assignments
            .entry(shift_code.to_string())
            .or_default()
            .insert(unit_key.to_string(), officers);
    }

    /// Writes the recorded deployment of (shift, unit) into the grid: the
    /// template day unconditionally, every other day unless marked manual.
    /// Clearing a deployment also clears remarks on non-manual, non-template
    /// days.
    pub fn apply_team_assignment(&mut self, shift_code: &str, unit_key: &str) {
        let Some(template_day) = self.rotation.template_day(shift_code, &self.days) else {
            return;
        };
        let officers = self.team_assignment(shift_code, unit_key);
        if self.ensure_entry(template_day, shift_code, unit_key).is_none() {
            return;
        }
        debug!(shift_code, unit_key, "applying team deployment");

        let day_sequences: Vec<u32> = self.days.iter().map(|day| day.sequence).collect();
        for day_sequence in day_sequences {
            let Some(entry) = self.ensure_entry(day_sequence, shift_code, unit_key) else {
                continue;
            };
            if day_sequence == template_day {
                entry.officers = officers.clone();
                continue;
            }
            if entry.is_manual {
                continue;
            }
            entry.officers = officers.clone();
            if officers.is_empty() {
                entry.remarks.clear();
            }
        }
    }

    /// Re-applies every recorded deployment and clears grid officers for
    /// (shift, unit) pairs with no recorded deployment, then refreshes the
    /// manual flags.
    pub fn apply_all_team_assignments(&mut self) {
        if self.days.is_empty() || self.shifts.is_empty() {
            return;
        }

        let mut active: BTreeSet<(String, String)> = BTreeSet::new();
        let pairs: Vec<(String, String)> = self
            .team_assignments
            .iter()
            .flat_map(|(shift, units)| {
                units.keys().map(move |unit| (shift.clone(), unit.clone()))
            })
            .collect();
        for (shift_code, unit_key) in pairs {
            active.insert((shift_code.clone(), unit_key.clone()));
            self.apply_team_assignment(&shift_code, &unit_key);
        }

        let day_sequences: Vec<u32> = self.days.iter().map(|day| day.sequence).collect();
        let shift_codes: Vec<String> = self.shifts.iter().map(|shift| shift.code.clone()).collect();
        let unit_keys = self.units.clone();
        for day_sequence in day_sequences {
            for shift_code in &shift_codes {
                let Some(template_day) = self.rotation.template_day(shift_code, &self.days) else {
                    continue;
                };
                for unit_key in &unit_keys {
                    if active.contains(&(shift_code.clone(), unit_key.clone())) {
                        continue;
                    }
                    let Some(entry) = self.entry_mut(day_sequence, shift_code, unit_key) else {
                        continue;
                    };
                    if day_sequence == template_day || !entry.is_manual {
                        entry.officers.clear();
                        if day_sequence != template_day {
                            entry.remarks.clear();
                        }
                    }
                }
            }
        }

        self.refresh_manual_flags();
    }

    /// Records the template-day entry of (shift, unit) as that shift's
    /// deployment. A no-op unless `day_sequence` is the shift's template day.
    fn sync_team_assignment_from_template(
        &mut self,
        day_sequence: u32,
        shift_code: &str,
        unit_key: &str,
    ) {
        let Some(template_day) = self.rotation.template_day(shift_code, &self.days) else {
            return;
        };
        if day_sequence != template_day {
            return;
        }
        let Some(entry) = self.ensure_entry(day_sequence, shift_code, unit_key) else {
            return;
        };
        let officers = entry.officers.clone();
        self.set_team_assignment(shift_code, unit_key, officers);
    }

    /// Rebuilds the deployment map from the template-day entries.
    pub fn derive_team_assignments_from_template(&mut self) {
        if self.shifts.is_empty() {
            self.team_assignments.clear();
            return;
        }
        let mut teams: TeamAssignmentMap = BTreeMap::new();
        for shift in &self.shifts {
            let Some(template_day) = self.rotation.template_day(&shift.code, &self.days) else {
                continue;
            };
            let Some(unit_map) = self
                .assignments
                .get(&template_day)
                .and_then(|day_map| day_map.get(&shift.code))
            else {
                continue;
            };
            for (unit_key, entry) in unit_map {
                if entry.officers.is_empty() {
                    continue;
                }
                teams
                    .entry(shift.code.clone())
                    .or_default()
                    .insert(unit_key.clone(), entry.officers.clone());
            }
        }
        self.team_assignments = teams;
    }

    /// Drops assignments referencing days, shifts or units no longer in the
    /// configuration, and entries whose cell no longer resolves to a duty
    /// timing.
    pub fn prune_assignments(&mut self) {
        let valid_days: BTreeSet<u32> = self.days.iter().map(|day| day.sequence).collect();
        let valid_shifts: BTreeSet<&str> =
            self.shifts.iter().map(|shift| shift.code.as_str()).collect();
        let valid_units: BTreeSet<&str> = self.units.iter().map(String::as_str).collect();

        let rotation = &self.rotation;
        self.assignments.retain(|day_sequence, day_map| {
            if !valid_days.contains(day_sequence) {
                return false;
            }
            day_map.retain(|shift_code, unit_map| {
                if !valid_shifts.contains(shift_code.as_str()) {
                    return false;
                }
                if !rotation.is_duty_cell(*day_sequence, shift_code) {
                    return false;
                }
                unit_map.retain(|unit_key, _| valid_units.contains(unit_key.as_str()));
                true
            });
            true
        });
    }

    /// Drops recorded deployments referencing unknown shifts or units.
    pub fn prune_team_assignments(&mut self) {
        let valid_shifts: BTreeSet<&str> =
            self.shifts.iter().map(|shift| shift.code.as_str()).collect();
        let valid_units: BTreeSet<&str> = self.units.iter().map(String::as_str).collect();
        self.team_assignments.retain(|shift_code, unit_map| {
            if !valid_shifts.contains(shift_code.as_str()) {
                return false;
            }
            unit_map.retain(|unit_key, _| valid_units.contains(unit_key.as_str()));
            !unit_map.is_empty()
        });
    }

    /// Records the incumbents of a non-operational unit. Blank values are
    /// dropped; an empty list removes the record.
    pub fn set_non_operational(&mut self, unit_key: &str, values: Vec<String>) {
        let values: Vec<String> = values
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        if values.is_empty() {
            self.non_operational.remove(unit_key);
        } else {
            self.non_operational.insert(unit_key.to_string(), values);
        }
    }
}
