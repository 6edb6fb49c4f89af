//! Roster document serialization: the persisted wire shape, building it from
//! a draft and rebuilding a draft from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::UnitCatalog;
use crate::cycle::sanitize_cycle;
use crate::draft::RosterDraft;
use crate::model::{
    normalize_periods_of_duty, CycleEntry, CycleKind, Day, DutyTiming, RosterConfig, Shift,
    DEFAULT_TIMING_LABELS,
};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("configure the roster and select at least one day before saving")]
    NoDays,
    #[error("assign at least one officer before saving the roster")]
    NoAssignments,
    #[error("roster month is not defined")]
    MissingEffectiveMonth,
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// How the document should be persisted: new rosters are created, rosters
/// with an id are updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMethod {
    Post,
    Put,
}

/// Duty timing as persisted outside the cycle template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DutyTimingRecord {
    pub sequence: u32,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
}

/// One officer placement. An entry with several officers serializes to one
/// record per officer, all carrying the entry's remarks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub day_sequence: u32,
    pub shift_code: String,
    pub unit_key: String,
    pub officer: String,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleTimingRecord {
    pub id: String,
    pub label: String,
    pub sequence: u32,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleTemplate {
    #[serde(default)]
    pub timings: Vec<CycleTimingRecord>,
    #[serde(default)]
    pub cycle: Vec<CycleEntry>,
    #[serde(default)]
    pub shifts: Vec<String>,
}

/// Incumbents of a non-operational unit: a single value for single-officer
/// units, a list where the unit is staffed by several people.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NonOperationalValue {
    One(String),
    Many(Vec<String>),
}

impl NonOperationalValue {
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value.clone()],
            Self::Many(values) => values.clone(),
        }
    }
}

/// The complete persisted roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    pub effective_year: i32,
    pub effective_month: u32,
    pub effective_from: String,
    pub shift_cycle_length: u32,
    pub duration_days: u32,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub developed_by: Option<String>,
    #[serde(default)]
    pub verified_by: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
    pub shifts: Vec<Shift>,
    pub duty_timings: Vec<DutyTimingRecord>,
    pub units: Vec<String>,
    pub days: Vec<Day>,
    pub assignments: Vec<AssignmentRecord>,
    #[serde(default)]
    pub cycle_template: CycleTemplate,
    #[serde(default)]
    pub non_operational_assignments: BTreeMap<String, NonOperationalValue>,
}

impl RosterDocument {
    pub fn save_method(&self) -> SaveMethod {
        if self.id.is_some() {
            SaveMethod::Put
        } else {
            SaveMethod::Post
        }
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Serializes a draft into its persisted form. A draft saved as a draft
/// (`is_draft`) may be partial; a roster being published must have at least
/// one day and one assignment.
pub fn build_document(
    draft: &RosterDraft,
    catalog: &UnitCatalog,
    is_draft: bool,
    id: Option<Uuid>,
) -> Result<RosterDocument, DocumentError> {
    let allow_partial = is_draft;
    if !allow_partial && draft.days().is_empty() {
        return Err(DocumentError::NoDays);
    }
    let config = draft.config();
    if config.effective_year <= 0 || !(1..=12).contains(&config.effective_month) {
        return Err(DocumentError::MissingEffectiveMonth);
    }

    let mut assignments = Vec::new();
    for day in draft.days() {
        for shift in draft.shifts() {
            for unit_key in draft.units() {
                let Some(entry) = draft.entry(day.sequence, &shift.code, unit_key) else {
                    continue;
                };
                for officer in &entry.officers {
                    assignments.push(AssignmentRecord {
                        day_sequence: day.sequence,
                        shift_code: shift.code.clone(),
                        unit_key: unit_key.clone(),
                        officer: officer.clone(),
                        remarks: entry.remarks.clone(),
                    });
                }
            }
        }
    }
    if !allow_partial && assignments.is_empty() {
        return Err(DocumentError::NoAssignments);
    }

    let mut non_operational = BTreeMap::new();
    for unit in catalog.non_operational_ordered() {
        let Some(values) = draft.non_operational().get(&unit.key) else {
            continue;
        };
        if values.is_empty() {
            continue;
        }
        let value = if unit.allows_multiple_personnel {
            NonOperationalValue::Many(values.clone())
        } else {
            NonOperationalValue::One(values[0].clone())
        };
        non_operational.insert(unit.key.clone(), value);
    }

    let duty_timings = draft
        .timings()
        .iter()
        .enumerate()
        .map(|(index, timing)| DutyTimingRecord {
            sequence: nonzero_or(timing.sequence, index),
            title: timing.label.clone(),
            start_time: time_or_midnight(&timing.start_time),
            end_time: time_or_midnight(&timing.end_time),
        })
        .collect();

    let cycle_template = CycleTemplate {
        timings: draft
            .timings()
            .iter()
            .enumerate()
            .map(|(index, timing)| CycleTimingRecord {
                id: timing.id.clone(),
                label: timing.label.clone(),
                sequence: nonzero_or(timing.sequence, index),
                start_time: time_or_midnight(&timing.start_time),
                end_time: time_or_midnight(&timing.end_time),
            })
            .collect(),
        cycle: draft
            .cycle()
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let mut entry = entry.clone();
                entry.sequence = nonzero_or(entry.sequence, index);
                entry
            })
            .collect(),
        shifts: draft.shifts().iter().map(|shift| shift.code.clone()).collect(),
    };

    debug!(
        title = %config.title,
        days = draft.days().len(),
        assignments = assignments.len(),
        "roster document built"
    );
    Ok(RosterDocument {
        id,
        title: config.title.clone(),
        location: config.location.clone(),
        effective_year: config.effective_year,
        effective_month: config.effective_month,
        effective_from: config.effective_from.clone(),
        shift_cycle_length: config.shift_cycle_length,
        duration_days: config.duration_days,
        is_draft,
        developed_by: config.developed_by.clone(),
        verified_by: config.verified_by.clone(),
        approved_by: config.approved_by.clone(),
        shifts: draft.shifts().to_vec(),
        duty_timings,
        units: draft.units().to_vec(),
        days: draft.days().to_vec(),
        assignments,
        cycle_template,
        non_operational_assignments: non_operational,
    })
}

/// Rebuilds an editable draft from a persisted document. The rotation is
/// re-resolved, assignment rows are replayed into the grid and the team
/// deployments are derived back from the template-day entries. Recorded
/// deployments are not re-applied over the grid, so manual divergence in the
/// saved data survives the load.
pub fn load_document(document: &RosterDocument) -> RosterDraft {
    let timings = restore_timings(document);
    let periods = normalize_periods_of_duty(Some(timings.len() as u32));
    let timings: Vec<DutyTiming> = timings.into_iter().take(periods as usize).collect();

    let valid_ids: Vec<&str> = timings.iter().map(|timing| timing.id.as_str()).collect();
    let cycle: Vec<CycleEntry> = document
        .cycle_template
        .cycle
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut entry = entry.clone();
            entry.sequence = nonzero_or(entry.sequence, index);
            // A binding to a timing that no longer exists is pointed at the
            // first timing before the positional repair runs.
            if entry.kind == CycleKind::Timing
                && !entry.timing_id.is_empty()
                && !valid_ids.contains(&entry.timing_id.as_str())
            {
                entry.timing_id = timings
                    .first()
                    .map(|timing| timing.id.clone())
                    .unwrap_or_default();
            }
            entry
        })
        .collect();
    let cycle = sanitize_cycle(&cycle, &timings, periods);

    let config = RosterConfig {
        title: document.title.clone(),
        location: document.location.clone(),
        effective_year: document.effective_year,
        effective_month: document.effective_month,
        effective_from: document.effective_from.clone(),
        shift_count: document.shifts.len() as u32,
        shift_cycle_length: if document.shift_cycle_length > 0 {
            document.shift_cycle_length
        } else {
            document.shifts.len() as u32
        },
        duration_days: if document.duration_days > 0 {
            document.duration_days
        } else {
            document.days.len() as u32
        },
        periods_of_duty: periods,
        developed_by: document.developed_by.clone(),
        verified_by: document.verified_by.clone(),
        approved_by: document.approved_by.clone(),
    };

    let mut draft = RosterDraft::from_saved(
        config,
        document.shifts.clone(),
        timings,
        cycle,
        document.units.clone(),
        document.days.clone(),
    );

    for record in &document.assignments {
        draft.restore_assignment(
            record.day_sequence,
            &record.shift_code,
            &record.unit_key,
            &record.officer,
            &record.remarks,
        );
    }
    draft.refresh_manual_flags();
    draft.prune_team_assignments();
    draft.derive_team_assignments_from_template();

    for (unit_key, value) in &document.non_operational_assignments {
        draft.set_non_operational(unit_key, value.values());
    }

    debug!(title = %document.title, "roster document loaded");
    draft
}

fn restore_timings(document: &RosterDocument) -> Vec<DutyTiming> {
    if !document.cycle_template.timings.is_empty() {
        let by_sequence: BTreeMap<u32, &DutyTimingRecord> = document
            .duty_timings
            .iter()
            .enumerate()
            .map(|(index, record)| (nonzero_or(record.sequence, index), record))
            .collect();
        return document
            .cycle_template
            .timings
            .iter()
            .enumerate()
            .map(|(index, timing)| {
                let sequence = nonzero_or(timing.sequence, index);
                let duty = by_sequence
                    .get(&sequence)
                    .copied()
                    .or_else(|| document.duty_timings.get(index));
                let label = if !timing.label.is_empty() {
                    timing.label.clone()
                } else {
                    duty.map(|record| record.title.clone()).unwrap_or_default()
                };
                let start = duty
                    .map(|record| record.start_time.as_str())
                    .filter(|value| !value.is_empty())
                    .unwrap_or(&timing.start_time);
                let end = duty
                    .map(|record| record.end_time.as_str())
                    .filter(|value| !value.is_empty())
                    .unwrap_or(&timing.end_time);
                DutyTiming::new(
                    if timing.id.is_empty() {
                        DutyTiming::fallback_id(index)
                    } else {
                        timing.id.clone()
                    },
                    label,
                    sequence,
                    start,
                    end,
                )
            })
            .collect();
    }

    document
        .duty_timings
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let label = if !record.title.is_empty() {
                record.title.clone()
            } else {
                DEFAULT_TIMING_LABELS
                    .get(index)
                    .map(|label| label.to_string())
                    .unwrap_or_default()
            };
            DutyTiming::new(
                DutyTiming::fallback_id(index),
                label,
                nonzero_or(record.sequence, index),
                &record.start_time,
                &record.end_time,
            )
        })
        .collect()
}

fn nonzero_or(sequence: u32, index: usize) -> u32 {
    if sequence > 0 {
        sequence
    } else {
        index as u32 + 1
    }
}

fn time_or_midnight(value: &str) -> String {
    if value.is_empty() {
        "00:00:00".to_string()
    } else {
        value.to_string()
    }
}
