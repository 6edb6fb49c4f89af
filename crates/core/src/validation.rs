//! Staged validation of a roster configuration. Errors are aggregated so the
//! operator sees every problem at once; each error knows the earliest wizard
//! stage that can fix it.

use thiserror::Error;

use crate::catalog::UnitCatalog;
use crate::model::{
    CycleEntry, DutyTiming, RosterConfig, Shift, ALLOWED_PERIODS_OF_DUTY, MAX_SHIFT_COUNT,
    MIN_SHIFT_COUNT,
};

/// Wizard stages, in fix-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Scheduling,
    ShiftsAndCycle,
    UnitSelection,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("select the roster month")]
    MissingEffectiveMonth,
    #[error("select the effective date")]
    MissingEffectiveFrom,
    #[error("provide the roster duration in days")]
    MissingDuration,
    #[error("provide the number of shifts (between {MIN_SHIFT_COUNT} and {MAX_SHIFT_COUNT})")]
    InvalidShiftCount,
    #[error("provide the shift cycle length (between {MIN_SHIFT_COUNT} and {MAX_SHIFT_COUNT})")]
    InvalidCycleLength,
    #[error("shift cycle days and number of shifts must be the same")]
    CycleLengthMismatch,
    #[error("periods of duty must be either 2 or 3")]
    InvalidPeriodsOfDuty,
    #[error("each shift row needs a sequence and a unique code")]
    ShiftRowCountMismatch,
    #[error("all shift rows need a code")]
    MissingShiftCode,
    #[error("shift codes must be unique")]
    DuplicateShiftCodes,
    #[error("provide exactly {expected} duty timings")]
    TimingCountMismatch { expected: u32 },
    #[error("every duty timing requires a label")]
    MissingTimingLabel,
    #[error("provide start and end times for every duty timing")]
    MissingTimingTimes,
    #[error("the cycle template must include an entry for each day in the cycle length")]
    CycleTemplateLengthMismatch,
    #[error("the cycle template must contain at least one duty timing")]
    CycleTemplateWithoutTiming,
    #[error("select at least one roster unit")]
    NoUnitsSelected,
    #[error("unknown roster unit key: {key}")]
    UnknownUnit { key: String },
}

impl ConfigurationError {
    /// The earliest stage where this error can be corrected.
    pub fn stage(&self) -> Stage {
        use ConfigurationError::*;
        match self {
            MissingEffectiveMonth | MissingEffectiveFrom | MissingDuration | InvalidShiftCount
            | InvalidCycleLength | CycleLengthMismatch | InvalidPeriodsOfDuty => Stage::Scheduling,
            ShiftRowCountMismatch | MissingShiftCode | DuplicateShiftCodes
            | TimingCountMismatch { .. } | MissingTimingLabel | MissingTimingTimes
            | CycleTemplateLengthMismatch | CycleTemplateWithoutTiming => Stage::ShiftsAndCycle,
            NoUnitsSelected | UnknownUnit { .. } => Stage::UnitSelection,
        }
    }
}

/// The earliest stage an operator must revisit, given aggregated errors.
pub fn first_invalid_stage(errors: &[ConfigurationError]) -> Option<Stage> {
    errors.iter().map(ConfigurationError::stage).min()
}

/// Checks the complete configuration, aggregating every error across all
/// three stages.
pub fn validate_configuration(
    config: &RosterConfig,
    shifts: &[Shift],
    timings: &[DutyTiming],
    cycle: &[CycleEntry],
    units: &[String],
    catalog: &UnitCatalog,
) -> Result<(), Vec<ConfigurationError>> {
    let mut errors = Vec::new();
    check_scheduling(config, &mut errors);
    check_shifts_and_cycle(config, shifts, timings, cycle, &mut errors);
    check_unit_selection(units, catalog, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks only the named stage; used while stepping through the wizard.
pub fn validate_stage(
    stage: Stage,
    config: &RosterConfig,
    shifts: &[Shift],
    timings: &[DutyTiming],
    cycle: &[CycleEntry],
    units: &[String],
    catalog: &UnitCatalog,
) -> Result<(), Vec<ConfigurationError>> {
    let mut errors = Vec::new();
    match stage {
        Stage::Scheduling => check_scheduling(config, &mut errors),
        Stage::ShiftsAndCycle => check_shifts_and_cycle(config, shifts, timings, cycle, &mut errors),
        Stage::UnitSelection => check_unit_selection(units, catalog, &mut errors),
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_scheduling(config: &RosterConfig, errors: &mut Vec<ConfigurationError>) {
    if config.effective_year <= 0 || !(1..=12).contains(&config.effective_month) {
        errors.push(ConfigurationError::MissingEffectiveMonth);
    }
    if config.effective_from.trim().is_empty() {
        errors.push(ConfigurationError::MissingEffectiveFrom);
    }
    if config.duration_days == 0 {
        errors.push(ConfigurationError::MissingDuration);
    }
    let shift_count_valid = (MIN_SHIFT_COUNT..=MAX_SHIFT_COUNT).contains(&config.shift_count);
    let cycle_length_valid =
        (MIN_SHIFT_COUNT..=MAX_SHIFT_COUNT).contains(&config.shift_cycle_length);
    if !shift_count_valid {
        errors.push(ConfigurationError::InvalidShiftCount);
    }
    if !cycle_length_valid {
        errors.push(ConfigurationError::InvalidCycleLength);
    }
    if shift_count_valid && cycle_length_valid && config.shift_count != config.shift_cycle_length {
        errors.push(ConfigurationError::CycleLengthMismatch);
    }
    if !ALLOWED_PERIODS_OF_DUTY.contains(&config.periods_of_duty) {
        errors.push(ConfigurationError::InvalidPeriodsOfDuty);
    }
}

fn check_shifts_and_cycle(
    config: &RosterConfig,
    shifts: &[Shift],
    timings: &[DutyTiming],
    cycle: &[CycleEntry],
    errors: &mut Vec<ConfigurationError>,
) {
    if shifts.len() as u32 != config.shift_count {
        errors.push(ConfigurationError::ShiftRowCountMismatch);
    }
    if shifts.iter().any(|shift| shift.code.trim().is_empty()) {
        errors.push(ConfigurationError::MissingShiftCode);
    }
    let mut codes: Vec<&str> = shifts.iter().map(|shift| shift.code.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    if codes.len() != shifts.len() {
        errors.push(ConfigurationError::DuplicateShiftCodes);
    }

    if ALLOWED_PERIODS_OF_DUTY.contains(&config.periods_of_duty)
        && timings.len() as u32 != config.periods_of_duty
    {
        errors.push(ConfigurationError::TimingCountMismatch {
            expected: config.periods_of_duty,
        });
    }
    if timings.iter().any(|timing| timing.label.trim().is_empty()) {
        errors.push(ConfigurationError::MissingTimingLabel);
    }
    if timings
        .iter()
        .any(|timing| timing.start_time.is_empty() || timing.end_time.is_empty())
    {
        errors.push(ConfigurationError::MissingTimingTimes);
    }

    if cycle.len() as u32 != config.shift_cycle_length {
        errors.push(ConfigurationError::CycleTemplateLengthMismatch);
    }
    if !cycle.iter().any(CycleEntry::is_timing) {
        errors.push(ConfigurationError::CycleTemplateWithoutTiming);
    }
}

fn check_unit_selection(
    units: &[String],
    catalog: &UnitCatalog,
    errors: &mut Vec<ConfigurationError>,
) {
    if units.is_empty() {
        errors.push(ConfigurationError::NoUnitsSelected);
    }
    for key in units {
        if !catalog.contains(key) {
            errors.push(ConfigurationError::UnknownUnit { key: key.clone() });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BUILTIN_CATALOG;
    use crate::cycle::build_cycle;

    fn timings(count: usize) -> Vec<DutyTiming> {
        (0..count)
            .map(|index| {
                DutyTiming::new(
                    DutyTiming::fallback_id(index),
                    format!("Timing {}", index + 1),
                    index as u32 + 1,
                    "08:00",
                    "14:00",
                )
            })
            .collect()
    }

    fn valid_config() -> (RosterConfig, Vec<Shift>, Vec<DutyTiming>, Vec<CycleEntry>, Vec<String>) {
        let config = RosterConfig {
            title: "March roster".into(),
            effective_year: 2026,
            effective_month: 3,
            effective_from: "2026-03-01".into(),
            shift_count: 3,
            shift_cycle_length: 3,
            duration_days: 28,
            periods_of_duty: 3,
            ..RosterConfig::default()
        };
        let shifts = vec![
            Shift::new("A", "Team A", 1),
            Shift::new("B", "Team B", 2),
            Shift::new("C", "Team C", 3),
        ];
        let timings = timings(3);
        let cycle = build_cycle(3, &timings);
        (config, shifts, timings, cycle, vec!["aerodrome_ri".into()])
    }

    #[test]
    fn a_complete_configuration_passes() {
        let (config, shifts, timings, cycle, units) = valid_config();
        assert!(validate_configuration(&config, &shifts, &timings, &cycle, &units, &BUILTIN_CATALOG)
            .is_ok());
    }

    #[test]
    fn errors_aggregate_across_stages() {
        let (mut config, shifts, timings, cycle, _) = valid_config();
        config.effective_from = String::new();
        let errors =
            validate_configuration(&config, &shifts, &timings, &cycle, &[], &BUILTIN_CATALOG)
                .unwrap_err();
        assert!(errors.contains(&ConfigurationError::MissingEffectiveFrom));
        assert!(errors.contains(&ConfigurationError::NoUnitsSelected));
        assert_eq!(first_invalid_stage(&errors), Some(Stage::Scheduling));
    }

    #[test]
    fn shift_count_and_cycle_length_must_agree() {
        let (mut config, shifts, timings, cycle, units) = valid_config();
        config.shift_cycle_length = 4;
        let errors =
            validate_configuration(&config, &shifts, &timings, &cycle, &units, &BUILTIN_CATALOG)
                .unwrap_err();
        assert!(errors.contains(&ConfigurationError::CycleLengthMismatch));
        // The 3-entry cycle no longer matches the declared length either.
        assert!(errors.contains(&ConfigurationError::CycleTemplateLengthMismatch));
    }

    #[test]
    fn duplicate_shift_codes_are_rejected() {
        let (config, mut shifts, timings, cycle, units) = valid_config();
        shifts[2] = Shift::new("A", "Team C", 3);
        let errors = validate_stage(
            Stage::ShiftsAndCycle,
            &config,
            &shifts,
            &timings,
            &cycle,
            &units,
            &BUILTIN_CATALOG,
        )
        .unwrap_err();
        assert_eq!(errors, vec![ConfigurationError::DuplicateShiftCodes]);
    }

    #[test]
    fn timing_count_must_match_periods_of_duty() {
        let (mut config, shifts, _, cycle, units) = valid_config();
        config.periods_of_duty = 2;
        let errors = validate_configuration(
            &config,
            &shifts,
            &timings(3),
            &cycle,
            &units,
            &BUILTIN_CATALOG,
        )
        .unwrap_err();
        assert!(errors.contains(&ConfigurationError::TimingCountMismatch { expected: 2 }));
    }

    #[test]
    fn unknown_unit_keys_are_flagged_at_the_unit_stage() {
        let (config, shifts, timings, cycle, _) = valid_config();
        let units = vec!["aerodrome_ri".to_string(), "no_such_unit".to_string()];
        let errors =
            validate_configuration(&config, &shifts, &timings, &cycle, &units, &BUILTIN_CATALOG)
                .unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigurationError::UnknownUnit {
                key: "no_such_unit".into()
            }]
        );
        assert_eq!(first_invalid_stage(&errors), Some(Stage::UnitSelection));
    }
}
