use serde::{Deserialize, Serialize};

pub const ALLOWED_PERIODS_OF_DUTY: [u32; 2] = [2, 3];
pub const MIN_SHIFT_COUNT: u32 = 3;
pub const MAX_SHIFT_COUNT: u32 = 6;

/// Captured scheduling parameters for one roster draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    pub effective_year: i32,
    pub effective_month: u32,
    pub effective_from: String,
    pub shift_count: u32,
    pub shift_cycle_length: u32,
    pub duration_days: u32,
    pub periods_of_duty: u32,
    #[serde(default)]
    pub developed_by: Option<String>,
    #[serde(default)]
    pub verified_by: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
}

/// Clamps a requested shift count into the supported 3..=6 range; zero means
/// the value was absent or unparseable.
pub fn normalize_shift_count(raw: Option<u32>) -> u32 {
    match raw {
        None | Some(0) => 0,
        Some(value) => value.clamp(MIN_SHIFT_COUNT, MAX_SHIFT_COUNT),
    }
}

/// Coerces a periods-of-duty value into the allowed set, defaulting to the
/// largest allowed value.
pub fn normalize_periods_of_duty(raw: Option<u32>) -> u32 {
    match raw {
        Some(value) if ALLOWED_PERIODS_OF_DUTY.contains(&value) => value,
        _ => ALLOWED_PERIODS_OF_DUTY[ALLOWED_PERIODS_OF_DUTY.len() - 1],
    }
}
