mod assignment;
mod config;
mod cycle_entry;
mod day;
mod officer;
mod shift;
mod unit;

pub use assignment::{dedupe_officers, AssignmentEntry};
pub use config::{
    normalize_periods_of_duty, normalize_shift_count, RosterConfig, ALLOWED_PERIODS_OF_DUTY,
    MAX_SHIFT_COUNT, MIN_SHIFT_COUNT,
};
pub use cycle_entry::{CycleEntry, CycleKind, OFF_LABEL, REST_LABEL};
pub use day::{build_days, Day};
pub use officer::{Officer, LEADERSHIP_RATINGS, RATING_CATEGORIES};
pub use shift::{
    normalize_time, order_by_sequence, DutyTiming, Shift, DEFAULT_SHIFT_CODES,
    DEFAULT_TIMING_LABELS,
};
pub use unit::{Unit, UnitCategory};
