use serde::{Deserialize, Serialize};

/// Shift codes assigned to teams when none are supplied.
pub const DEFAULT_SHIFT_CODES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Timing labels used to seed a fresh configuration.
pub const DEFAULT_TIMING_LABELS: [&str; 3] = ["Morning", "Afternoon", "Night"];

/// One rotating team. The sequence determines the team's rotation offset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shift {
    pub code: String,
    #[serde(default)]
    pub title: String,
    pub sequence: u32,
}

impl Shift {
    pub fn new(code: impl Into<String>, title: impl Into<String>, sequence: u32) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            sequence,
        }
    }
}

/// A named period within a day (e.g. Morning) that officers are assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DutyTiming {
    pub id: String,
    pub label: String,
    pub sequence: u32,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl DutyTiming {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        sequence: u32,
        start_time: &str,
        end_time: &str,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sequence,
            start_time: normalize_time(start_time),
            end_time: normalize_time(end_time),
        }
    }

    /// Id given to the timing at position `index` when none was persisted.
    pub fn fallback_id(index: usize) -> String {
        format!("timing-{}", index + 1)
    }
}

/// Widens `HH:MM` values to the `HH:MM:SS` form the roster document carries.
pub fn normalize_time(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.len() == 5 && trimmed.as_bytes()[2] == b':' {
        return format!("{trimmed}:00");
    }
    trimmed.to_string()
}

/// Returns the shifts ordered by rotation sequence.
pub fn order_by_sequence(shifts: &[Shift]) -> Vec<Shift> {
    let mut ordered = shifts.to_vec();
    ordered.sort_by_key(|shift| shift.sequence);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_times_are_widened() {
        assert_eq!(normalize_time("07:30"), "07:30:00");
        assert_eq!(normalize_time("07:30:00"), "07:30:00");
        assert_eq!(normalize_time(""), "");
    }

    #[test]
    fn ordering_follows_sequence_not_input_order() {
        let shifts = vec![Shift::new("B", "", 2), Shift::new("A", "", 1)];
        let ordered = order_by_sequence(&shifts);
        assert_eq!(ordered[0].code, "A");
        assert_eq!(ordered[1].code, "B");
    }
}
