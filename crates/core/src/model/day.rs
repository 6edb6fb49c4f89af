use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A dated roster day. Sequences start at 1 and are contiguous.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Day {
    pub sequence: u32,
    pub date: String,
}

/// Derives the roster day list from the effective month, the start date and
/// the requested duration. Returns an empty list when the start date does not
/// fall inside the effective month; the day list is truncated at the last
/// calendar day of that month.
pub fn build_days(
    effective_year: i32,
    effective_month: u32,
    effective_from: &str,
    duration_days: u32,
) -> Vec<Day> {
    if duration_days == 0 {
        return Vec::new();
    }
    let Ok(start) = NaiveDate::parse_from_str(effective_from, "%Y-%m-%d") else {
        return Vec::new();
    };
    if start.year() != effective_year || start.month() != effective_month {
        return Vec::new();
    }
    let Some(last_day) = last_day_of_month(effective_year, effective_month) else {
        return Vec::new();
    };

    let mut days = Vec::new();
    for offset in 0..duration_days {
        let day_of_month = start.day() + offset;
        if day_of_month > last_day {
            break;
        }
        let Some(date) = NaiveDate::from_ymd_opt(effective_year, effective_month, day_of_month)
        else {
            break;
        };
        days.push(Day {
            sequence: offset + 1,
            date: date.format("%Y-%m-%d").to_string(),
        });
    }
    days
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(first_of_next.pred_opt()?.day())
}
