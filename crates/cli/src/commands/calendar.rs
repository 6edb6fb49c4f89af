use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rota_core::load_document;

/// Print the resolved duty calendar of a roster document
#[derive(Debug, Parser)]
pub struct CalendarCommand {
    /// Path to the roster document (.json or .yaml)
    #[arg(value_name = "ROSTER")]
    pub roster_path: PathBuf,
}

impl CalendarCommand {
    pub fn execute(&self) -> Result<i32> {
        let document = super::load_roster_document(&self.roster_path)?;
        let draft = load_document(&document);

        if draft.days().is_empty() {
            eprintln!("{}: no roster days resolved", self.roster_path.display());
            return Ok(1);
        }

        let rows = render_calendar(&draft);
        for row in rows {
            println!("{row}");
        }
        Ok(0)
    }
}

/// Lays out the calendar as one line per day: the date followed by the shift
/// on duty for each timing, `-` where no shift covers it.
fn render_calendar(draft: &rota_core::RosterDraft) -> Vec<String> {
    let mut lines = Vec::with_capacity(draft.days().len() + 1);

    let mut header = format!("{:<12}", "date");
    for timing in draft.timings() {
        header.push_str(&format!("{:<14}", timing.label));
    }
    lines.push(header.trim_end().to_string());

    for day in draft.days() {
        let mut line = format!("{:<12}", day.date);
        for timing in draft.timings() {
            let code = draft
                .rotation()
                .shift_for_timing(day.sequence, &timing.id, draft.shifts())
                .map(|shift| shift.code.as_str())
                .unwrap_or("-");
            line.push_str(&format!("{code:<14}"));
        }
        lines.push(line.trim_end().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_core::cycle::build_cycle;
    use rota_core::draft::RosterDraft;
    use rota_core::model::{DutyTiming, RosterConfig, Shift};

    #[test]
    fn calendar_rows_show_the_rotating_shifts() {
        let config = RosterConfig {
            title: "Test roster".into(),
            effective_year: 2026,
            effective_month: 3,
            effective_from: "2026-03-01".into(),
            shift_count: 3,
            shift_cycle_length: 3,
            duration_days: 3,
            periods_of_duty: 2,
            ..RosterConfig::default()
        };
        let shifts = vec![
            Shift::new("A", "Team A", 1),
            Shift::new("B", "Team B", 2),
            Shift::new("C", "Team C", 3),
        ];
        let timings = vec![
            DutyTiming::new("timing-1", "Morning", 1, "08:00", "14:00"),
            DutyTiming::new("timing-2", "Night", 2, "14:00", "20:00"),
        ];
        let cycle = build_cycle(3, &timings);
        let draft = RosterDraft::new(config, shifts, timings, cycle, vec!["aerodrome_ri".into()]);

        let rows = render_calendar(&draft);
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("date"));
        // Day 1: shift A holds Morning, shift B holds Night.
        assert!(rows[1].starts_with("2026-03-01"));
        assert!(rows[1].contains('A'));
        assert!(rows[1].contains('B'));
        // Day 2 rotates: C takes Morning, A takes Night.
        let day_two: Vec<&str> = rows[2].split_whitespace().collect();
        assert_eq!(day_two, vec!["2026-03-02", "C", "A"]);
    }
}
