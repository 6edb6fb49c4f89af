// Shared fixtures for the integration suites.

use rota_core::catalog::BUILTIN_CATALOG;
use rota_core::cycle::build_cycle;
use rota_core::draft::RosterDraft;
use rota_core::model::{DutyTiming, Officer, RosterConfig, Shift};
use rota_core::DeploymentBoard;

pub fn march_config(periods_of_duty: u32, shift_count: u32) -> RosterConfig {
    RosterConfig {
        title: "ATS duty roster March 2026".to_string(),
        location: Some("loc-karachi".to_string()),
        effective_year: 2026,
        effective_month: 3,
        effective_from: "2026-03-01".to_string(),
        shift_count,
        shift_cycle_length: shift_count,
        duration_days: 9,
        periods_of_duty,
        developed_by: Some("S/L Ahmed".to_string()),
        verified_by: None,
        approved_by: None,
    }
}

pub fn shifts(count: u32) -> Vec<Shift> {
    const CODES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];
    (0..count as usize)
        .map(|index| Shift::new(CODES[index], format!("Team {}", CODES[index]), index as u32 + 1))
        .collect()
}

pub fn timings(count: usize) -> Vec<DutyTiming> {
    const LABELS: [&str; 3] = ["Morning", "Afternoon", "Night"];
    (0..count)
        .map(|index| {
            DutyTiming::new(
                DutyTiming::fallback_id(index),
                LABELS[index % LABELS.len()],
                index as u32 + 1,
                "08:00",
                "14:00",
            )
        })
        .collect()
}

/// Three shifts, two duty periods, nine days, one rated unit selected.
pub fn two_period_draft(units: Vec<String>) -> RosterDraft {
    let timing_rows = timings(2);
    let cycle = build_cycle(3, &timing_rows);
    RosterDraft::new(march_config(2, 3), shifts(3), timing_rows, cycle, units)
}

/// Four shifts, three duty periods, nine days.
pub fn three_period_draft(units: Vec<String>) -> RosterDraft {
    let timing_rows = timings(3);
    let cycle = build_cycle(4, &timing_rows);
    RosterDraft::new(march_config(3, 4), shifts(4), timing_rows, cycle, units)
}

pub fn board_with_directory() -> DeploymentBoard {
    DeploymentBoard::new(
        BUILTIN_CATALOG.clone(),
        vec![
            Officer::new("o-khan", "A. Khan", "1001", &["RI"]),
            Officer::new("o-malik", "B. Malik", "1002", &["RI", "RIV"]),
            Officer::new("o-raza", "C. Raza", "1003", &["RV"]),
            Officer::new("o-dar", "D. Dar", "1004", &[]),
        ],
    )
}
