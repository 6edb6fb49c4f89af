//! Team deployment board: drag-driven assignment of officers to (shift,
//! unit) cells, enforcing rating and duplication constraints.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::catalog::{CatalogError, UnitCatalog};
use crate::draft::RosterDraft;
use crate::model::Officer;

/// One board cell, addressed by shift and unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    pub shift_code: String,
    pub unit_key: String,
}

impl CellRef {
    pub fn new(shift_code: impl Into<String>, unit_key: impl Into<String>) -> Self {
        Self {
            shift_code: shift_code.into(),
            unit_key: unit_key.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DragOrigin {
    Panel,
    Cell(CellRef),
}

#[derive(Debug, Clone)]
struct Drag {
    officer_id: String,
    origin: DragOrigin,
    duplicate: bool,
}

/// A drop rejected by a deployment rule. The messages are surfaced to the
/// operator verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstraintViolation {
    #[error("{officer} cannot be assigned: requires rating {}", required.join(", "))]
    MissingRating { officer: String, required: Vec<String> },
    #[error("only officers rated RIV or RV can be duplicated")]
    DuplicationNotPermitted,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("unknown officer id: {id}")]
    UnknownOfficer { id: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Violation(#[from] ConstraintViolation),
}

/// What a completed drop did to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Applied,
    NoOp,
}

/// Board state: the officer directory, the unit catalog and the drag in
/// flight. Mutations are applied to the [`RosterDraft`] passed in, so the
/// draft stays the single owner of assignment state.
#[derive(Debug, Clone)]
pub struct DeploymentBoard {
    catalog: UnitCatalog,
    officers: BTreeMap<String, Officer>,
    drag: Option<Drag>,
}

impl DeploymentBoard {
    pub fn new(catalog: UnitCatalog, officers: Vec<Officer>) -> Self {
        let officers = officers
            .into_iter()
            .map(|officer| (officer.id.clone(), officer.normalized()))
            .collect();
        Self {
            catalog,
            officers,
            drag: None,
        }
    }

    pub fn officer(&self, officer_id: &str) -> Option<&Officer> {
        self.officers.get(officer_id)
    }

    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    /// Panel listing for one rating-category filter, ordered by name.
    pub fn officers_in_category(&self, category: &str) -> Vec<&Officer> {
        let mut matching: Vec<&Officer> = self
            .officers
            .values()
            .filter(|officer| officer.matches_category(category))
            .collect();
        matching.sort_by(|left, right| left.name.cmp(&right.name));
        matching
    }

    /// Starts a drag from the officer panel. A duplication request is only
    /// honored for officers holding a leadership rating.
    pub fn begin_drag_from_panel(
        &mut self,
        officer_id: &str,
        duplicate_requested: bool,
    ) -> Result<(), BoardError> {
        self.begin_drag(officer_id, DragOrigin::Panel, duplicate_requested)
    }

    /// Starts a drag of an officer chip already placed in a cell.
    pub fn begin_drag_from_cell(
        &mut self,
        officer_id: &str,
        origin: CellRef,
        duplicate_requested: bool,
    ) -> Result<(), BoardError> {
        self.begin_drag(officer_id, DragOrigin::Cell(origin), duplicate_requested)
    }

    fn begin_drag(
        &mut self,
        officer_id: &str,
        origin: DragOrigin,
        duplicate_requested: bool,
    ) -> Result<(), BoardError> {
        let officer = self
            .officers
            .get(officer_id)
            .ok_or_else(|| BoardError::UnknownOfficer {
                id: officer_id.to_string(),
            })?;
        self.drag = Some(Drag {
            officer_id: officer_id.to_string(),
            origin,
            duplicate: duplicate_requested && officer.has_leadership_rating(),
        });
        Ok(())
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Completes the drag in flight onto `target`. The drag is consumed
    /// whether or not the drop applies. A move (non-duplicating drop from
    /// another cell) removes the officer from the origin cell and re-applies
    /// its deployment.
    pub fn drop_on(
        &mut self,
        draft: &mut RosterDraft,
        target: CellRef,
        duplicate_modifier: bool,
    ) -> Result<DropOutcome, BoardError> {
        let Some(drag) = self.drag.take() else {
            return Ok(DropOutcome::NoOp);
        };
        let officer =
            self.officers
                .get(&drag.officer_id)
                .ok_or_else(|| BoardError::UnknownOfficer {
                    id: drag.officer_id.clone(),
                })?;
        let unit = self.catalog.get(&target.unit_key)?;

        let origin_cell = match &drag.origin {
            DragOrigin::Cell(cell) => Some(cell.clone()),
            DragOrigin::Panel => None,
        };
        let duplicate_requested = drag.duplicate || duplicate_modifier;

        if origin_cell.as_ref() == Some(&target) && !duplicate_requested {
            return Ok(DropOutcome::NoOp);
        }
        if unit.requires_rating() && !officer.holds_all_ratings(&unit.rating_codes) {
            return Err(ConstraintViolation::MissingRating {
                officer: officer.display_label(),
                required: unit.rating_codes.clone(),
            }
            .into());
        }
        if duplicate_requested && !officer.has_leadership_rating() {
            return Err(ConstraintViolation::DuplicationNotPermitted.into());
        }

        let allow_multiple = unit.allows_multiple;
        let current = draft.team_assignment(&target.shift_code, &target.unit_key);
        let already_assigned_here = current.iter().any(|id| id == &drag.officer_id);

        if already_assigned_here && !allow_multiple {
            return Ok(DropOutcome::NoOp);
        }
        if already_assigned_here && allow_multiple && !duplicate_requested {
            return Ok(DropOutcome::NoOp);
        }

        let next = if allow_multiple {
            let mut next = current;
            if !already_assigned_here || duplicate_requested {
                next.push(drag.officer_id.clone());
            }
            next
        } else {
            vec![drag.officer_id.clone()]
        };

        if !duplicate_requested {
            if let Some(origin) = origin_cell.filter(|origin| *origin != target) {
                let remaining: Vec<String> = draft
                    .team_assignment(&origin.shift_code, &origin.unit_key)
                    .into_iter()
                    .filter(|id| id != &drag.officer_id)
                    .collect();
                draft.set_team_assignment(&origin.shift_code, &origin.unit_key, remaining);
                draft.apply_team_assignment(&origin.shift_code, &origin.unit_key);
            }
        }

        debug!(
            officer_id = %drag.officer_id,
            shift_code = %target.shift_code,
            unit_key = %target.unit_key,
            "officer deployed to board cell"
        );
        draft.set_team_assignment(&target.shift_code, &target.unit_key, next);
        draft.apply_team_assignment(&target.shift_code, &target.unit_key);
        draft.refresh_manual_flags();
        Ok(DropOutcome::Applied)
    }

    /// Removes one officer from a cell and re-applies that cell's
    /// deployment.
    pub fn remove_officer(&mut self, draft: &mut RosterDraft, cell: &CellRef, officer_id: &str) {
        let remaining: Vec<String> = draft
            .team_assignment(&cell.shift_code, &cell.unit_key)
            .into_iter()
            .filter(|id| id != officer_id)
            .collect();
        draft.set_team_assignment(&cell.shift_code, &cell.unit_key, remaining);
        draft.apply_team_assignment(&cell.shift_code, &cell.unit_key);
        draft.refresh_manual_flags();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BUILTIN_CATALOG;
    use crate::cycle::build_cycle;
    use crate::model::{DutyTiming, RosterConfig, Shift};

    fn draft(units: Vec<String>) -> RosterDraft {
        let config = RosterConfig {
            title: "March roster".into(),
            effective_year: 2026,
            effective_month: 3,
            effective_from: "2026-03-01".into(),
            shift_count: 3,
            shift_cycle_length: 3,
            duration_days: 6,
            periods_of_duty: 2,
            ..RosterConfig::default()
        };
        let shifts = vec![
            Shift::new("A", "Team A", 1),
            Shift::new("B", "Team B", 2),
            Shift::new("C", "Team C", 3),
        ];
        let timings: Vec<DutyTiming> = (0..2)
            .map(|index| {
                DutyTiming::new(
                    DutyTiming::fallback_id(index),
                    format!("Timing {}", index + 1),
                    index as u32 + 1,
                    "08:00",
                    "14:00",
                )
            })
            .collect();
        let cycle = build_cycle(3, &timings);
        RosterDraft::new(config, shifts, timings, cycle, units)
    }

    fn board() -> DeploymentBoard {
        DeploymentBoard::new(
            BUILTIN_CATALOG.clone(),
            vec![
                Officer::new("o1", "A. Khan", "1001", &["RI"]),
                Officer::new("o2", "B. Malik", "1002", &["RIV", "RV"]),
                Officer::new("o3", "C. Raza", "1003", &[]),
            ],
        )
    }

    #[test]
    fn drop_requires_the_unit_rating() {
        let mut draft = draft(vec!["approach_control_procedural_riv".into()]);
        let mut board = board();
        board.begin_drag_from_panel("o1", false).unwrap();
        let error = board
            .drop_on(
                &mut draft,
                CellRef::new("A", "approach_control_procedural_riv"),
                false,
            )
            .unwrap_err();
        assert!(matches!(
            error,
            BoardError::Violation(ConstraintViolation::MissingRating { .. })
        ));
        assert!(draft.team_assignment("A", "approach_control_procedural_riv").is_empty());
    }

    #[test]
    fn duplication_needs_a_leadership_rating() {
        let mut draft = draft(vec!["aerodrome_ri".into()]);
        let mut board = board();
        board.begin_drag_from_panel("o1", false).unwrap();
        let error = board
            .drop_on(&mut draft, CellRef::new("A", "aerodrome_ri"), true)
            .unwrap_err();
        assert_eq!(
            error,
            BoardError::Violation(ConstraintViolation::DuplicationNotPermitted)
        );
    }

    #[test]
    fn drop_writes_through_to_the_assignment_grid() {
        let mut draft = draft(vec!["aerodrome_ri".into()]);
        let mut board = board();
        board.begin_drag_from_panel("o1", false).unwrap();
        let outcome = board
            .drop_on(&mut draft, CellRef::new("A", "aerodrome_ri"), false)
            .unwrap();
        assert_eq!(outcome, DropOutcome::Applied);
        assert_eq!(draft.team_assignment("A", "aerodrome_ri"), vec!["o1".to_string()]);
        assert_eq!(
            draft.entry(1, "A", "aerodrome_ri").map(|e| e.officers.clone()),
            Some(vec!["o1".to_string()])
        );
    }

    #[test]
    fn single_officer_cell_replaces_the_incumbent() {
        let mut draft = draft(vec!["aerodrome_ri".into()]);
        let mut board = board();
        board.begin_drag_from_panel("o1", false).unwrap();
        board
            .drop_on(&mut draft, CellRef::new("A", "aerodrome_ri"), false)
            .unwrap();
        board.begin_drag_from_panel("o2", false).unwrap();
        board
            .drop_on(&mut draft, CellRef::new("A", "aerodrome_ri"), false)
            .unwrap();
        assert_eq!(draft.team_assignment("A", "aerodrome_ri"), vec!["o2".to_string()]);
    }

    #[test]
    fn moving_between_cells_vacates_the_origin() {
        let mut draft = draft(vec!["aerodrome_ri".into()]);
        let mut board = board();
        board.begin_drag_from_panel("o1", false).unwrap();
        board
            .drop_on(&mut draft, CellRef::new("A", "aerodrome_ri"), false)
            .unwrap();

        board
            .begin_drag_from_cell("o1", CellRef::new("A", "aerodrome_ri"), false)
            .unwrap();
        board
            .drop_on(&mut draft, CellRef::new("B", "aerodrome_ri"), false)
            .unwrap();

        assert!(draft.team_assignment("A", "aerodrome_ri").is_empty());
        assert_eq!(draft.team_assignment("B", "aerodrome_ri"), vec!["o1".to_string()]);
    }

    #[test]
    fn leadership_duplicate_keeps_the_origin_cell() {
        let mut draft = draft(vec!["aerodrome_approach_ri_riv".into(), "approach_coordinator".into()]);
        let mut board = board();
        board.begin_drag_from_panel("o2", false).unwrap();
        board
            .drop_on(&mut draft, CellRef::new("A", "approach_coordinator"), false)
            .unwrap();

        board
            .begin_drag_from_cell("o2", CellRef::new("A", "approach_coordinator"), true)
            .unwrap();
        board
            .drop_on(&mut draft, CellRef::new("B", "approach_coordinator"), false)
            .unwrap();

        assert_eq!(draft.team_assignment("A", "approach_coordinator"), vec!["o2".to_string()]);
        assert_eq!(draft.team_assignment("B", "approach_coordinator"), vec!["o2".to_string()]);
    }

    #[test]
    fn dropping_back_on_the_origin_is_a_no_op() {
        let mut draft = draft(vec!["aerodrome_ri".into()]);
        let mut board = board();
        board.begin_drag_from_panel("o1", false).unwrap();
        board
            .drop_on(&mut draft, CellRef::new("A", "aerodrome_ri"), false)
            .unwrap();

        board
            .begin_drag_from_cell("o1", CellRef::new("A", "aerodrome_ri"), false)
            .unwrap();
        let outcome = board
            .drop_on(&mut draft, CellRef::new("A", "aerodrome_ri"), false)
            .unwrap();
        assert_eq!(outcome, DropOutcome::NoOp);
        assert_eq!(draft.team_assignment("A", "aerodrome_ri"), vec!["o1".to_string()]);
    }

    #[test]
    fn category_panel_filters_and_sorts_by_name() {
        let board = board();
        let non_rated = board.officers_in_category("NON_RATED");
        assert_eq!(non_rated.len(), 1);
        assert_eq!(non_rated[0].id, "o3");

        let riv = board.officers_in_category("RIV");
        assert_eq!(riv.len(), 1);
        assert_eq!(riv[0].id, "o2");
    }
}
