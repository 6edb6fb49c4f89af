use std::collections::HashMap;

use lazy_static::lazy_static;
use thiserror::Error;

use crate::model::{Unit, UnitCategory};

/// Form number stamped on published duty rosters.
pub const ROSTER_FORM_NUMBER: &str = "PAAF-100-OPAT-1.0";

/// Display order for non-operational units; unlisted keys sort after these,
/// alphabetically by label.
pub const NON_OPERATIONAL_PRIORITY: [&str; 15] = [
    "chief_operations_officer",
    "satco",
    "radar_facility_chief",
    "facility_training_officer",
    "oic_tower",
    "oic_ats_revenue",
    "aiso",
    "oic_rescue_coordination_center",
    "mission_coordinator_rcc_rsc",
    "oic_rescue_sub_center",
    "oic_simulator",
    "safety_manager_ans",
    "investigation_officer",
    "officers_on_course",
    "officers_on_leave",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown roster unit key: {key}")]
    UnknownUnit { key: String },
}

/// Immutable lookup table of duty units, preserving input order.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: Vec<Unit>,
    index: HashMap<String, usize>,
}

impl UnitCatalog {
    pub fn from_units(units: Vec<Unit>) -> Self {
        let index = units
            .iter()
            .enumerate()
            .map(|(position, unit)| (unit.key.clone(), position))
            .collect();
        Self { units, index }
    }

    pub fn get(&self, key: &str) -> Result<&Unit, CatalogError> {
        self.index
            .get(key)
            .map(|position| &self.units[*position])
            .ok_or_else(|| CatalogError::UnknownUnit {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn operational(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.is_operational())
    }

    /// Non-operational units in roster display order.
    pub fn non_operational_ordered(&self) -> Vec<&Unit> {
        let priority: HashMap<&str, usize> = NON_OPERATIONAL_PRIORITY
            .iter()
            .enumerate()
            .map(|(position, key)| (*key, position))
            .collect();
        let mut units: Vec<&Unit> = self
            .units
            .iter()
            .filter(|unit| !unit.is_operational())
            .collect();
        units.sort_by(|left, right| {
            let left_rank = priority
                .get(left.key.as_str())
                .copied()
                .unwrap_or(NON_OPERATIONAL_PRIORITY.len());
            let right_rank = priority
                .get(right.key.as_str())
                .copied()
                .unwrap_or(NON_OPERATIONAL_PRIORITY.len());
            left_rank
                .cmp(&right_rank)
                .then_with(|| left.label.cmp(&right.label))
        });
        units
    }
}

fn operational(key: &str, label: &str, rating_codes: &[&str]) -> Unit {
    Unit {
        key: key.to_string(),
        label: label.to_string(),
        category: UnitCategory::Operational,
        rating_codes: rating_codes.iter().map(|code| code.to_string()).collect(),
        ..Unit::default()
    }
}

fn operational_multi(key: &str, label: &str) -> Unit {
    Unit {
        allows_multiple: true,
        ..operational(key, label, &[])
    }
}

fn non_operational(key: &str, label: &str) -> Unit {
    Unit {
        key: key.to_string(),
        label: label.to_string(),
        category: UnitCategory::NonOperational,
        ..Unit::default()
    }
}

fn non_operational_overlap(key: &str, label: &str) -> Unit {
    Unit {
        allows_operational_overlap: true,
        ..non_operational(key, label)
    }
}

fn non_operational_personnel(key: &str, label: &str) -> Unit {
    Unit {
        allows_multiple_personnel: true,
        ..non_operational(key, label)
    }
}

lazy_static! {
    /// Built-in air traffic services unit table.
    pub static ref BUILTIN_CATALOG: UnitCatalog = UnitCatalog::from_units(vec![
        operational("aerodrome_ri", "Aerodrome (RI)", &["RI"]),
        operational("aerodrome_approach_ri_riv", "Aerodrome/Approach (RI/RIV)", &["RI", "RIV"]),
        operational("ground_movement_control_ri", "Ground Movement Control (RI)", &["RI"]),
        operational_multi("bay_planning_unit", "Bay Planning Unit"),
        operational("ground_movement_control_north_ri", "Ground Movement Control North (RI)", &["RI"]),
        operational("approach_control_procedural_riv", "Approach Control Procedural (RIV)", &["RIV"]),
        operational("approach_control_surveillance_rv", "Approach Control Surveillance (RV)", &["RV"]),
        operational_multi("approach_coordinator", "Approach Coordinator"),
        operational("area_procedural_sa_rii", "Area Procedural-SA (RII)", &["RII"]),
        operational("area_surveillance_sa_riii", "Area Surveillance-SA (RIII)", &["RIII"]),
        operational("area_procedural_n_rii", "Area Procedural-N (RII)", &["RII"]),
        operational("area_procedural_s_rii", "Area Procedural-S (RII)", &["RII"]),
        operational("area_procedural_w_rii", "Area Procedural-W (RII)", &["RII"]),
        operational("area_procedural_e_rii", "Area Procedural-E (RII)", &["RII"]),
        operational("area_surveillance_n_riii", "Area Surveillance-N (RIII)", &["RIII"]),
        operational("area_surveillance_s_riii", "Area Surveillance-S (RIII)", &["RIII"]),
        operational("area_surveillance_w_riii", "Area Surveillance-W (RIII)", &["RIII"]),
        operational("area_surveillance_e_riii", "Area Surveillance-E (RIII)", &["RIII"]),
        operational_multi("chief_ats_officer", "Chief ATS Officer"),
        operational("pfiu_officer", "PFIU officer", &[]),
        operational("cherat_approach_south", "Cherat Approach South", &[]),
        operational("rest_controller", "Rest Controller", &[]),
        operational("leave_reserve", "Leave Reserve", &[]),
        operational_multi("on_job_training_instructor", "On Job Training Instructor"),
        operational_multi("ojt_deployment", "OJT deployment"),
        non_operational_overlap("safety_manager_ans", "ANS Safety Manager"),
        non_operational_overlap("facility_training_officer", "FTO"),
        non_operational("aiso", "AISO"),
        non_operational("oic_ats_revenue", "O/IC ATS Revenue"),
        non_operational("oic_rescue_coordination_center", "O/IC Rescue Coordination Center"),
        non_operational("oic_rescue_sub_center", "O/IC Rescue Sub Center"),
        non_operational_personnel("mission_coordinator_rcc_rsc", "Mission Coordinator Officer RCC/RSC"),
        non_operational_personnel("aocc_supervisor", "AOCC Supervisor"),
        non_operational("oic_aocc", "O/IC AOCC"),
        non_operational("chief_operations_officer", "COO"),
        non_operational("satco", "SATCO"),
        non_operational("sato_single_officer", "SATO (single officer)"),
        non_operational("radar_facility_chief", "RFC"),
        non_operational_personnel("officers_on_leave", "Officers on leave"),
        non_operational_personnel("officers_on_course", "Officers on Course / Meeting"),
        non_operational_overlap("oic_tower", "O/IC Tower"),
        non_operational_overlap("oic_simulator", "O/IC Simulator"),
        non_operational_overlap("investigation_officer", "Investigation Officer"),
    ]);
}
