use serde::{Deserialize, Serialize};

pub const REST_LABEL: &str = "Sleep Recovery";
pub const OFF_LABEL: &str = "Off Day";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CycleKind {
    Timing,
    Rest,
    Off,
}

/// One position in the repeating cycle template. A `Timing` entry binds a
/// duty timing by id; `Rest` and `Off` carry only a display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleEntry {
    pub sequence: u32,
    #[serde(rename = "type")]
    pub kind: CycleKind,
    #[serde(default)]
    pub timing_id: String,
    #[serde(default)]
    pub label: String,
}

impl CycleEntry {
    pub fn timing(sequence: u32, timing_id: impl Into<String>) -> Self {
        Self {
            sequence,
            kind: CycleKind::Timing,
            timing_id: timing_id.into(),
            label: String::new(),
        }
    }

    pub fn rest(sequence: u32) -> Self {
        Self {
            sequence,
            kind: CycleKind::Rest,
            timing_id: String::new(),
            label: REST_LABEL.to_string(),
        }
    }

    pub fn off(sequence: u32) -> Self {
        Self {
            sequence,
            kind: CycleKind::Off,
            timing_id: String::new(),
            label: OFF_LABEL.to_string(),
        }
    }

    pub fn is_timing(&self) -> bool {
        self.kind == CycleKind::Timing
    }

    /// Display label, falling back to the kind's default.
    pub fn display_label(&self) -> &str {
        if !self.label.is_empty() {
            return &self.label;
        }
        match self.kind {
            CycleKind::Rest => REST_LABEL,
            _ => OFF_LABEL,
        }
    }
}
