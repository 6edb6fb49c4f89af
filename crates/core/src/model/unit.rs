use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    #[default]
    Operational,
    NonOperational,
}

/// A duty position to be staffed. Catalog entries are immutable; they are
/// never created or destroyed while a roster is being edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Unit {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub category: UnitCategory,
    #[serde(default)]
    pub rating_codes: Vec<String>,
    /// Unit may appear with more than one officer in a single duty cell.
    #[serde(default)]
    pub allows_multiple: bool,
    /// Non-operational unit staffed by a list of officers rather than one.
    #[serde(default)]
    pub allows_multiple_personnel: bool,
    /// Holder may also carry operational roster duties.
    #[serde(default)]
    pub allows_operational_overlap: bool,
}

impl Unit {
    pub fn requires_rating(&self) -> bool {
        !self.rating_codes.is_empty()
    }

    pub fn is_operational(&self) -> bool {
        self.category == UnitCategory::Operational
    }

    /// At most one officer unless one of the multiplicity flags is set.
    pub fn allows_multiple_officers(&self) -> bool {
        self.allows_multiple || self.allows_multiple_personnel
    }
}
