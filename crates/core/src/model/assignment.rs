use serde::{Deserialize, Serialize};

/// Officers and remarks held by one (day, shift, unit) duty cell. An entry
/// exists only where the rotation resolves to a duty timing. `is_manual`
/// freezes the entry against template-day propagation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignmentEntry {
    #[serde(default)]
    pub officers: Vec<String>,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub is_manual: bool,
}

impl AssignmentEntry {
    pub fn is_empty(&self) -> bool {
        self.officers.is_empty() && self.remarks.is_empty()
    }

    /// Officer-list equality as sorted multisets; order is display-only.
    pub fn officers_match(&self, other: &AssignmentEntry) -> bool {
        let mut left = self.officers.clone();
        let mut right = other.officers.clone();
        left.sort();
        right.sort();
        left == right
    }
}

/// Appends unseen ids while preserving first-seen order.
pub fn dedupe_officers(officers: Vec<String>) -> Vec<String> {
    let mut deduped: Vec<String> = Vec::with_capacity(officers.len());
    for officer in officers {
        if !officer.is_empty() && !deduped.contains(&officer) {
            deduped.push(officer);
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn officer_match_ignores_order() {
        let left = AssignmentEntry {
            officers: vec!["a".into(), "b".into()],
            ..AssignmentEntry::default()
        };
        let right = AssignmentEntry {
            officers: vec!["b".into(), "a".into()],
            ..AssignmentEntry::default()
        };
        assert!(left.officers_match(&right));
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let deduped = dedupe_officers(vec!["a".into(), "b".into(), "a".into(), String::new()]);
        assert_eq!(deduped, vec!["a".to_string(), "b".to_string()]);
    }
}
