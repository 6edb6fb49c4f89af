use serde::{Deserialize, Serialize};

/// Rating codes that permit an officer to hold more than one duty cell.
pub const LEADERSHIP_RATINGS: [&str; 2] = ["RIV", "RV"];

/// Rating categories used to group officers on the deployment board.
pub const RATING_CATEGORIES: [&str; 6] = ["RI", "RII", "RIII", "RIV", "RV", "NON_RATED"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Officer {
    pub id: String,
    pub name: String,
    #[serde(rename = "service_no")]
    pub service_number: String,
    #[serde(default)]
    pub ratings: Vec<String>,
}

impl Officer {
    /// Builds an officer record from externally supplied fields, normalizing
    /// rating codes to trimmed uppercase and dropping empties.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        service_number: impl Into<String>,
        ratings: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            service_number: service_number.into(),
            ratings: normalize_ratings(ratings.iter().map(|code| code.to_string())),
        }
    }

    /// Re-applies rating normalization after deserializing from an external
    /// directory record.
    pub fn normalized(mut self) -> Self {
        self.ratings = normalize_ratings(self.ratings.into_iter());
        self
    }

    pub fn has_rating(&self, code: &str) -> bool {
        self.ratings.iter().any(|rating| rating == code)
    }

    /// True when the officer holds every one of the required codes.
    pub fn holds_all_ratings(&self, required: &[String]) -> bool {
        required.iter().all(|code| self.has_rating(code))
    }

    pub fn has_leadership_rating(&self) -> bool {
        LEADERSHIP_RATINGS.iter().any(|code| self.has_rating(code))
    }

    /// Category filter used by the deployment board panel; `NON_RATED`
    /// matches officers with no rating at all.
    pub fn matches_category(&self, category: &str) -> bool {
        if category == "NON_RATED" {
            return self.ratings.is_empty();
        }
        self.has_rating(category)
    }

    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.service_number)
    }
}

fn normalize_ratings(raw: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for code in raw {
        let code = code.trim().to_uppercase();
        if !code.is_empty() && !seen.contains(&code) {
            seen.push(code);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_are_normalized_on_construction() {
        let officer = Officer::new("o1", "A. Khan", "1001", &[" ri ", "RIV", "", "ri"]);
        assert_eq!(officer.ratings, vec!["RI", "RIV"]);
    }

    #[test]
    fn leadership_requires_riv_or_rv() {
        let junior = Officer::new("o1", "A", "1", &["RI", "RII"]);
        let senior = Officer::new("o2", "B", "2", &["RV"]);
        assert!(!junior.has_leadership_rating());
        assert!(senior.has_leadership_rating());
    }

    #[test]
    fn non_rated_category_matches_unrated_officers_only() {
        let unrated = Officer::new("o1", "A", "1", &[]);
        let rated = Officer::new("o2", "B", "2", &["RI"]);
        assert!(unrated.matches_category("NON_RATED"));
        assert!(!rated.matches_category("NON_RATED"));
        assert!(rated.matches_category("RI"));
    }
}
