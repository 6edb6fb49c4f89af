mod calendar;
mod validate;

pub use calendar::CalendarCommand;
pub use validate::ValidateCommand;

use std::path::Path;

use anyhow::{bail, Context, Result};
use rota_core::RosterDocument;

/// Reads a roster document, picking the parser by file extension.
pub(crate) fn load_roster_document(path: &Path) -> Result<RosterDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or("");
    let document = match extension {
        "json" => serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?,
        other => bail!("unsupported roster file extension {other:?}, expected .json or .yaml"),
    };
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"{
        "title": "Test roster",
        "effective_year": 2026,
        "effective_month": 3,
        "effective_from": "2026-03-01",
        "shift_cycle_length": 3,
        "duration_days": 3,
        "shifts": [
            {"code": "A", "sequence": 1},
            {"code": "B", "sequence": 2},
            {"code": "C", "sequence": 3}
        ],
        "duty_timings": [
            {"sequence": 1, "title": "Morning", "start_time": "08:00:00", "end_time": "14:00:00"},
            {"sequence": 2, "title": "Night", "start_time": "14:00:00", "end_time": "20:00:00"}
        ],
        "units": ["aerodrome_ri"],
        "days": [
            {"sequence": 1, "date": "2026-03-01"},
            {"sequence": 2, "date": "2026-03-02"},
            {"sequence": 3, "date": "2026-03-03"}
        ],
        "assignments": []
    }"#;

    #[test]
    fn loads_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let document = load_roster_document(file.path()).unwrap();
        assert_eq!(document.title, "Test roster");
        assert_eq!(document.shifts.len(), 3);
    }

    #[test]
    fn loads_yaml_by_extension() {
        // YAML is a JSON superset, so the same body parses.
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let document = load_roster_document(file.path()).unwrap();
        assert_eq!(document.days.len(), 3);
    }

    #[test]
    fn rejects_unknown_extensions() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        assert!(load_roster_document(file.path()).is_err());
    }
}
