use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rota_core::catalog::BUILTIN_CATALOG;
use rota_core::load_document;
use rota_core::validation::{first_invalid_stage, validate_configuration, Stage};

/// Validate a saved roster document
#[derive(Debug, Parser)]
pub struct ValidateCommand {
    /// Path to the roster document (.json or .yaml)
    #[arg(value_name = "ROSTER")]
    pub roster_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(&self) -> Result<i32> {
        let document = super::load_roster_document(&self.roster_path)?;
        let draft = load_document(&document);

        match validate_configuration(
            draft.config(),
            draft.shifts(),
            draft.timings(),
            draft.cycle(),
            draft.units(),
            &BUILTIN_CATALOG,
        ) {
            Ok(()) => {
                println!(
                    "{}: ok ({} days, {} shifts, {} units)",
                    self.roster_path.display(),
                    draft.days().len(),
                    draft.shifts().len(),
                    draft.units().len()
                );
                Ok(0)
            }
            Err(errors) => {
                for error in &errors {
                    eprintln!("error: {error}");
                }
                if let Some(stage) = first_invalid_stage(&errors) {
                    eprintln!("fix from: {}", stage_label(stage));
                }
                Ok(1)
            }
        }
    }
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Scheduling => "step 1 (scheduling)",
        Stage::ShiftsAndCycle => "step 2 (shifts and cycle)",
        Stage::UnitSelection => "step 3 (unit selection)",
    }
}
