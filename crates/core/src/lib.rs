pub mod board;
pub mod catalog;
pub mod cycle;
pub mod document;
pub mod draft;
pub mod error;
pub mod model;
pub mod rotation;
pub mod search;
pub mod validation;

pub use board::{BoardError, CellRef, ConstraintViolation, DeploymentBoard, DropOutcome};
pub use catalog::{CatalogError, UnitCatalog, BUILTIN_CATALOG, ROSTER_FORM_NUMBER};
pub use document::{build_document, load_document, DocumentError, RosterDocument, SaveMethod};
pub use draft::RosterDraft;
pub use error::{CoreError, Result};
pub use rotation::Rotation;
pub use validation::{validate_configuration, ConfigurationError, Stage};
