use thiserror::Error;

use crate::board::BoardError;
use crate::catalog::CatalogError;
use crate::document::DocumentError;
use crate::search::SearchError;
use crate::validation::ConfigurationError;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Umbrella error for callers that do not need to match on the source
/// module.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("invalid roster configuration: {}", errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Configuration { errors: Vec<ConfigurationError> },
    #[error("{0}")]
    Message(String),
}

impl CoreError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<Vec<ConfigurationError>> for CoreError {
    fn from(errors: Vec<ConfigurationError>) -> Self {
        Self::Configuration { errors }
    }
}
