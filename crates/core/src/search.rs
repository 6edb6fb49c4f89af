//! Debounced officer directory search for the non-operational pickers.
//! Requests are debounced and only the newest one may publish results, so a
//! slow response never overwrites a newer query.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delay between the last keystroke and the directory request.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Maximum hits requested from and kept per query.
pub const SEARCH_RESULT_LIMIT: usize = 8;

/// Queries shorter than this clear the results instead of searching.
pub const MIN_QUERY_LEN: usize = 2;

/// One directory match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    #[serde(rename = "service_no", default)]
    pub service_number: String,
    #[serde(default)]
    pub ratings: Vec<String>,
}

impl SearchHit {
    pub fn display_label(&self) -> String {
        if self.service_number.is_empty() {
            return self.name.clone();
        }
        format!("{} ({})", self.name, self.service_number)
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to load officers: {0}")]
    Transport(String),
}

/// Backend used to run a search request. Implemented over HTTP by callers;
/// tests use an in-memory directory.
pub trait SearchClient {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError>;
}

/// Permission to run one debounced request. Superseded tickets are refused
/// by [`SearchSession::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    pub query: String,
}

impl SearchTicket {
    pub fn run(&self, client: &dyn SearchClient) -> Result<Vec<SearchHit>, SearchError> {
        client.search(&self.query, SEARCH_RESULT_LIMIT)
    }
}

/// Search state for one picker.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    generation: u64,
    query: String,
    results: Vec<SearchHit>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new input value, invalidating any request in flight. A
    /// query shorter than [`MIN_QUERY_LEN`] clears the results and issues no
    /// ticket; otherwise the returned ticket should be run after
    /// [`SEARCH_DEBOUNCE_MS`].
    pub fn schedule(&mut self, raw_query: &str) -> Option<SearchTicket> {
        let query = raw_query.trim();
        self.generation += 1;
        if query.len() < MIN_QUERY_LEN {
            self.query.clear();
            self.results.clear();
            return None;
        }
        self.query = query.to_string();
        Some(SearchTicket {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Publishes the hits of a completed request. Returns false, leaving the
    /// session untouched, when the ticket has been superseded.
    pub fn apply(&mut self, ticket: &SearchTicket, hits: Vec<SearchHit>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.results = hits.into_iter().take(SEARCH_RESULT_LIMIT).collect();
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchHit] {
        &self.results
    }

    /// Current results minus officers already selected in the picker.
    pub fn available(&self, selected: &[String]) -> Vec<&SearchHit> {
        self.results
            .iter()
            .filter(|hit| !selected.iter().any(|id| id == &hit.id))
            .collect()
    }
}
