//! Catalog documents
//!
//! Each play names a summary document describing a video; the search
//! dictionary is one more document in the same place. A [`SummarySource`]
//! resolves names to documents; failures are reported to the caller, which
//! logs them and leaves the corresponding view empty.

mod directory;
mod summary;

pub use directory::CatalogDirectory;
pub use summary::Summary;

use crate::search::Dictionary;
use thiserror::Error;

/// Name of the dictionary document
pub const DICTIONARY_NAME: &str = "dictionary.json";

/// Why a catalog document could not be produced
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog document {0:?} not found")]
    NotFound(String),

    #[error("catalog document name {0:?} is not allowed")]
    InvalidName(String),

    #[error("failed to read catalog document {name:?}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog document {name:?} is malformed: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolves names to catalog documents
pub trait SummarySource {
    /// Fetch the summary document of play `name`
    fn summary(&self, name: &str) -> Result<Summary, CatalogError>;

    /// Fetch the search dictionary
    fn dictionary(&self) -> Result<Dictionary, CatalogError>;
}
