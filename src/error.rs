//! Errors raised while converting raw catalog records.
//!
//! These never escape catalog loading: [`Catalog`](crate::Catalog) logs and
//! skips a record that fails to convert. They are public so callers
//! converting records one at a time can see why a record was rejected.

use thiserror::Error;

/// Why a single catalog record could not become a [`DeckEntry`](crate::DeckEntry).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The record is not a JSON object.
    #[error("catalog record is not an object (found {found})")]
    NotAnObject {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// The record is an object but its fields have the wrong shape, e.g. a
    /// `cards` field that is neither a list nor a name-to-count mapping.
    #[error("invalid catalog record {name:?}: {source}")]
    InvalidRecord {
        /// Deck name, if the record had a readable one.
        name: Option<String>,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}
