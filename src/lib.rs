#![warn(missing_docs)]

//! Deck matching against an owned-card inventory.
//!
//! `deckmatch` scores each deck in a catalog by how many of its required
//! card copies an inventory can supply, reports per-card owned / partial /
//! missing status, and ranks the decks by coverage. Card names on both sides
//! are compared after Unicode compatibility normalization and case folding.
//!
//! The crate does no I/O: callers hand in already-parsed card names and
//! catalog records and receive structured results.

/// Card-name normalization into comparison keys.
pub mod normalize;

/// The owned-card inventory.
pub mod inventory;

/// Deck entries and their card requirements.
pub mod deck;

/// Catalog loading from parsed JSON records.
pub mod catalog;

/// Scoring and ranking decks against an inventory.
pub mod matching;

/// Ordering of match results.
pub mod sort;

/// Configuration options for ranking.
pub mod options;

/// Catalog record errors.
pub mod error;

// Re-export primary public API types and functions at the crate root.
pub use catalog::{Catalog, CatalogRecord, UNNAMED_DECK};
pub use deck::{CardList, DeckEntry, Requirement, Requirements, build_deck_entry};
pub use error::CatalogError;
pub use inventory::{Inventory, build_inventory};
pub use matching::{CardMatch, CardStatus, MatchResult, rank, score, score_with};
pub use normalize::{NormalizedName, normalize};
pub use options::{MatchOptions, SideboardPolicy};
pub use sort::sort_match_results;
