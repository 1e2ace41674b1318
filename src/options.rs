//! Configuration options for ranking a deck catalog.
//!
//! [`MatchOptions`] controls the policies that the various hand-written
//! matchers used to hard-code: the minimum number of distinct owned cards a
//! deck needs before it is reported, and whether sideboard cards count
//! towards a deck's requirements.

use serde::{Deserialize, Serialize};

/// How a deck's sideboard contributes to its requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SideboardPolicy {
    /// Sideboard counts are added to mainboard counts per card (default).
    #[default]
    Merge,
    /// Only mainboard cards are scored.
    Ignore,
}

/// Global options that control ranking behavior.
///
/// # Defaults
///
/// - `min_matching_cards`: `0` (every deck is reported)
/// - `sideboard`: [`SideboardPolicy::Merge`]
///
/// Deserializes with every field optional, so callers can embed it in their
/// own configuration files.
///
/// # Examples
///
/// ```
/// use deckmatch::{MatchOptions, SideboardPolicy};
///
/// let opts = MatchOptions::default();
/// assert_eq!(opts.min_matching_cards, 0);
/// assert_eq!(opts.sideboard, SideboardPolicy::Merge);
///
/// // Only report decks where at least 5 distinct cards are owned.
/// let opts = MatchOptions { min_matching_cards: 5, ..Default::default() };
/// assert_eq!(opts.min_matching_cards, 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Decks where fewer than this many distinct required cards are owned
    /// (at least one copy) are left out of the ranking.
    pub min_matching_cards: usize,

    /// Whether sideboard requirements are merged into the mainboard.
    pub sideboard: SideboardPolicy,
}
