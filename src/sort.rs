//! Ordering of match results for display.
//!
//! Provides the two-level comparator used by [`rank`](crate::rank): coverage
//! ratio (descending), then owned count (descending).

use std::cmp::Ordering;

use crate::matching::MatchResult;

/// Two-level comparator for sorting match results, best first.
///
/// 1. **Higher coverage ratio wins.**
/// 2. **Higher owned count wins** -- only consulted when the ratios are
///    exactly equal, so a small fully-covered deck always outranks a large
///    half-covered one.
///
/// Returns [`Ordering::Equal`] when both keys tie, so a stable sort keeps
/// the input order of tied results.
///
/// # Arguments
///
/// * `a` - First match result to compare
/// * `b` - Second match result to compare
///
/// # Returns
///
/// [`Ordering::Less`] when `a` should be listed before `b`,
/// [`Ordering::Greater`] when after, and [`Ordering::Equal`] on a full tie.
///
/// # Examples
///
/// ```
/// use deckmatch::{CardList, DeckEntry, Inventory, score, sort_match_results};
/// use std::cmp::Ordering;
///
/// let inv = Inventory::from_names(["a", "b"]);
/// let small = score(&inv, &DeckEntry::new("small", "", vec![], &CardList::flat(["a", "x"]), None));
/// let large = score(&inv, &DeckEntry::new("large", "", vec![], &CardList::flat(["a", "b", "x", "y"]), None));
///
/// // Both cover 50%; the deck with more owned copies comes first.
/// assert_eq!(sort_match_results(&large, &small), Ordering::Less);
/// ```
pub fn sort_match_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    // Level 1: higher ratio first. Ratios are finite by construction, so
    // `partial_cmp` only returns `None` for NaN, which is treated as equal.
    b.coverage_ratio
        .partial_cmp(&a.coverage_ratio)
        .unwrap_or(Ordering::Equal)
        // Level 2: more owned copies first.
        .then_with(|| b.owned_count.cmp(&a.owned_count))
}
