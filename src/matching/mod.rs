//! Scoring decks against an inventory and ranking the results.
//!
//! [`score`] intersects one deck's requirements with an inventory, capping
//! each card's owned quantity at what the deck needs. [`rank`] scores a whole
//! catalog, drops decks below the configured matching-card floor, and orders
//! the rest by coverage.

use std::fmt;

use log::{debug, trace};
use serde::Serialize;

use crate::deck::{DeckEntry, Requirements};
use crate::inventory::Inventory;
use crate::normalize::NormalizedName;
use crate::options::{MatchOptions, SideboardPolicy};
use crate::sort::sort_match_results;

/// Ownership state of one required card.
///
/// # Examples
///
/// ```
/// use deckmatch::CardStatus;
///
/// assert_eq!(CardStatus::classify(4, 4), CardStatus::FullyOwned);
/// assert_eq!(CardStatus::classify(4, 9), CardStatus::FullyOwned);
/// assert_eq!(CardStatus::classify(4, 1), CardStatus::PartiallyOwned { missing: 3 });
/// assert_eq!(CardStatus::classify(4, 0), CardStatus::Missing { missing: 4 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum CardStatus {
    /// At least as many copies are owned as required.
    FullyOwned,
    /// Some, but not all, required copies are owned. The owned quantity is
    /// carried by [`CardMatch::owned`].
    PartiallyOwned {
        /// Copies still needed (`required - owned`).
        missing: u32,
    },
    /// No copy is owned.
    Missing {
        /// Copies needed (the full requirement).
        missing: u32,
    },
}

impl CardStatus {
    /// Classify a card from its required and owned quantities.
    pub fn classify(required: u32, owned: u32) -> Self {
        if owned >= required {
            CardStatus::FullyOwned
        } else if owned == 0 {
            CardStatus::Missing { missing: required }
        } else {
            CardStatus::PartiallyOwned {
                missing: required - owned,
            }
        }
    }

    /// Copies still needed; 0 when fully owned.
    pub fn missing(&self) -> u32 {
        match *self {
            CardStatus::FullyOwned => 0,
            CardStatus::PartiallyOwned { missing } | CardStatus::Missing { missing } => missing,
        }
    }

    /// Returns `true` unless the card is entirely missing.
    pub fn is_owned(&self) -> bool {
        !matches!(self, CardStatus::Missing { .. })
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardStatus::FullyOwned => f.write_str("fully owned"),
            CardStatus::PartiallyOwned { missing } => {
                write!(f, "partially owned ({missing} missing)")
            }
            CardStatus::Missing { missing } => write!(f, "missing ({missing})"),
        }
    }
}

/// Per-card line of a [`MatchResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardMatch {
    /// Normalized key of the card.
    pub name: NormalizedName,
    /// Spelling of the card as it appeared in the deck list.
    pub display_name: String,
    /// Copies the deck requires.
    pub required: u32,
    /// Copies owned, capped at `required`.
    pub owned: u32,
    /// Ownership state.
    #[serde(flatten)]
    pub status: CardStatus,
}

/// Result of scoring one deck against one inventory.
///
/// A fresh value: it copies the deck's metadata and holds no reference to
/// the inventory or the deck it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Display name of the deck.
    pub deck_name: String,
    /// Author of the deck.
    pub author: String,
    /// Tags of the deck.
    pub tags: Vec<String>,
    /// Sum over cards of `min(owned, required)`.
    pub owned_count: u64,
    /// Sum of all required counts.
    pub total_required: u64,
    /// `owned_count / total_required`, or `0.0` for a deck with no requirements.
    pub coverage_ratio: f64,
    /// One entry per required card, in normalized-name order.
    pub cards: Vec<CardMatch>,
}

impl MatchResult {
    /// Number of distinct required cards with at least one copy owned.
    pub fn matching_cards(&self) -> usize {
        self.cards.iter().filter(|c| c.owned > 0).count()
    }

    /// Cards with at least one copy still needed.
    pub fn missing_cards(&self) -> impl Iterator<Item = &CardMatch> {
        self.cards.iter().filter(|c| c.status != CardStatus::FullyOwned)
    }

    /// Total copies still needed to complete the deck.
    pub fn missing_count(&self) -> u64 {
        self.total_required - self.owned_count
    }

    /// Coverage as a percentage in `[0, 100]`.
    pub fn coverage_percent(&self) -> f64 {
        self.coverage_ratio * 100.0
    }

    /// Returns `true` if every required copy is owned. A deck with no
    /// requirements is never complete.
    pub fn is_complete(&self) -> bool {
        self.total_required > 0 && self.owned_count == self.total_required
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.deck_name)?;
        if !self.author.is_empty() {
            write!(f, " by {}", self.author)?;
        }
        write!(
            f,
            ": {}/{} ({:.1}%)",
            self.owned_count,
            self.total_required,
            self.coverage_percent()
        )
    }
}

/// Score `deck` against `inventory` using merged mainboard and sideboard
/// requirements.
///
/// # Examples
///
/// ```
/// use deckmatch::{CardList, DeckEntry, Inventory, score};
///
/// let inv = Inventory::from_names(["Sol Ring", "Sol Ring", "Arcane Signet"]);
/// let deck = DeckEntry::new(
///     "Ramp",
///     "",
///     Vec::new(),
///     &CardList::counted([("Sol Ring", 1), ("Arcane Signet", 1), ("Mana Crypt", 1)]),
///     None,
/// );
/// let result = score(&inv, &deck);
/// assert_eq!(result.owned_count, 2);
/// assert_eq!(result.total_required, 3);
/// assert!((result.coverage_ratio - 2.0 / 3.0).abs() < 1e-9);
/// ```
pub fn score(inventory: &Inventory, deck: &DeckEntry) -> MatchResult {
    score_with(inventory, deck, SideboardPolicy::Merge)
}

/// Score `deck` against `inventory`, choosing requirements by `policy`.
///
/// Each required card is matched against the owned quantity of the same
/// normalized name; owned copies beyond the requirement do not count.
///
/// # Arguments
///
/// * `inventory` - Owned cards to match against
/// * `deck` - Deck whose requirements are scored
/// * `policy` - Whether sideboard copies join the requirements
///
/// # Returns
///
/// A [`MatchResult`] with one [`CardMatch`] per required card in
/// normalized-name order. `coverage_ratio` is `owned_count / total_required`,
/// or `0.0` when the deck requires nothing.
///
/// # Examples
///
/// ```
/// use deckmatch::{CardList, DeckEntry, Inventory, SideboardPolicy, score_with};
///
/// let inv = Inventory::from_names(["Duress"]);
/// let deck = DeckEntry::new(
///     "Discard",
///     "",
///     Vec::new(),
///     &CardList::flat(["Thoughtseize"]),
///     Some(&CardList::flat(["Duress"])),
/// );
/// assert_eq!(score_with(&inv, &deck, SideboardPolicy::Merge).owned_count, 1);
/// assert_eq!(score_with(&inv, &deck, SideboardPolicy::Ignore).owned_count, 0);
/// ```
pub fn score_with(inventory: &Inventory, deck: &DeckEntry, policy: SideboardPolicy) -> MatchResult {
    let (cards, owned_count, total_required) =
        intersect(inventory, deck.requirements_for(policy));

    let coverage_ratio = if total_required == 0 {
        0.0
    } else {
        owned_count as f64 / total_required as f64
    };

    trace!(
        "scored deck {:?}: {owned_count}/{total_required}",
        deck.name()
    );

    MatchResult {
        deck_name: deck.name().to_owned(),
        author: deck.author().to_owned(),
        tags: deck.tags().to_vec(),
        owned_count,
        total_required,
        coverage_ratio,
        cards,
    }
}

/// Walk the requirements once, producing per-card lines and the two totals.
fn intersect(inventory: &Inventory, requirements: &Requirements) -> (Vec<CardMatch>, u64, u64) {
    let mut cards = Vec::with_capacity(requirements.len());
    let mut owned_total: u64 = 0;
    let mut required_total: u64 = 0;

    for (name, req) in requirements {
        // Surplus copies beyond the requirement do not count.
        let owned = inventory.owned(name).min(req.count);
        owned_total += u64::from(owned);
        required_total += u64::from(req.count);
        cards.push(CardMatch {
            name: name.clone(),
            display_name: req.display_name.clone(),
            required: req.count,
            owned,
            status: CardStatus::classify(req.count, owned),
        });
    }

    (cards, owned_total, required_total)
}

/// Score every deck and return the admitted results, best first.
///
/// Decks with fewer than `options.min_matching_cards` distinct owned cards
/// are dropped. The rest are sorted by descending coverage ratio, then by
/// descending owned count; remaining ties keep catalog order. The output is
/// never truncated.
///
/// # Arguments
///
/// * `inventory` - Owned cards to match against
/// * `decks` - Decks to score, in catalog order
/// * `options` - Matching-card floor and sideboard policy
///
/// # Returns
///
/// A new `Vec` of [`MatchResult`]s ordered by [`sort_match_results`]. Empty
/// when no deck clears the floor.
///
/// # Examples
///
/// ```
/// use deckmatch::{Catalog, Inventory, MatchOptions, rank};
/// use serde_json::json;
///
/// let catalog = Catalog::from_json(json!([
///     {"name": "Half", "cards": ["Sol Ring", "Mana Crypt"]},
///     {"name": "Full", "cards": ["Sol Ring"]},
/// ]));
/// let inv = Inventory::from_names(["Sol Ring"]);
///
/// let ranked = rank(&inv, &catalog, &MatchOptions::default());
/// assert_eq!(ranked[0].deck_name, "Full");
/// assert_eq!(ranked[1].deck_name, "Half");
/// ```
pub fn rank<'a, I>(inventory: &Inventory, decks: I, options: &MatchOptions) -> Vec<MatchResult>
where
    I: IntoIterator<Item = &'a DeckEntry>,
{
    let mut scored = 0usize;
    let mut results: Vec<MatchResult> = decks
        .into_iter()
        .map(|deck| {
            scored += 1;
            score_with(inventory, deck, options.sideboard)
        })
        .filter(|result| result.matching_cards() >= options.min_matching_cards)
        .collect();

    // `sort_by` is stable, so equal results keep catalog order.
    results.sort_by(sort_match_results);

    debug!(
        "ranked {} of {scored} decks (min_matching_cards = {})",
        results.len(),
        options.min_matching_cards
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::CardList;

    fn deck(name: &str, cards: &[(&str, u32)]) -> DeckEntry {
        DeckEntry::new(
            name,
            "",
            Vec::new(),
            &CardList::counted(cards.iter().copied()),
            None,
        )
    }

    fn card<'r>(result: &'r MatchResult, display: &str) -> &'r CardMatch {
        result
            .cards
            .iter()
            .find(|c| c.display_name == display)
            .unwrap()
    }

    // --- CardStatus ---

    #[test]
    fn classify_boundaries() {
        assert_eq!(CardStatus::classify(1, 1), CardStatus::FullyOwned);
        assert_eq!(CardStatus::classify(1, 0), CardStatus::Missing { missing: 1 });
        assert_eq!(
            CardStatus::classify(3, 2),
            CardStatus::PartiallyOwned { missing: 1 }
        );
    }

    #[test]
    fn status_missing_quantity() {
        assert_eq!(CardStatus::FullyOwned.missing(), 0);
        assert_eq!(CardStatus::classify(4, 1).missing(), 3);
        assert_eq!(CardStatus::classify(4, 0).missing(), 4);
    }

    #[test]
    fn status_serializes_kebab_case_tag() {
        let json = serde_json::to_value(CardStatus::classify(3, 1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "partially-owned", "missing": 2})
        );
        let json = serde_json::to_value(CardStatus::FullyOwned).unwrap();
        assert_eq!(json, serde_json::json!({"status": "fully-owned"}));
    }

    #[test]
    fn status_display() {
        assert_eq!(CardStatus::classify(2, 0).to_string(), "missing (2)");
        assert_eq!(CardStatus::FullyOwned.to_string(), "fully owned");
        assert_eq!(
            CardStatus::classify(3, 2).to_string(),
            "partially owned (1 missing)"
        );
    }

    #[test]
    fn partially_owned_line_serializes_each_key_once() {
        let inv = Inventory::from_names(["Sol Ring", "Sol Ring"]);
        let result = score(&inv, &deck("d", &[("Sol Ring", 3)]));
        let json = serde_json::to_string(card(&result, "Sol Ring")).unwrap();

        for key in ["\"name\"", "\"owned\"", "\"missing\"", "\"status\""] {
            assert_eq!(json.matches(key).count(), 1, "{key} in {json}");
        }
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["owned"], 2);
        assert_eq!(value["missing"], 1);
        assert_eq!(value["status"], "partially-owned");
    }

    // --- score ---

    #[test]
    fn score_caps_surplus_copies() {
        let inv = Inventory::from_counts([("Island", 30)]);
        let result = score(&inv, &deck("d", &[("Island", 10)]));
        assert_eq!(result.owned_count, 10);
        assert_eq!(result.coverage_ratio, 1.0);
        assert!(result.is_complete());
    }

    #[test]
    fn score_empty_deck_is_zero() {
        let inv = Inventory::from_names(["Sol Ring"]);
        let result = score(&inv, &deck("empty", &[]));
        assert_eq!(result.total_required, 0);
        assert_eq!(result.coverage_ratio, 0.0);
        assert!(result.cards.is_empty());
        assert!(!result.is_complete());
    }

    #[test]
    fn score_empty_inventory_is_zero() {
        let result = score(&Inventory::default(), &deck("d", &[("a", 2), ("b", 1)]));
        assert_eq!(result.owned_count, 0);
        assert_eq!(result.coverage_ratio, 0.0);
        assert!(result.cards.iter().all(|c| !c.status.is_owned()));
    }

    #[test]
    fn score_partial_card() {
        let inv = Inventory::from_names(["Sol Ring", "Sol Ring"]);
        let result = score(&inv, &deck("d", &[("Sol Ring", 3)]));
        let line = card(&result, "Sol Ring");
        assert_eq!(line.owned, 2);
        assert_eq!(line.status, CardStatus::PartiallyOwned { missing: 1 });
        assert_eq!(result.missing_count(), 1);
    }

    #[test]
    fn score_matches_across_spellings() {
        let inv = Inventory::from_names(["\u{FF33}OL RING"]);
        let result = score(&inv, &deck("d", &[("sol ring", 1)]));
        assert_eq!(result.owned_count, 1);
    }

    #[test]
    fn score_copies_metadata() {
        let d = DeckEntry::new(
            "Ramp",
            "me",
            vec!["commander".to_owned()],
            &CardList::default(),
            None,
        );
        let result = score(&Inventory::default(), &d);
        assert_eq!(result.deck_name, "Ramp");
        assert_eq!(result.author, "me");
        assert_eq!(result.tags, vec!["commander".to_owned()]);
    }

    #[test]
    fn score_with_ignore_skips_sideboard() {
        let d = DeckEntry::new(
            "d",
            "",
            Vec::new(),
            &CardList::counted([("a", 1)]),
            Some(&CardList::counted([("b", 1)])),
        );
        let inv = Inventory::from_names(["a"]);
        assert_eq!(score_with(&inv, &d, SideboardPolicy::Ignore).coverage_ratio, 1.0);
        assert_eq!(score(&inv, &d).coverage_ratio, 0.5);
    }

    #[test]
    fn per_card_required_sums_to_total() {
        let inv = Inventory::from_names(["a", "b", "b"]);
        let result = score(&inv, &deck("d", &[("a", 2), ("b", 1), ("c", 4)]));
        let sum: u64 = result.cards.iter().map(|c| u64::from(c.required)).sum();
        assert_eq!(sum, result.total_required);
    }

    #[test]
    fn missing_cards_lists_incomplete_lines() {
        let inv = Inventory::from_names(["a", "b"]);
        let result = score(&inv, &deck("d", &[("a", 1), ("b", 2), ("c", 1)]));
        let missing: Vec<&str> = result
            .missing_cards()
            .map(|c| c.display_name.as_str())
            .collect();
        assert_eq!(missing, vec!["b", "c"]);
        assert_eq!(result.matching_cards(), 2);
    }

    #[test]
    fn display_includes_author_and_percent() {
        let d = DeckEntry::new(
            "Ramp",
            "me",
            Vec::new(),
            &CardList::flat(["a", "b", "c"]),
            None,
        );
        let result = score(&Inventory::from_names(["a", "b"]), &d);
        assert_eq!(result.to_string(), "Ramp by me: 2/3 (66.7%)");

        let anon = score(&Inventory::default(), &deck("Solo", &[("a", 1)]));
        assert_eq!(anon.to_string(), "Solo: 0/1 (0.0%)");
    }

    // --- rank ---

    #[test]
    fn rank_empty_catalog() {
        let inv = Inventory::from_names(["a"]);
        let results = rank(&inv, &Vec::<DeckEntry>::new(), &MatchOptions::default());
        assert!(results.is_empty());
    }

    #[test]
    fn rank_orders_by_ratio_then_count() {
        let inv = Inventory::from_names(["a", "b", "c"]);
        let decks = vec![
            deck("third", &[("a", 1), ("x", 2)]),
            deck("tie-small", &[("a", 1), ("x", 1)]),
            deck("tie-large", &[("a", 1), ("b", 1), ("x", 1), ("y", 1)]),
            deck("first", &[("c", 1)]),
        ];
        let results = rank(&inv, &decks, &MatchOptions::default());
        let names: Vec<&str> = results.iter().map(|r| r.deck_name.as_str()).collect();
        assert_eq!(names, vec!["first", "tie-large", "tie-small", "third"]);
    }

    #[test]
    fn rank_ratio_beats_count() {
        let inv = Inventory::from_names(["a", "b", "c", "d"]);
        let decks = vec![
            deck("big", &[("a", 1), ("b", 1), ("c", 1), ("d", 1), ("x", 4)]),
            deck("small", &[("a", 1)]),
        ];
        let results = rank(&inv, &decks, &MatchOptions::default());
        assert_eq!(results[0].deck_name, "small");
    }

    #[test]
    fn rank_full_ties_keep_catalog_order() {
        let inv = Inventory::from_names(["a"]);
        let decks = vec![deck("one", &[("a", 1)]), deck("two", &[("a", 1)])];
        let results = rank(&inv, &decks, &MatchOptions::default());
        assert_eq!(results[0].deck_name, "one");
        assert_eq!(results[1].deck_name, "two");
    }

    #[test]
    fn rank_threshold_counts_distinct_owned_cards() {
        let inv = Inventory::from_names(["a", "b"]);
        let decks = vec![
            deck("two", &[("a", 4), ("b", 4)]),
            deck("one", &[("a", 1)]),
            deck("none", &[("z", 1)]),
        ];
        let opts = MatchOptions {
            min_matching_cards: 2,
            ..Default::default()
        };
        let results = rank(&inv, &decks, &opts);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].deck_name, "two");
    }

    #[test]
    fn rank_default_admits_zero_coverage() {
        let results = rank(
            &Inventory::default(),
            &[deck("d", &[("a", 1)]), deck("empty", &[])],
            &MatchOptions::default(),
        );
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn rank_applies_sideboard_policy() {
        let d = DeckEntry::new(
            "d",
            "",
            Vec::new(),
            &CardList::counted([("a", 1)]),
            Some(&CardList::counted([("b", 3)])),
        );
        let inv = Inventory::from_names(["a"]);
        let opts = MatchOptions {
            sideboard: SideboardPolicy::Ignore,
            ..Default::default()
        };
        let results = rank(&inv, [&d], &opts);
        assert_eq!(results[0].total_required, 1);
    }
}
