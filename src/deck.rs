//! Deck catalog entries and their quantity-aware card requirements.
//!
//! A deck arrives with a mainboard and an optional sideboard, each given as
//! a [`CardList`] in one of two shapes: a flat list of names (one entry per
//! copy) or an explicit name-to-count mapping. Both shapes reduce to the same
//! [`Requirements`] multiset keyed by [`NormalizedName`].

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use crate::normalize::{NormalizedName, normalize};
use crate::options::SideboardPolicy;

/// A list of required cards in either of the two accepted shapes.
///
/// Deserializes untagged: a JSON array becomes [`CardList::Flat`], a JSON
/// object of name to non-negative integer becomes [`CardList::Counted`].
/// Anything else fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardList {
    /// One raw name per required copy; a name listed twice requires two.
    Flat(Vec<String>),
    /// Raw name mapped to the number of copies required.
    ///
    /// Keys are held in byte order, not source order. When several raw keys
    /// normalize to the same card, the lexicographically first one becomes
    /// its display name.
    Counted(BTreeMap<String, u32>),
}

impl CardList {
    /// Build a flat list from raw names.
    pub fn flat<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CardList::Flat(names.into_iter().map(Into::into).collect())
    }

    /// Build a counted list from `(raw name, count)` pairs. Repeated names
    /// keep the last count given.
    pub fn counted<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        CardList::Counted(pairs.into_iter().map(|(n, c)| (n.into(), c)).collect())
    }

    /// Reduce this list to normalized requirements.
    ///
    /// Blank names and zero counts are dropped, so every resulting count is
    /// at least one.
    pub fn to_requirements(&self) -> Requirements {
        let mut reqs = Requirements::default();
        match self {
            CardList::Flat(names) => {
                for raw in names {
                    reqs.add(raw, 1);
                }
            }
            CardList::Counted(counts) => {
                for (raw, &count) in counts {
                    reqs.add(raw, count);
                }
            }
        }
        reqs
    }
}

impl Default for CardList {
    fn default() -> Self {
        CardList::Flat(Vec::new())
    }
}

/// One required card: how many copies, and the spelling to show for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// The first raw spelling seen for this card, trimmed. Flat lists are
    /// read in list order; counted lists in key order, so there it is the
    /// lexicographically first raw key.
    pub display_name: String,
    /// Copies required; always at least 1.
    pub count: u32,
}

/// A multiset of required cards keyed by normalized name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    cards: BTreeMap<NormalizedName, Requirement>,
}

impl Requirements {
    /// Add `count` copies of `raw` (normalized). Blank names and zero counts
    /// are ignored; the first spelling seen becomes the display name.
    fn add(&mut self, raw: &str, count: u32) {
        if count == 0 {
            return;
        }
        let name = normalize(raw);
        if name.is_empty() {
            return;
        }
        self.cards
            .entry(name)
            .and_modify(|req| req.count = req.count.saturating_add(count))
            .or_insert_with(|| Requirement {
                display_name: raw.trim().to_owned(),
                count,
            });
    }

    /// Sum `other` into `self` per normalized name.
    fn merge(&mut self, other: &Requirements) {
        for (name, req) in &other.cards {
            self.cards
                .entry(name.clone())
                .and_modify(|existing| existing.count = existing.count.saturating_add(req.count))
                .or_insert_with(|| req.clone());
        }
    }

    /// Required copies of `name` (0 if the deck does not use it).
    pub fn count(&self, name: &NormalizedName) -> u32 {
        self.cards.get(name).map_or(0, |req| req.count)
    }

    /// Number of distinct required cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if nothing is required.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sum of all required counts.
    pub fn total(&self) -> u64 {
        self.cards.values().map(|req| u64::from(req.count)).sum()
    }

    /// Iterate over requirements in normalized-name order.
    pub fn iter(&self) -> btree_map::Iter<'_, NormalizedName, Requirement> {
        self.cards.iter()
    }
}

impl<'a> IntoIterator for &'a Requirements {
    type Item = (&'a NormalizedName, &'a Requirement);
    type IntoIter = btree_map::Iter<'a, NormalizedName, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One deck in the catalog.
///
/// Metadata (`name`, `author`, `tags`) is opaque and passed through to match
/// results unchanged. Requirements are rebuilt from the input lists on every
/// construction; the caller's lists are never mutated or aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    name: String,
    author: String,
    tags: Vec<String>,
    mainboard: Requirements,
    merged: Requirements,
}

impl DeckEntry {
    /// Build a deck from its metadata and card lists.
    ///
    /// Sideboard counts are added to mainboard counts per normalized name.
    ///
    /// # Examples
    ///
    /// ```
    /// use deckmatch::{CardList, DeckEntry, normalize};
    ///
    /// let deck = DeckEntry::new(
    ///     "Burn",
    ///     "someone",
    ///     vec!["modern".to_owned()],
    ///     &CardList::flat(["Lightning Bolt", "Lightning Bolt", "Goblin Guide"]),
    ///     Some(&CardList::counted([("lightning bolt", 1), ("Smash to Smithereens", 2)])),
    /// );
    /// assert_eq!(deck.requirements().count(&normalize("Lightning Bolt")), 3);
    /// assert_eq!(deck.mainboard().count(&normalize("Lightning Bolt")), 2);
    /// assert_eq!(deck.total_required(), 6);
    /// ```
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        tags: Vec<String>,
        mainboard: &CardList,
        sideboard: Option<&CardList>,
    ) -> Self {
        let mainboard = mainboard.to_requirements();
        let mut merged = mainboard.clone();
        if let Some(sideboard) = sideboard {
            merged.merge(&sideboard.to_requirements());
        }
        Self {
            name: name.into(),
            author: author.into(),
            tags,
            mainboard,
            merged,
        }
    }

    /// Display name of the deck.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Author of the deck; empty when unknown.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Format / deck-type tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns `true` if any tag normalizes to the same key as `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.has_normalized_tag(&normalize(tag))
    }

    pub(crate) fn has_normalized_tag(&self, wanted: &NormalizedName) -> bool {
        self.tags.iter().any(|t| normalize(t) == *wanted)
    }

    /// Mainboard and sideboard requirements merged.
    pub fn requirements(&self) -> &Requirements {
        &self.merged
    }

    /// Mainboard requirements only.
    pub fn mainboard(&self) -> &Requirements {
        &self.mainboard
    }

    /// Requirements selected by `policy`.
    pub fn requirements_for(&self, policy: SideboardPolicy) -> &Requirements {
        match policy {
            SideboardPolicy::Merge => &self.merged,
            SideboardPolicy::Ignore => &self.mainboard,
        }
    }

    /// Sum of all merged required counts.
    pub fn total_required(&self) -> u64 {
        self.merged.total()
    }
}

/// Build a [`DeckEntry`]. Free-function form of [`DeckEntry::new`].
pub fn build_deck_entry(
    name: impl Into<String>,
    author: impl Into<String>,
    tags: Vec<String>,
    mainboard: &CardList,
    sideboard: Option<&CardList>,
) -> DeckEntry {
    DeckEntry::new(name, author, tags, mainboard, sideboard)
}
