//! The user's owned-card multiset.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::normalize::{NormalizedName, normalize};

/// Owned cards keyed by [`NormalizedName`], each with a positive count.
///
/// An absent name means zero copies are owned; zero counts are never stored.
/// The inventory is immutable once built: scoring only ever reads it, so a
/// single inventory can be shared by any number of concurrent scoring calls.
///
/// # Examples
///
/// ```
/// use deckmatch::{Inventory, normalize};
///
/// let inv = Inventory::from_names(["Sol Ring", "sol ring", "Arcane Signet", "  "]);
/// assert_eq!(inv.owned(&normalize("SOL RING")), 2);
/// assert_eq!(inv.owned(&normalize("Mana Crypt")), 0);
/// assert_eq!(inv.len(), 2);
/// assert_eq!(inv.total_copies(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: BTreeMap<NormalizedName, u32>,
}

impl Inventory {
    /// Build an inventory from one raw name per owned copy.
    ///
    /// Blank and whitespace-only entries are discarded. Duplicate names
    /// (after normalization) accumulate. The result does not depend on input
    /// order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_counts(names.into_iter().map(|name| (name, 1)))
    }

    /// Build an inventory from `(raw name, quantity)` pairs.
    ///
    /// Pairs with a zero quantity or a blank name are ignored. Repeated names
    /// add their quantities together, saturating at `u32::MAX`.
    ///
    /// # Arguments
    ///
    /// * `pairs` - Raw card names with the number of copies owned
    ///
    /// # Returns
    ///
    /// An [`Inventory`] keyed by normalized name.
    ///
    /// # Examples
    ///
    /// ```
    /// use deckmatch::{Inventory, normalize};
    ///
    /// let inv = Inventory::from_counts([("Island", 20), ("ISLAND", 4), ("Forest", 0)]);
    /// assert_eq!(inv.owned(&normalize("island")), 24);
    /// assert!(!inv.contains(&normalize("forest")));
    /// ```
    pub fn from_counts<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut counts: BTreeMap<NormalizedName, u32> = BTreeMap::new();
        for (raw, quantity) in pairs {
            if quantity == 0 {
                continue;
            }
            let name = normalize(raw.as_ref());
            if name.is_empty() {
                continue;
            }
            let slot = counts.entry(name).or_insert(0);
            *slot = slot.saturating_add(quantity);
        }
        Self { counts }
    }

    /// Number of owned copies of `name` (0 if absent).
    pub fn owned(&self, name: &NormalizedName) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Returns `true` if at least one copy of `name` is owned.
    pub fn contains(&self, name: &NormalizedName) -> bool {
        self.counts.contains_key(name)
    }

    /// Number of distinct owned cards.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing is owned.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of owned copies across all cards.
    pub fn total_copies(&self) -> u64 {
        self.counts.values().map(|&n| u64::from(n)).sum()
    }

    /// Iterate over `(name, count)` pairs in normalized-name order.
    pub fn iter(&self) -> btree_map::Iter<'_, NormalizedName, u32> {
        self.counts.iter()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = (&'a NormalizedName, &'a u32);
    type IntoIter = btree_map::Iter<'a, NormalizedName, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Build an [`Inventory`] from one raw card name per owned copy.
///
/// Free-function form of [`Inventory::from_names`].
///
/// # Examples
///
/// ```
/// use deckmatch::{build_inventory, normalize};
///
/// let inv = build_inventory(&["Sol Ring", "Sol Ring", "Arcane Signet"]);
/// assert_eq!(inv.owned(&normalize("Sol Ring")), 2);
/// ```
pub fn build_inventory<S: AsRef<str>>(raw_names: &[S]) -> Inventory {
    Inventory::from_names(raw_names)
}
