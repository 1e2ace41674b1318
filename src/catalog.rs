//! Loading a deck catalog from already-parsed JSON records.
//!
//! Fetching and parsing the JSON is the caller's job; this module only turns
//! `serde_json::Value` records into [`DeckEntry`] values. A record whose
//! shape is wrong (most commonly a `cards` field that is neither a list nor a
//! mapping) is logged and skipped. It never aborts the rest of the load.

use std::slice;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::deck::{CardList, DeckEntry};
use crate::error::CatalogError;
use crate::normalize::normalize;

/// Name given to records that do not carry one.
pub const UNNAMED_DECK: &str = "Unnamed Deck";

/// One raw catalog record as delivered by a deck source.
///
/// ```json
/// {
///   "name": "Mono Red Burn",
///   "author": "someone",
///   "tags": ["aggro"],
///   "format": "modern",
///   "cards": {"Lightning Bolt": 4, "Goblin Guide": 4},
///   "sideboard": ["Smash to Smithereens", "Smash to Smithereens"]
/// }
/// ```
///
/// Only `cards` is required. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    /// Display name of the deck.
    #[serde(default)]
    pub name: Option<String>,
    /// Author of the deck.
    #[serde(default)]
    pub author: Option<String>,
    /// Deck-type tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Format, appended to the tags when present.
    #[serde(default)]
    pub format: Option<String>,
    /// Mainboard cards.
    pub cards: CardList,
    /// Sideboard cards.
    #[serde(default)]
    pub sideboard: Option<CardList>,
}

impl CatalogRecord {
    /// Deserialize a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotAnObject`] for non-object values and
    /// [`CatalogError::InvalidRecord`] when a field has the wrong shape.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        if !value.is_object() {
            return Err(CatalogError::NotAnObject {
                found: json_type_name(&value),
            });
        }
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned);
        serde_json::from_value(value).map_err(|source| CatalogError::InvalidRecord { name, source })
    }

    /// Build the deck this record describes.
    pub fn into_deck_entry(self) -> DeckEntry {
        let mut tags = self.tags.unwrap_or_default();
        if let Some(format) = self.format {
            tags.push(format);
        }
        DeckEntry::new(
            self.name.unwrap_or_else(|| UNNAMED_DECK.to_owned()),
            self.author.unwrap_or_default(),
            tags,
            &self.cards,
            self.sideboard.as_ref(),
        )
    }
}

impl TryFrom<Value> for DeckEntry {
    type Error = CatalogError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        CatalogRecord::from_value(value).map(CatalogRecord::into_deck_entry)
    }
}

/// An explicit handle on a loaded set of decks.
///
/// The catalog holds no global state; callers that want to reuse it across
/// ranking runs keep the handle themselves.
///
/// # Examples
///
/// ```
/// use deckmatch::Catalog;
/// use serde_json::json;
///
/// let catalog = Catalog::from_json(json!([
///     {"name": "Good", "cards": ["Sol Ring"]},
///     {"name": "Broken", "cards": "Sol Ring"},
/// ]));
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.skipped(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    decks: Vec<DeckEntry>,
    skipped: usize,
}

impl Catalog {
    /// Wrap already-built decks.
    pub fn from_decks(decks: Vec<DeckEntry>) -> Self {
        Self { decks, skipped: 0 }
    }

    /// Convert each record into a deck, skipping malformed ones.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let mut catalog = Self::default();
        for (index, record) in records.into_iter().enumerate() {
            match DeckEntry::try_from(record) {
                Ok(deck) => catalog.decks.push(deck),
                Err(err) => {
                    warn!("skipping catalog record {index}: {err}");
                    catalog.skipped += 1;
                }
            }
        }
        debug!(
            "loaded {} decks from catalog ({} skipped)",
            catalog.decks.len(),
            catalog.skipped
        );
        catalog
    }

    /// Load a catalog from a parsed JSON document.
    ///
    /// Accepts either a top-level array of records or an object whose `data`
    /// field is such an array. Any other shape yields an empty catalog.
    pub fn from_json(document: Value) -> Self {
        match document {
            Value::Array(records) => Self::from_records(records),
            Value::Object(mut envelope) => match envelope.remove("data") {
                Some(Value::Array(records)) => Self::from_records(records),
                Some(other) => {
                    warn!(
                        "catalog `data` field is {}, expected an array",
                        json_type_name(&other)
                    );
                    Self::default()
                }
                None => {
                    warn!("catalog object has no `data` field");
                    Self::default()
                }
            },
            other => {
                warn!(
                    "catalog document is {}, expected an array or object",
                    json_type_name(&other)
                );
                Self::default()
            }
        }
    }

    /// All loaded decks, in catalog order.
    pub fn decks(&self) -> &[DeckEntry] {
        &self.decks
    }

    /// Number of loaded decks.
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    /// Returns `true` if no deck was loaded.
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Number of records rejected during loading.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Iterate over decks in catalog order.
    pub fn iter(&self) -> slice::Iter<'_, DeckEntry> {
        self.decks.iter()
    }

    /// Decks carrying `tag`, compared after normalization.
    pub fn with_tag<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a DeckEntry> + use<'a> {
        let wanted = normalize(tag);
        self.decks
            .iter()
            .filter(move |deck| deck.has_normalized_tag(&wanted))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a DeckEntry;
    type IntoIter = slice::Iter<'a, DeckEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
