//! Card-name canonicalization.
//!
//! Every name that enters an [`Inventory`](crate::Inventory) or a
//! [`DeckEntry`](crate::DeckEntry) passes through [`normalize`] first, so
//! that spellings differing only in surrounding whitespace, letter case, or
//! Unicode compatibility form compare equal.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use unicode_casefold::UnicodeCaseFold;
use unicode_normalization::UnicodeNormalization;

/// A card name in canonical comparison form.
///
/// Values of this type can only be produced by [`normalize`] (or
/// [`NormalizedName::new`], which calls it), so a `NormalizedName` is never
/// accidentally compared against a raw, un-normalized string.
///
/// # Examples
///
/// ```
/// use deckmatch::NormalizedName;
///
/// let a = NormalizedName::new("  Sol Ring ");
/// let b = NormalizedName::new("SOL RING");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "sol ring");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// Normalize `raw` into a comparison key. Shorthand for [`normalize`].
    pub fn new(raw: &str) -> Self {
        normalize(raw)
    }

    /// Returns the normalized key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the key is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the key and returns the underlying `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NormalizedName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by `NormalizedName` be queried with `&str`. Callers are
// expected to pass already-normalized text.
impl Borrow<str> for NormalizedName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize a raw card name into a [`NormalizedName`].
///
/// The pipeline is:
///
/// 1. NFKC (compatibility decomposition followed by canonical composition),
///    which folds full-width forms, ligatures and decomposed accents into one
///    representation.
/// 2. Full Unicode case folding, which is stronger than lowercasing
///    (e.g. `"ß"` folds to `"ss"`, final sigma folds to sigma).
/// 3. NFKC again, since case folding can emit sequences that are no longer in
///    composed form. This keeps the function idempotent.
/// 4. Trimming of leading and trailing whitespace.
///
/// Never fails: the empty string normalizes to the empty key.
///
/// # Examples
///
/// ```
/// use deckmatch::normalize;
///
/// // Full-width letters and case collapse to the same key.
/// assert_eq!(normalize("\u{FF33}OL RING"), normalize("sol ring"));
///
/// // Precomposed and decomposed accents are equivalent.
/// assert_eq!(normalize("Jötun Grunt"), normalize("Jo\u{0308}tun Grunt"));
///
/// // Idempotent.
/// let once = normalize("  Æther Vial ");
/// assert_eq!(normalize(&once), once);
/// ```
pub fn normalize(raw: &str) -> NormalizedName {
    let trimmed = raw.trim();

    // ASCII fast path: NFKC is the identity on ASCII, and full case folding
    // of ASCII is plain lowercasing.
    if trimmed.is_ascii() {
        return NormalizedName(trimmed.to_ascii_lowercase());
    }

    let folded: String = trimmed.nfkc().case_fold().nfkc().collect();
    NormalizedName(folded.trim().to_owned())
}
