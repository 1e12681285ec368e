//! Section identity and the latest visibility signal reported for each section.
//!
//! The store is deliberately dumb: one entry per id, last write wins, nothing is merged and
//! nothing is evicted. A section that scrolls out of view keeps its last-known entry, which is
//! exactly what the selector wants to see.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque, unique identifier of a document section.
pub struct SectionId(String);

impl SectionId {
    #[must_use]
    /// Wraps an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
/// Visibility signal for one section at one moment.
pub struct VisibilityEntry {
    /// Fraction of the section inside the viewport, in `[0, 1]`.
    pub intersection_ratio: f64,
    /// Signed distance from the viewport top to the section's top edge (negative: above).
    pub top: f64,
}

impl VisibilityEntry {
    #[must_use]
    /// Builds an entry, clamping the ratio into `[0, 1]`.
    pub fn new(intersection_ratio: f64, top: f64) -> Self {
        Self {
            intersection_ratio: intersection_ratio.clamp(0.0, 1.0),
            top,
        }
    }
}

#[derive(Default, Debug, Clone)]
/// Latest [`VisibilityEntry`] per [`SectionId`].
pub struct VisibilityStore {
    entries: HashMap<SectionId, VisibilityEntry>,
}

impl VisibilityStore {
    #[must_use]
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `entry` for `id`, replacing whatever was there.
    pub fn update(&mut self, id: SectionId, entry: VisibilityEntry) {
        self.entries.insert(id, entry);
    }

    #[must_use]
    /// The most recent entry for `id`, if one was ever recorded.
    pub fn get(&self, id: &str) -> Option<&VisibilityEntry> {
        self.entries.get(id)
    }

    #[must_use]
    /// Number of sections with a recorded entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every entry. Only used when the tracked document goes away entirely.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "tests/visibility.rs"]
mod tests;
