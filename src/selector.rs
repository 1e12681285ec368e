//! Picks the one section that should be highlighted as active.
//!
//! The winner is the visible section with the largest intersection ratio. Ratio alone flickers
//! near section boundaries, where two neighbours report almost the same visible fraction, so
//! equal ratios are broken by the section whose top edge sits highest: the one the reader has
//! scrolled furthest into. Comparisons are strict, so scan order (document order) never decides
//! between two candidates that differ in either ratio or top.

use crate::visibility::{SectionId, VisibilityStore};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// What to return when no visible section has a recorded entry.
pub enum Fallback {
    /// The first visible section in document order.
    #[default]
    DocumentOrder,
    /// The previously active section if it is still visible, else the first visible one.
    PreviousActive,
}

#[derive(Clone, Copy, Debug, Default)]
/// Computes the active section from document order, the visible set and the visibility store.
pub struct ActiveSectionSelector {
    fallback: Fallback,
}

impl ActiveSectionSelector {
    #[must_use]
    /// Creates a selector using the given fallback policy.
    pub fn new(fallback: Fallback) -> Self {
        Self { fallback }
    }

    #[must_use]
    /// The fallback policy in effect.
    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    #[must_use]
    /// Selects the active section among `visible`, scanned in `order`.
    ///
    /// `previous` is only consulted under [`Fallback::PreviousActive`]. Returns `None` exactly
    /// when no id of `order` is in `visible`.
    pub fn select<'a>(
        &self,
        order: &'a [SectionId],
        visible: &HashSet<SectionId>,
        store: &VisibilityStore,
        previous: Option<&SectionId>,
    ) -> Option<&'a SectionId> {
        let mut in_view = order.iter().filter(|id| visible.contains(*id));

        if let Some(best) = best_candidate(in_view.clone(), store) {
            return Some(best);
        }

        if self.fallback == Fallback::PreviousActive {
            if let Some(kept) = previous.and_then(|prev| in_view.clone().find(|id| *id == prev)) {
                return Some(kept);
            }
        }

        in_view.next()
    }
}

#[must_use]
/// Single pass over `candidates` keeping the best entry seen so far.
///
/// Candidates without a recorded entry are skipped. Returns `None` if none had one.
pub fn best_candidate<'a>(
    candidates: impl IntoIterator<Item = &'a SectionId>,
    store: &VisibilityStore,
) -> Option<&'a SectionId> {
    let mut best_id = None;
    let mut best_ratio = -1.0_f64;
    let mut best_top = f64::INFINITY;

    for id in candidates {
        let Some(entry) = store.get(id.as_str()) else {
            continue;
        };
        let ratio = entry.intersection_ratio;
        #[allow(clippy::float_cmp)]
        let wins = ratio > best_ratio || (ratio == best_ratio && entry.top < best_top);
        if wins {
            best_id = Some(id);
            best_ratio = ratio;
            best_top = entry.top;
        }
    }

    best_id
}

#[must_use]
/// Active section with the plain document-order fallback.
pub fn select_active<'a>(
    order: &'a [SectionId],
    visible: &HashSet<SectionId>,
    store: &VisibilityStore,
) -> Option<&'a SectionId> {
    ActiveSectionSelector::default().select(order, visible, store, None)
}

#[cfg(test)]
#[path = "tests/selector.rs"]
mod tests;
