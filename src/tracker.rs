//! Single-writer owner of the visibility state and the one place recomputation is triggered.
//!
//! Each notification batch is folded into the store and the visible membership first, then the
//! active section is recomputed exactly once over that consistent snapshot. Nothing here blocks
//! or queues: a newer batch simply supersedes the result of the previous one.

use crate::observer::Observation;
use crate::selector::{ActiveSectionSelector, Fallback};
use crate::visibility::{SectionId, VisibilityEntry, VisibilityStore};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
/// One membership report, optionally carrying a measurement.
///
/// Observers always measure; replayed streams may only announce that a section is visible.
pub struct Report {
    /// Section the report is about.
    pub id: SectionId,
    /// Measured visibility, if any.
    pub entry: Option<VisibilityEntry>,
    /// Whether the section is currently in view.
    pub is_intersecting: bool,
    /// Whether this report marks the section as visited.
    pub visited: bool,
}

impl From<Observation> for Report {
    fn from(observation: Observation) -> Self {
        Self {
            id: observation.id,
            entry: Some(observation.entry),
            is_intersecting: observation.is_intersecting,
            visited: observation.reached_threshold,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Outcome of applying one notification batch.
pub struct Recomputation {
    /// Active section after the batch.
    pub active: Option<SectionId>,
    /// Whether the active section differs from before the batch.
    pub active_changed: bool,
    /// Whether the ordered visible list differs from before the batch.
    pub visible_changed: bool,
}

/// Tracks visibility reports for an ordered set of sections and derives the active one.
pub struct SectionTracker {
    order: Vec<SectionId>,
    store: VisibilityStore,
    visible: HashSet<SectionId>,
    visible_by_order: Vec<SectionId>,
    visited: HashSet<SectionId>,
    active: Option<SectionId>,
    selector: ActiveSectionSelector,
}

impl SectionTracker {
    #[must_use]
    /// Starts tracking `order` with nothing visible yet.
    pub fn new(order: Vec<SectionId>, fallback: Fallback) -> Self {
        Self {
            order,
            store: VisibilityStore::new(),
            visible: HashSet::new(),
            visible_by_order: Vec::new(),
            visited: HashSet::new(),
            active: None,
            selector: ActiveSectionSelector::new(fallback),
        }
    }

    /// Replaces the document order; takes effect on the next [`apply`](Self::apply).
    ///
    /// An empty order means there is nothing left to track, so all state is dropped.
    pub fn set_order(&mut self, order: Vec<SectionId>) {
        if order.is_empty() {
            tracing::debug!("document order emptied, resetting tracker");
            self.reset();
        }
        self.order = order;
    }

    /// Forgets every entry, visible id, visited id and the active section.
    pub fn reset(&mut self) {
        self.store.clear();
        self.visible.clear();
        self.visible_by_order.clear();
        self.visited.clear();
        self.active = None;
    }

    /// Applies one batch of reports and recomputes the active section once.
    pub fn apply<I>(&mut self, batch: I) -> Recomputation
    where
        I: IntoIterator,
        I::Item: Into<Report>,
    {
        let mut applied = 0_usize;
        for report in batch {
            let report: Report = report.into();
            applied += 1;
            if report.visited {
                self.visited.insert(report.id.clone());
            }
            if report.is_intersecting {
                self.visible.insert(report.id.clone());
            } else {
                self.visible.remove(&report.id);
            }
            if let Some(entry) = report.entry {
                self.store.update(report.id, entry);
            }
        }
        tracing::trace!(applied, visible = self.visible.len(), "applied visibility batch");

        self.recompute()
    }

    /// Re-runs selection over the current snapshot without new observations.
    pub fn recompute(&mut self) -> Recomputation {
        let visible_by_order: Vec<SectionId> = self
            .order
            .iter()
            .filter(|id| self.visible.contains(*id))
            .cloned()
            .collect();
        let visible_changed = visible_by_order != self.visible_by_order;
        if visible_changed {
            self.visible_by_order = visible_by_order;
        }

        let next = self
            .selector
            .select(&self.order, &self.visible, &self.store, self.active.as_ref())
            .cloned();
        let active_changed = next != self.active;
        if active_changed {
            tracing::debug!(
                from = ?self.active.as_ref().map(SectionId::as_str),
                to = ?next.as_ref().map(SectionId::as_str),
                "active section changed"
            );
            self.active = next;
        }

        Recomputation {
            active: self.active.clone(),
            active_changed,
            visible_changed,
        }
    }

    #[must_use]
    /// The last computed active section.
    pub fn active(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    #[must_use]
    /// Currently visible sections in document order, as of the last recomputation.
    pub fn visible_by_order(&self) -> &[SectionId] {
        &self.visible_by_order
    }

    #[must_use]
    /// Number of distinct sections that have ever been reported as visited.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    #[must_use]
    /// Whether `id` has ever been reported as visited.
    pub fn was_visited(&self, id: &SectionId) -> bool {
        self.visited.contains(id)
    }

    #[must_use]
    /// The tracked document order.
    pub fn order(&self) -> &[SectionId] {
        &self.order
    }

    #[must_use]
    /// Read-only view of the visibility store.
    pub fn store(&self) -> &VisibilityStore {
        &self.store
    }
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;
