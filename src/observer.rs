//! Intersection observation over a line-based viewport.
//!
//! Sections occupy row ranges of the rendered document and the viewport is a window of rows
//! starting at the scroll offset. The observer measures how much of each section falls inside
//! the root rectangle (the viewport adjusted by the root margin) and reports every section whose
//! measurement changed since the previous observation. A section that is out of the root is
//! reported once when it leaves and then stays quiet until it comes back.
//!
//! Thresholds do not gate reporting: the active section is derived from the latest ratio and top
//! of every visible section, so dropping in-bucket movement would make it depend on how the
//! viewport got where it is. They only decide when a section has been seen well enough to count
//! as visited.

use crate::visibility::{SectionId, VisibilityEntry};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Rows covered by one section: `start` inclusive, `end` exclusive.
pub struct SectionSpan {
    /// Section being observed.
    pub id: SectionId,
    /// First row (the heading).
    pub start: usize,
    /// Row after the last one belonging to the section.
    pub end: usize,
}

impl SectionSpan {
    #[must_use]
    /// Span of at least one row.
    pub fn new(id: SectionId, start: usize, end: usize) -> Self {
        Self {
            id,
            start,
            end: end.max(start + 1),
        }
    }

    #[must_use]
    /// Number of rows in the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    /// Always false; spans cover at least one row.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// Window of rows currently on screen.
pub struct Viewport {
    /// First document row shown.
    pub offset: usize,
    /// Number of rows shown.
    pub height: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Growth (positive) or shrinkage (negative) of the root rectangle, as fractions of the
/// viewport height.
pub struct RootMargin {
    /// Applied above the viewport.
    pub top: f64,
    /// Applied below the viewport.
    pub bottom: f64,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: -0.4,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One visibility report for one section.
pub struct Observation {
    /// Section the report is about.
    pub id: SectionId,
    /// Measured ratio and top offset.
    pub entry: VisibilityEntry,
    /// Whether any part of the section lies inside the root rectangle.
    pub is_intersecting: bool,
    /// Whether the ratio reached the lowest threshold.
    pub reached_threshold: bool,
}

/// Reports visibility changes of section spans as the viewport moves.
pub struct ViewportObserver {
    spans: Vec<SectionSpan>,
    thresholds: Vec<f64>,
    margin: RootMargin,
    last: HashMap<SectionId, (bool, VisibilityEntry)>,
}

impl ViewportObserver {
    #[must_use]
    /// Observes `spans` with the given thresholds and root margin.
    ///
    /// Thresholds are clamped into `[0, 1]`, sorted and deduplicated; an empty list means
    /// `[0.0]`, i.e. any intersection counts as a visit.
    pub fn new(spans: Vec<SectionSpan>, thresholds: &[f64], margin: RootMargin) -> Self {
        let mut thresholds: Vec<f64> = thresholds
            .iter()
            .filter(|t| !t.is_nan())
            .map(|t| t.clamp(0.0, 1.0))
            .collect();
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }

        Self {
            spans,
            thresholds,
            margin,
            last: HashMap::new(),
        }
    }

    #[must_use]
    /// Effective thresholds after normalisation.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    #[must_use]
    /// Observed spans in document order.
    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    /// Forgets previous state so the next [`observe`](Self::observe) reports every span.
    pub fn reset(&mut self) {
        self.last.clear();
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    /// Measures `span` against the root rectangle of `viewport`.
    pub fn measure(&self, span: &SectionSpan, viewport: Viewport) -> (VisibilityEntry, bool) {
        let height = viewport.height as f64;
        let offset = viewport.offset as f64;
        let root_top = offset - self.margin.top * height;
        let root_bottom = offset + height + self.margin.bottom * height;

        let start = span.start as f64;
        let end = span.end as f64;
        let overlap = (end.min(root_bottom) - start.max(root_top)).max(0.0);
        let is_intersecting = overlap > 0.0;
        let ratio = overlap / span.len() as f64;

        (VisibilityEntry::new(ratio, start - offset), is_intersecting)
    }

    /// Whether an intersecting entry reaches the lowest threshold.
    fn reaches_threshold(&self, entry: &VisibilityEntry, is_intersecting: bool) -> bool {
        is_intersecting
            && self
                .thresholds
                .first()
                .is_some_and(|t| entry.intersection_ratio >= *t)
    }

    /// Measures every span and returns the ones whose reported state changed.
    ///
    /// A span is reported when it enters or leaves the root, or when it is inside the root and
    /// its ratio or top moved.
    pub fn observe(&mut self, viewport: Viewport) -> Vec<Observation> {
        let mut batch = Vec::new();

        for span in &self.spans {
            let (entry, is_intersecting) = self.measure(span, viewport);
            let unchanged = match self.last.get(&span.id) {
                Some((was_intersecting, _)) if !is_intersecting => !was_intersecting,
                Some(last) => *last == (is_intersecting, entry),
                None => false,
            };
            if unchanged {
                continue;
            }
            batch.push(Observation {
                id: span.id.clone(),
                entry,
                is_intersecting,
                reached_threshold: self.reaches_threshold(&entry, is_intersecting),
            });
        }

        for observation in &batch {
            self.last.insert(
                observation.id.clone(),
                (observation.is_intersecting, observation.entry),
            );
        }

        tracing::trace!(
            offset = viewport.offset,
            height = viewport.height,
            reported = batch.len(),
            "observed viewport"
        );
        batch
    }
}

#[cfg(test)]
#[path = "tests/observer.rs"]
mod tests;
