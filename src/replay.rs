//! Headless mode: feed recorded visibility notifications through the tracker.
//!
//! Input is newline-delimited JSON. A record may replace the document order, carry a batch of
//! visibility reports, or both (the order is applied first). Every record with entries is one
//! batch and produces exactly one output line describing the recomputation.

use crate::selector::Fallback;
use crate::tracker::{Report, SectionTracker};
use crate::visibility::{SectionId, VisibilityEntry};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

#[derive(Debug, Deserialize)]
/// One line of a replay stream.
pub struct ReplayRecord {
    #[serde(default)]
    /// New document order, if the record changes it.
    pub order: Option<Vec<SectionId>>,
    #[serde(default)]
    /// Visibility reports forming one batch.
    pub entries: Vec<ReplayEntry>,
}

#[derive(Debug, Deserialize)]
/// A single recorded visibility report.
pub struct ReplayEntry {
    /// Section reported on.
    pub id: SectionId,
    /// Visible fraction, absent when only membership was recorded.
    #[serde(default)]
    pub ratio: Option<f64>,
    /// Top-edge offset; defaults to 0 when a ratio is given without it.
    #[serde(default)]
    pub top: Option<f64>,
    /// Whether the section is in view; defaults to `ratio > 0`.
    #[serde(default)]
    pub visible: Option<bool>,
}

impl From<ReplayEntry> for Report {
    fn from(entry: ReplayEntry) -> Self {
        let measured = entry
            .ratio
            .map(|ratio| VisibilityEntry::new(ratio, entry.top.unwrap_or(0.0)));
        let is_intersecting = entry
            .visible
            .unwrap_or_else(|| measured.is_some_and(|m| m.intersection_ratio > 0.0));
        Self {
            id: entry.id,
            entry: measured,
            is_intersecting,
            visited: is_intersecting,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
/// Result of one replayed batch, written as one JSON line.
pub struct ReplayOutput {
    /// 1-based batch number.
    pub batch: usize,
    /// Active section after the batch.
    pub active: Option<SectionId>,
    /// Whether the active section changed in this batch.
    pub changed: bool,
    /// Visible sections in document order.
    pub visible: Vec<SectionId>,
    /// Distinct sections seen so far.
    pub visited: usize,
}

/// Replays `input` through a tracker starting from `order`, writing one line per batch.
///
/// Returns the number of batches processed.
///
/// # Errors
///
/// Returns [`Error::Replay`] with the offending line number for malformed records, or an I/O
/// error if reading or writing fails.
pub fn run(
    input: impl BufRead,
    mut output: impl Write,
    order: Vec<SectionId>,
    fallback: Fallback,
) -> Result<usize> {
    let mut tracker = SectionTracker::new(order, fallback);
    let mut batches = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ReplayRecord = serde_json::from_str(&line).map_err(|source| Error::Replay {
            line: index + 1,
            source,
        })?;

        if let Some(order) = record.order {
            tracing::debug!(sections = order.len(), "replay replaced document order");
            tracker.set_order(order);
        }
        if record.entries.is_empty() {
            continue;
        }

        batches += 1;
        let result = tracker.apply(record.entries);
        let out = ReplayOutput {
            batch: batches,
            active: result.active,
            changed: result.active_changed,
            visible: tracker.visible_by_order().to_vec(),
            visited: tracker.visited_count(),
        };
        serde_json::to_writer(&mut output, &out)?;
        writeln!(output)?;
    }

    output.flush()?;
    Ok(batches)
}

#[cfg(test)]
#[path = "tests/replay.rs"]
mod tests;
