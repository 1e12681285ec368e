//! The core state machine bridging a scrolled document and its active section.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the reader
//! scrolls. Every change to the viewport (scrolling, jumping, resizing) is turned into one
//! observation pass, and the resulting batch of visibility reports is applied to the tracker,
//! which recomputes the active section once.

use crate::config::Config;
use crate::formats::markdown::MarkdownFormat;
use crate::input;
use crate::observer::{RootMargin, Viewport, ViewportObserver};
use crate::section::{self, Section};
use crate::tracker::SectionTracker;
use crate::Result;
use std::fs;
use std::path::PathBuf;

#[derive(PartialEq, Eq, Debug)]
/// Determines navigation scope and quit behavior based on project size.
pub enum FileMode {
    /// Single-file mode quits directly to shell.
    Single,
    /// Multi-file mode returns to file list before quitting.
    Multi,
}

#[derive(PartialEq, Eq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Displays available files for multi-file projects.
    FileList,
    /// Shows the document with its section sidebar.
    Reader,
}

/// Reader session: the open document, its viewport and the active-section tracker.
pub struct AppState {
    /// File paths available for reading.
    pub files: Vec<PathBuf>,
    /// Selected file in the file list view.
    pub current_file_index: usize,
    /// Controls navigation behavior and file list visibility.
    pub file_mode: FileMode,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Rendered rows of the open document.
    pub lines: Vec<String>,
    /// Sections of the open document in document order.
    pub sections: Vec<Section>,
    /// First document row on screen.
    pub offset: usize,
    /// Rows available to the document pane.
    pub viewport_height: usize,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    thresholds: Vec<f64>,
    margin: RootMargin,
    observer: ViewportObserver,
    tracker: SectionTracker,
}

impl AppState {
    #[must_use]
    /// Initialises an empty session over `files` using the observation settings in `cfg`.
    ///
    /// Single-file sessions start in the reader, multi-file ones on the file list.
    pub fn new(files: Vec<PathBuf>, cfg: &Config) -> Self {
        let file_mode = if files.len() == 1 {
            FileMode::Single
        } else {
            FileMode::Multi
        };
        let current_view = if file_mode == FileMode::Single {
            View::Reader
        } else {
            View::FileList
        };
        let margin = cfg.root_margin();

        Self {
            files,
            current_file_index: 0,
            file_mode,
            current_view,
            lines: Vec::new(),
            sections: Vec::new(),
            offset: 0,
            viewport_height: 0,
            message: None,
            observer: ViewportObserver::new(Vec::new(), &cfg.thresholds, margin),
            thresholds: cfg.thresholds.clone(),
            margin,
            tracker: SectionTracker::new(Vec::new(), cfg.fallback()),
        }
    }

    /// Reads and opens the file at `index` in [`files`](Self::files).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open_file(&mut self, index: usize) -> Result<()> {
        let Some(path) = self.files.get(index).cloned() else {
            return Ok(());
        };
        let source = fs::read_to_string(&path)?;
        let sections =
            input::sections_from_source(&source, &path.to_string_lossy(), &MarkdownFormat)?;
        self.current_file_index = index;
        self.open_document(&source, sections);
        self.current_view = View::Reader;
        if self.sections.is_empty() {
            self.message = Some(format!("No sections in {}", path.display()));
        }
        Ok(())
    }

    /// Replaces the open document, resetting scroll position and tracking state.
    pub fn open_document(&mut self, source: &str, sections: Vec<Section>) {
        self.lines = source.lines().map(str::to_string).collect();
        self.observer = ViewportObserver::new(
            sections.iter().map(Section::span).collect(),
            &self.thresholds,
            self.margin,
        );
        self.tracker.reset();
        self.tracker.set_order(section::document_order(&sections));
        self.sections = sections;
        self.offset = 0;
        self.message = None;
        self.refresh();
    }

    /// Returns to the file list, keeping the last document loaded.
    pub fn close_document(&mut self) {
        self.current_view = View::FileList;
    }

    /// Observes the current viewport and feeds the reports to the tracker.
    fn refresh(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        let batch = self.observer.observe(self.viewport());
        self.tracker.apply(batch);
    }

    #[must_use]
    /// The window of rows currently on screen.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            offset: self.offset,
            height: self.viewport_height,
        }
    }

    /// Updates the pane height, e.g. after a terminal resize.
    pub fn set_viewport_height(&mut self, height: usize) {
        if height == self.viewport_height {
            return;
        }
        self.viewport_height = height;
        self.offset = self.offset.min(self.max_offset());
        self.refresh();
    }

    #[must_use]
    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_height)
    }

    /// Scrolls so that `offset` is the first row on screen, clamped to the document.
    pub fn scroll_to(&mut self, offset: usize) {
        let offset = offset.min(self.max_offset());
        if offset == self.offset {
            return;
        }
        self.offset = offset;
        self.refresh();
    }

    /// Scrolls down by `rows` rows.
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_to(self.offset.saturating_add(rows));
    }

    /// Scrolls up by `rows` rows.
    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_to(self.offset.saturating_sub(rows));
    }

    /// Scrolls down by one screen.
    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height.max(1));
    }

    /// Scrolls up by one screen.
    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height.max(1));
    }

    /// Jumps to the start of the document.
    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0);
    }

    /// Jumps to the end of the document.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(self.max_offset());
    }

    /// Brings the heading of section `index` to the top of the viewport.
    pub fn jump_to_section(&mut self, index: usize) {
        if let Some(line) = self.sections.get(index).map(|s| s.line_start) {
            self.scroll_to(line);
        }
    }

    #[must_use]
    /// The first section whose jump would move the viewport down.
    ///
    /// Headings past [`max_offset`](Self::max_offset) can only be scrolled to the bottom, so
    /// they are compared at that clamped offset; at the bottom there is no next section.
    pub fn find_next_section(&self) -> Option<usize> {
        let max_offset = self.max_offset();
        self.sections
            .iter()
            .position(|s| s.line_start.min(max_offset) > self.offset)
    }

    #[must_use]
    /// The last section whose heading lies above the top of the viewport.
    pub fn find_prev_section(&self) -> Option<usize> {
        self.sections
            .iter()
            .rposition(|s| s.line_start < self.offset)
    }

    #[must_use]
    /// The section containing the active one.
    pub fn navigate_to_parent(&self) -> Option<usize> {
        self.active_index()
            .and_then(|idx| self.sections[idx].parent_index)
    }

    #[must_use]
    /// Index into [`sections`](Self::sections) of the active section.
    pub fn active_index(&self) -> Option<usize> {
        let active = self.tracker.active()?;
        self.sections.iter().position(|s| &s.id == active)
    }

    #[must_use]
    /// The active section, if any section is in view.
    pub fn active_section(&self) -> Option<&Section> {
        self.active_index().map(|idx| &self.sections[idx])
    }

    #[must_use]
    /// Titles leading to the active section, joined for display.
    pub fn breadcrumb(&self) -> Option<String> {
        self.active_index()
            .map(|idx| section::ancestry(&self.sections, idx).join(" > "))
    }

    #[must_use]
    /// Whether section `index` has been seen past the lowest threshold at some point.
    pub fn was_visited(&self, index: usize) -> bool {
        self.sections
            .get(index)
            .is_some_and(|s| self.tracker.was_visited(&s.id))
    }

    #[must_use]
    /// Number of distinct sections that have been visited.
    pub fn visited_count(&self) -> usize {
        self.tracker.visited_count()
    }

    #[must_use]
    /// The tracker driving active-section selection.
    pub fn tracker(&self) -> &SectionTracker {
        &self.tracker
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
