//! Section representation for tree-sitter parsed documents.
//!
//! A section is a heading plus everything up to the next heading. Each one carries a unique
//! [`SectionId`] so that visibility reports and the navigation sidebar can refer to it, and the
//! row range it occupies so that its visibility inside a viewport can be measured.

use crate::observer::SectionSpan;
use crate::visibility::SectionId;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
/// Hierarchical document division with its identity and coordinates.
pub struct Section {
    /// Unique anchor-style identifier derived from the title.
    pub id: SectionId,
    /// Section heading text without markup symbols.
    pub title: String,
    /// Nesting depth in the document hierarchy (1 for top-level).
    pub level: usize,
    /// Row of the heading (0-indexed).
    pub line_start: usize,
    /// Row where the next section begins or the file ends.
    pub line_end: usize,
    /// Byte offset of the heading.
    pub byte_start: usize,
    /// Byte offset where the section ends.
    pub byte_end: usize,
    /// Source file containing this section.
    pub file_path: String,
    /// Index of the containing section in the hierarchy.
    pub parent_index: Option<usize>,
    /// Indices of directly nested subsections.
    pub children_indices: Vec<usize>,
}

impl Section {
    #[must_use]
    /// Row range of the section, for viewport observation.
    pub fn span(&self) -> SectionSpan {
        SectionSpan::new(self.id.clone(), self.line_start, self.line_end)
    }
}

#[must_use]
/// Section ids in document order.
pub fn document_order(sections: &[Section]) -> Vec<SectionId> {
    sections.iter().map(|s| s.id.clone()).collect()
}

#[must_use]
/// Titles from the root down to `index`, for breadcrumbs.
pub fn ancestry(sections: &[Section], index: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut current = Some(index);
    while let Some(idx) = current {
        let Some(section) = sections.get(idx) else {
            break;
        };
        parts.push(section.title.as_str());
        current = section.parent_index;
    }
    parts.reverse();
    parts
}
