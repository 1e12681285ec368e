//! Markdown format implementation using tree-sitter-md.
//!
//! Sections come from ATX-style headings (`#` syntax); the marker child gives the level and the
//! `inline` child the title.

use crate::formats::Format;

/// Tree-sitter queries for ATX-style markdown headings (# syntax).
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn section_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn heading_level(&self, heading: tree_sitter::Node<'_>) -> usize {
        let mut cursor = heading.walk();
        let level = heading
            .children(&mut cursor)
            .find_map(|child| {
                child
                    .kind()
                    .strip_prefix("atx_h")
                    .and_then(|rest| rest.strip_suffix("_marker"))
                    .and_then(|digit| digit.parse().ok())
            })
            .unwrap_or(1);
        level
    }

    fn heading_title(&self, heading: tree_sitter::Node<'_>, source: &[u8]) -> String {
        let mut cursor = heading.walk();
        let title = heading
            .children(&mut cursor)
            .find(|child| child.kind() == "inline")
            .and_then(|inline| inline.utf8_text(source).ok())
            .map(|text| text.trim().to_string())
            .unwrap_or_default();
        title
    }
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
