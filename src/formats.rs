//! Format trait and implementations for different document types.
//!
//! A format supplies the tree-sitter grammar and the query that finds section headings, plus the
//! rule for reading a heading's level. Only markdown exists today.

pub mod markdown;

/// Grammar and heading queries for one document format.
pub trait Format {
    /// Tree-sitter grammar for the format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing each heading node as `@heading`.
    fn section_query(&self) -> &str;
    /// Nesting level of a captured heading, 1 for top-level.
    fn heading_level(&self, heading: tree_sitter::Node<'_>) -> usize;
    /// Heading text without markup.
    fn heading_title(&self, heading: tree_sitter::Node<'_>, source: &[u8]) -> String;
}
