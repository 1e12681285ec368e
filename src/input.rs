//! Locating documents on disk and extracting their sections.
//!
//! Headings are found with the format's tree-sitter query. Each section spans from its heading
//! to the next heading (or end of file), and gets an anchor-style id. Ids are unique within a
//! document, and across documents when they are extracted together, which is what the tracker
//! relies on when several files feed one document order.

use crate::formats::Format;
use crate::section::Section;
use crate::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// Expands files and directories into the list of documents to open.
///
/// Directories are walked recursively; only files whose extension is in `extensions` are kept.
/// Explicit file arguments are kept regardless of extension. The result is sorted within each
/// directory.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_dir(&path, extensions, &mut documents)?;
        } else if path.is_file() {
            documents.push(path);
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }
    }
    Ok(documents)
}

fn walk_dir(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<_>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk_dir(&path, extensions, out)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
        {
            out.push(path);
        }
    }
    Ok(())
}

/// Reads `path` and extracts its sections.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn extract_sections(path: &Path, format: &impl Format) -> Result<Vec<Section>> {
    let source = fs::read_to_string(path)?;
    sections_from_source(&source, &path.to_string_lossy(), format)
}

/// Reads every document and extracts their sections with ids unique across all of them.
///
/// A title repeated in a later document gets the next free suffix (`intro`, then `intro-1`).
/// Parent and child indices stay relative to each document's own sections.
///
/// # Errors
///
/// Returns an error if any file cannot be read or parsed.
pub fn extract_all_sections(
    documents: &[PathBuf],
    format: &impl Format,
) -> Result<Vec<Section>> {
    let mut used_ids = HashSet::new();
    let mut all_sections = Vec::new();
    for path in documents {
        let source = fs::read_to_string(path)?;
        all_sections.extend(collect_sections(
            &source,
            &path.to_string_lossy(),
            format,
            &mut used_ids,
        )?);
    }
    Ok(all_sections)
}

/// Extracts sections from in-memory `source`, attributing them to `file_path`.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded, the query is invalid, or parsing fails.
pub fn sections_from_source(
    source: &str,
    file_path: &str,
    format: &impl Format,
) -> Result<Vec<Section>> {
    collect_sections(source, file_path, format, &mut HashSet::new())
}

fn collect_sections(
    source: &str,
    file_path: &str,
    format: &impl Format,
    used_ids: &mut HashSet<String>,
) -> Result<Vec<Section>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Error::Parse {
            path: PathBuf::from(file_path),
            reason: e.to_string(),
        })?;
    let tree = parser.parse(source, None).ok_or_else(|| Error::Parse {
        path: PathBuf::from(file_path),
        reason: "parser produced no tree".to_string(),
    })?;

    let query = Query::new(&language, format.section_query())?;
    let mut cursor = QueryCursor::new();
    let bytes = source.as_bytes();

    let mut headings = Vec::new();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            headings.push((
                format.heading_title(node, bytes),
                format.heading_level(node),
                node.start_position().row,
                node.start_byte(),
            ));
        }
    }
    headings.sort_by_key(|(_, _, _, byte)| *byte);
    headings.dedup_by_key(|(_, _, _, byte)| *byte);

    let total_lines = source.lines().count();
    let mut sections: Vec<Section> = Vec::with_capacity(headings.len());
    let mut stack: Vec<usize> = Vec::new();

    for (i, (title, level, row, byte)) in headings.iter().enumerate() {
        let (line_end, byte_end) = headings
            .get(i + 1)
            .map_or((total_lines.max(row + 1), source.len()), |next| (next.2, next.3));

        while stack
            .last()
            .is_some_and(|&top| sections[top].level >= *level)
        {
            stack.pop();
        }
        let parent_index = stack.last().copied();
        if let Some(parent) = parent_index {
            sections[parent].children_indices.push(i);
        }
        stack.push(i);

        sections.push(Section {
            id: unique_id(&slugify(title), used_ids).into(),
            title: title.clone(),
            level: *level,
            line_start: *row,
            line_end,
            byte_start: *byte,
            byte_end,
            file_path: file_path.to_string(),
            parent_index,
            children_indices: Vec::new(),
        });
    }

    tracing::debug!(file = file_path, sections = sections.len(), "extracted sections");
    Ok(sections)
}

#[must_use]
/// Anchor-style slug: lowercase alphanumerics, runs of whitespace, `-` or `_` become one `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

fn unique_id(base: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut n = 0;
    while used.contains(&candidate) {
        n += 1;
        candidate = format!("{base}-{n}");
    }
    used.insert(candidate.clone());
    candidate
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
