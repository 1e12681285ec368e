use super::{
    extract_all_sections, extract_sections, find_documents, sections_from_source, slugify,
};
use crate::formats::markdown::MarkdownFormat;
use crate::section::{ancestry, document_order};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const DOC: &str = "# Intro\n\nHello\n\n## Setup\n\nSteps\n\n## Setup\n\nAgain\n\n# Usage\n\nEnd\n";

#[test]
fn test_sections_span_to_next_heading() {
    let sections = sections_from_source(DOC, "doc.md", &MarkdownFormat).unwrap();

    assert_eq!(sections.len(), 4);
    let spans: Vec<(usize, usize)> = sections
        .iter()
        .map(|s| (s.line_start, s.line_end))
        .collect();
    assert_eq!(spans, vec![(0, 4), (4, 8), (8, 12), (12, 15)]);
    assert_eq!(sections[3].byte_end, DOC.len());
}

#[test]
fn test_levels_titles_and_hierarchy() {
    let sections = sections_from_source(DOC, "doc.md", &MarkdownFormat).unwrap();

    assert_eq!(sections[0].title, "Intro");
    assert_eq!(sections[0].level, 1);
    assert_eq!(sections[1].level, 2);
    assert_eq!(sections[1].parent_index, Some(0));
    assert_eq!(sections[2].parent_index, Some(0));
    assert_eq!(sections[0].children_indices, vec![1, 2]);
    assert_eq!(sections[3].parent_index, None);
    assert_eq!(ancestry(&sections, 2), vec!["Intro", "Setup"]);
}

#[test]
fn test_duplicate_titles_get_unique_ids() {
    let sections = sections_from_source(DOC, "doc.md", &MarkdownFormat).unwrap();
    let ids: Vec<String> = document_order(&sections)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(ids, vec!["intro", "setup", "setup-1", "usage"]);
}

#[test]
fn test_fenced_hashes_are_not_headings() {
    let doc = "# Real\n\n```sh\n# just a comment\n```\n";
    let sections = sections_from_source(doc, "doc.md", &MarkdownFormat).unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "Real");
}

#[test]
fn test_document_without_headings_has_no_sections() {
    let sections = sections_from_source("plain text\n", "doc.md", &MarkdownFormat).unwrap();
    assert!(sections.is_empty());
}

#[test]
fn test_extract_sections_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{DOC}").unwrap();

    let sections = extract_sections(file.path(), &MarkdownFormat).unwrap();
    assert_eq!(sections.len(), 4);
    assert_eq!(sections[0].file_path, file.path().to_string_lossy());
}

#[test]
fn test_ids_stay_unique_across_documents() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.md");
    let second = dir.path().join("second.md");
    fs::write(&first, "# Intro\n\none\n").unwrap();
    fs::write(&second, "# Intro\n\ntwo\n\n# Intro 1\n").unwrap();

    let sections = extract_all_sections(&[first, second], &MarkdownFormat).unwrap();
    let ids: Vec<String> = document_order(&sections)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(ids, vec!["intro", "intro-1", "intro-1-1"]);
    assert!(sections[1].file_path.ends_with("second.md"));
    assert_eq!(sections[2].parent_index, None);
}

#[test]
fn test_find_documents_filters_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.md"), "# A\n").unwrap();
    fs::write(dir.path().join("b.txt"), "# B\n").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("c.md"), "# C\n").unwrap();

    let docs = find_documents(vec![dir.path().to_path_buf()], &["md".to_string()]).unwrap();
    let names: Vec<String> = docs
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.md", "c.md"]);
}

#[test]
fn test_find_documents_rejects_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.md");
    assert!(find_documents(vec![missing], &["md".to_string()]).is_err());
}

#[test]
fn test_slugify() {
    assert_eq!(slugify("Getting Started"), "getting-started");
    assert_eq!(slugify("  Hello, World!  "), "hello-world");
    assert_eq!(slugify("snake_case -- and dashes"), "snake-case-and-dashes");
    assert_eq!(slugify("!!!"), "section");
}
