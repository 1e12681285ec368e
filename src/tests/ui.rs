use super::{draw, get_tree_prefix, last_at_level};
use crate::app_state::AppState;
use crate::config::Config;
use crate::formats::markdown::MarkdownFormat;
use crate::input::sections_from_source;
use ratatui::{backend::TestBackend, Terminal};
use std::path::PathBuf;

const DOC: &str = "# A\n\n## A1\n\n## A2\n\n### A2a\n\n# B\n";

#[test]
fn test_tree_prefix() {
    assert_eq!(get_tree_prefix(1, true, &[]), "");
    assert_eq!(get_tree_prefix(2, false, &[false, true]), "├─ ");
    assert_eq!(get_tree_prefix(3, true, &[false, true, false]), "│  └─ ");
    assert_eq!(get_tree_prefix(3, true, &[false, false, false]), "   └─ ");
}

#[test]
fn test_last_at_level() {
    let sections = sections_from_source(DOC, "doc.md", &MarkdownFormat).unwrap();
    assert_eq!(last_at_level(&sections), vec![false, false, true, true, true]);
}

#[test]
fn test_draw_reports_viewport_height() {
    let sections = sections_from_source(DOC, "doc.md", &MarkdownFormat).unwrap();
    let cfg = Config::default();
    let mut app = AppState::new(vec![PathBuf::from("doc.md")], &cfg);
    app.open_document(DOC, sections);

    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    terminal.draw(|f| draw(f, &mut app, &cfg)).unwrap();

    // 20 rows minus the 3-row status bar minus the document border.
    assert_eq!(app.viewport_height, 15);
    assert_eq!(
        app.active_section().map(|s| s.title.as_str()),
        Some("A"),
        "First draw observes the viewport"
    );
}
