//! The UI renders the application state into a document pane and a section sidebar.
//!
//! The draw function dispatches based on the current view (file list or reader). The sidebar
//! shows the section tree with box-drawing characters and highlights the active section; the
//! document pane reports its height back to the state so the viewport can be observed.

use crate::app_state::{AppState, View};
use crate::config::Config;
use crate::section::Section;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    match app.current_view {
        View::FileList => draw_file_list(f, app),
        View::Reader => draw_reader(f, app, cfg),
    }
}

/// Generate box-drawing prefix for tree structure
fn get_tree_prefix(level: usize, is_last: bool, parent_states: &[bool]) -> String {
    if level <= 1 {
        return String::new();
    }

    let mut prefix = String::new();

    // Vertical lines for ancestors that still have siblings below
    for i in 1..level.saturating_sub(1) {
        if parent_states.get(i).copied().unwrap_or(false) {
            prefix.push_str("│  ");
        } else {
            prefix.push_str("   ");
        }
    }

    if is_last {
        prefix.push_str("└─ ");
    } else {
        prefix.push_str("├─ ");
    }

    prefix
}

/// For each section, whether no later sibling follows it at the same level.
fn last_at_level(sections: &[Section]) -> Vec<bool> {
    sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            !sections[i + 1..]
                .iter()
                .take_while(|next| next.level >= section.level)
                .any(|next| next.level == section.level)
        })
        .collect()
}

fn draw_file_list(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let style = if i == app.current_file_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(format!("📄 {}", path.display())).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Files ({})", app.files.len())),
    );
    f.render_widget(list, chunks[0]);

    let help = app
        .message
        .clone()
        .unwrap_or_else(|| "↑/↓: Select | Enter: Open | q: Quit".to_string());
    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, chunks[1]);
}

fn draw_reader(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(cfg.sidebar_width), Constraint::Min(0)])
        .split(rows[0]);

    let doc_block = Block::default().borders(Borders::ALL).title(document_title(app));
    let inner = doc_block.inner(columns[1]);
    app.set_viewport_height(usize::from(inner.height));

    draw_sidebar(f, app, columns[0]);

    f.render_widget(doc_block, columns[1]);
    f.render_widget(Paragraph::new(visible_lines(app)), inner);

    let status = app.message.clone().unwrap_or_else(|| {
        let crumb = app.breadcrumb().unwrap_or_else(|| "-".to_string());
        format!(
            "{crumb} | visited {}/{} | ↑/↓ PgUp/PgDn: Scroll | n/p: Next/Prev | ←: Parent | q: Quit",
            app.visited_count(),
            app.sections.len()
        )
    });
    let status_widget = Paragraph::new(status).block(Block::default().borders(Borders::ALL));
    f.render_widget(status_widget, rows[1]);
}

fn document_title(app: &AppState) -> String {
    app.files
        .get(app.current_file_index)
        .map_or_else(|| "Document".to_string(), |p| p.display().to_string())
}

fn draw_sidebar(f: &mut Frame, app: &AppState, area: Rect) {
    let active = app.active_index();
    let is_last = last_at_level(&app.sections);
    let mut parent_has_siblings: Vec<bool> = Vec::new();

    let items: Vec<ListItem> = app
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            parent_has_siblings.truncate(section.level);
            parent_has_siblings.resize(section.level, false);
            let prefix = get_tree_prefix(section.level, is_last[i], &parent_has_siblings);
            if let Some(slot) = parent_has_siblings.last_mut() {
                *slot = !is_last[i];
            }

            let style = if Some(i) == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if app.was_visited(i) {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::raw(section.title.clone()),
            ]))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Sections"));
    f.render_widget(list, area);
}

fn visible_lines(app: &AppState) -> Vec<Line<'static>> {
    let active_heading = app.active_section().map(|s| s.line_start);
    let heading_rows: Vec<usize> = app.sections.iter().map(|s| s.line_start).collect();

    app.lines
        .iter()
        .enumerate()
        .skip(app.offset)
        .take(app.viewport_height)
        .map(|(row, text)| {
            let style = if Some(row) == active_heading {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if heading_rows.contains(&row) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::styled(text.clone(), style)
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
