//! sectionspy: a scroll-spy reader for markdown documents.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sectionspy::{app_state, config, formats, input, replay, section, ui, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sectionspy")]
#[command(about = "Scroll-spy reader for markdown: tracks and highlights the active section", long_about = None)]
struct Args {
    /// Files or directories to read
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Replay newline-delimited visibility records instead of opening the reader
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Print the sections of the documents as JSON and exit
    #[arg(long)]
    list: bool,

    /// Write logs to this file (the reader otherwise logs nowhere)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>, headless: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let headless = args.replay.is_some() || args.list;
    init_logging(args.log_file.as_ref(), headless)?;

    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }

    let documents = input::find_documents(args.paths, &cfg.file_extensions)?;
    let format = formats::markdown::MarkdownFormat;

    if let Some(replay_path) = args.replay {
        let order = section::document_order(&input::extract_all_sections(&documents, &format)?);
        let reader = BufReader::new(File::open(&replay_path)?);
        let batches = replay::run(reader, io::stdout().lock(), order, cfg.fallback())?;
        tracing::info!(batches, "replay finished");
        return Ok(());
    }

    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    if args.list {
        let all_sections = input::extract_all_sections(&documents, &format)?;
        let json = serde_json::to_string_pretty(&all_sections)?;
        println!("{json}");
        return Ok(());
    }

    let mut state = app_state::AppState::new(documents, &cfg);
    if state.file_mode == app_state::FileMode::Single {
        state.open_file(0)?;
    }

    run_tui(state, &cfg)
}

fn run_tui(mut app: app_state::AppState, cfg: &config::Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
    cfg: &config::Config,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, cfg))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.current_view {
            app_state::View::FileList => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Up => {
                    app.current_file_index = app.current_file_index.saturating_sub(1);
                }
                KeyCode::Down => {
                    if app.current_file_index + 1 < app.files.len() {
                        app.current_file_index += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Err(e) = app.open_file(app.current_file_index) {
                        app.message = Some(format!("Error opening: {e}"));
                    }
                }
                _ => {}
            },
            app_state::View::Reader => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    if app.file_mode == app_state::FileMode::Multi {
                        app.close_document();
                    } else {
                        return Ok(());
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
                KeyCode::PageUp => app.page_up(),
                KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
                KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
                KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),
                KeyCode::Char('n') | KeyCode::Tab => {
                    if let Some(next) = app.find_next_section() {
                        app.jump_to_section(next);
                    }
                }
                KeyCode::Char('p') | KeyCode::BackTab => {
                    if let Some(prev) = app.find_prev_section() {
                        app.jump_to_section(prev);
                    }
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    if let Some(parent) = app.navigate_to_parent() {
                        app.jump_to_section(parent);
                    }
                }
                _ => {}
            },
        }
    }
}
