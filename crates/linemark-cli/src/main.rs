mod app;

use anyhow::Result;
use app::{App, Pane, check_file};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use linemark_config::Config;
use linemark_engine::{Cmd, EncodeOptions, Label, io};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let options = config
        .as_ref()
        .map(Config::encode_options)
        .unwrap_or_default();

    if args.get(1).map(String::as_str) == Some("check") {
        if args.len() < 3 {
            eprintln!("Usage: {} check <file>...", args[0]);
            process::exit(1);
        }
        let failures = run_check(&args[2..], options);
        process::exit(if failures == 0 { 0 } else { 1 });
    }

    let documents_path;
    let from_config;

    if args.len() == 2 {
        // CLI argument provided - use it
        documents_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        match config {
            Some(config) => {
                documents_path = config.documents_path;
                from_config = true;
            }
            None => {
                eprintln!("Error: No documents path provided and no config file found");
                eprintln!("Usage: {} <documents-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [documents-folder-path]", args[0]);
        eprintln!("       {} check <file>...", args[0]);
        process::exit(1);
    };

    if let Err(e) = io::validate_documents_dir(&documents_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Documents path '{}'{} is invalid: {e}",
            documents_path.display(),
            source
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res =
        App::new(documents_path, options).and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Parse and verify each file, one report line per file. Returns the failure count.
fn run_check(paths: &[String], options: EncodeOptions) -> usize {
    let mut failures = 0;
    for path in paths {
        match check_file(Path::new(path), options) {
            Ok(outline) => println!("ok    {path} ({} lines)", outline.len()),
            Err(e) => {
                failures += 1;
                println!("FAIL  {path}: {e:#}");
            }
        }
    }
    failures
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match (app.focus, key.code) {
            (_, KeyCode::Char('q')) => return Ok(()),
            (_, KeyCode::Tab) => app.toggle_focus(),
            (_, KeyCode::Down | KeyCode::Char('j')) => app.next(),
            (_, KeyCode::Up | KeyCode::Char('k')) => app.previous(),
            (Pane::Files, KeyCode::Enter | KeyCode::Char(' ')) => app.open_selected(),
            (Pane::Outline, KeyCode::Enter) => app.edit(|at| Cmd::InsertBreak { at }),
            (Pane::Outline, KeyCode::Backspace) => app.edit(|at| Cmd::Join { at }),
            (Pane::Outline, KeyCode::Char('d')) => app.edit(|at| Cmd::Delete { at }),
            (Pane::Outline, KeyCode::Char('x')) => app.edit(|at| Cmd::Exclude { at }),
            (Pane::Outline, KeyCode::Char('>')) => app.edit(|at| Cmd::IncreaseIndent { at }),
            (Pane::Outline, KeyCode::Char('<')) => app.edit(|at| Cmd::DecreaseIndent { at }),
            (Pane::Outline, KeyCode::Char('u')) => app.undo(),
            (Pane::Outline, KeyCode::Char('r')) => app.reset(),
            (Pane::Outline, KeyCode::Char('s')) => app.save(),
            _ => {}
        }
    }
}

fn label_style(label: Option<Label>) -> Style {
    match label {
        Some(Label::Delete) => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::CROSSED_OUT),
        Some(Label::Ignore) => Style::default().fg(Color::DarkGray),
        Some(Label::IndentedBlock) => Style::default().add_modifier(Modifier::BOLD),
        _ => Style::default(),
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)].as_ref())
        .split(rows[0]);

    let focused = |pane: Pane| {
        if app.focus == pane {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    // File list panel
    let file_items: Vec<ListItem> = app
        .files
        .iter()
        .map(|path| ListItem::new(Line::from(Span::raw(path.to_string()))))
        .collect();

    let files_list = List::new(file_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focused(Pane::Files))
                .title("Files"),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Outline panel
    let outline_block = Block::default()
        .borders(Borders::ALL)
        .border_style(focused(Pane::Outline));

    match &mut app.document {
        Some(doc) => {
            let title = format!(
                "{}{}",
                doc.relative_path,
                if doc.is_dirty() { " [modified]" } else { "" }
            );
            let items: Vec<ListItem> = doc
                .current
                .lines()
                .iter()
                .map(|line| {
                    let indent = "  ".repeat(line.indent);
                    let label = line.label.map_or(' ', Label::code);
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{:>4} {label} ", line.pointer.to_wire()),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::styled(format!("{indent}{}", line.text), label_style(line.label)),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(outline_block.title(title))
                .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
            f.render_stateful_widget(list, chunks[1], &mut doc.cursor);
        }
        None => {
            let empty = Paragraph::new(vec![Line::from("Select a file to edit its outline")])
                .block(outline_block.title("Outline"));
            f.render_widget(empty, chunks[1]);
        }
    }

    let help = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("q: Quit | Tab: Switch pane | ↑/k ↓/j: Move | "),
            Span::raw("Enter: Break | Bksp: Join | d: Delete | x: Exclude | >/<: Indent | "),
            Span::raw("u: Undo | r: Reset | s: Save"),
        ]),
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Green),
        )),
    ])
    .block(Block::default());

    f.render_widget(help, rows[1]);
}
