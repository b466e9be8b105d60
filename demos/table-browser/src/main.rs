//! Table browser - datatable example
//!
//! Loads rows, column descriptions and a configuration from JSON and lets
//! you search, sort and page through them in the terminal:
//! - Event (keyboard) -> DataTable method -> TableAction dispatched
//! - Reducer re-runs Search -> Sort -> Pagination
//! - If anything changed, re-render
//!
//! # Usage
//!
//! ```sh
//! # Bundled sample data
//! cargo run -p table-browser
//!
//! # Your own data
//! cargo run -p table-browser -- --data rows.json --columns columns.json --config config.json
//! ```

use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datatable::prelude::*;
use datatable::{columns_from_json, rows_from_json, SignalReceiver};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table},
    Frame, Terminal,
};

const SAMPLE_ROWS: &str = include_str!("../data/employees.json");
const SAMPLE_COLUMNS: &str = include_str!("../data/columns.json");
const SAMPLE_CONFIG: &str = include_str!("../data/config.json");

/// Browse a JSON data set as a searchable, sortable, paged table
#[derive(Parser, Debug)]
#[command(name = "table-browser")]
struct Args {
    /// JSON array of row objects
    #[arg(long, short)]
    data: Option<PathBuf>,

    /// JSON array of `{ "title", "data", "type"? }` column descriptions
    #[arg(long, short)]
    columns: Option<PathBuf>,

    /// JSON configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Infer untyped column kinds once per column instead of per compared pair
    #[arg(long)]
    per_column: bool,

    /// Compare strings by code point instead of accent- and case-aware collation
    #[arg(long)]
    ordinal: bool,
}

fn read_or(path: Option<&Path>, fallback: &str) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => Ok(fallback.to_string()),
    }
}

fn load_table(args: &Args) -> Result<DataTable<LoggingMiddleware>, Box<dyn Error>> {
    let rows = rows_from_json(&read_or(args.data.as_deref(), SAMPLE_ROWS)?)?;
    let columns = columns_from_json(&read_or(args.columns.as_deref(), SAMPLE_COLUMNS)?)?;
    let config = TableConfig::from_json(&read_or(args.config.as_deref(), SAMPLE_CONFIG)?)?;

    let mut state = TableState::new(rows, columns, config);
    if args.per_column {
        state = state.with_inference(InferenceMode::PerColumn);
    }
    if args.ordinal {
        state = state.with_collator(Arc::new(OrdinalCollator));
    }
    Ok(DataTable::with_middleware(state, LoggingMiddleware::new()))
}

// ============================================================================
// App - the table plus purely visual state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

struct App {
    table: DataTable<LoggingMiddleware>,
    signals: SignalReceiver,
    selected_column: usize,
    mode: Mode,
    status: String,
    quit: bool,
}

impl App {
    fn new(table: DataTable<LoggingMiddleware>) -> Self {
        let signals = table.subscribe();
        Self {
            table,
            signals,
            selected_column: 0,
            mode: Mode::Browse,
            status: String::new(),
            quit: false,
        }
    }

    /// Map a key to table interactions. Returns `true` if a re-render is needed.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let changed = match self.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::Browse => self.handle_browse_key(key),
        };
        self.collect_signals();
        changed
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        let mut term = self.table.search_term().to_string();
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.mode = Mode::Browse;
                return true;
            }
            KeyCode::Backspace => {
                term.pop();
            }
            KeyCode::Char(c) => term.push(c),
            _ => return false,
        }
        self.table.set_search_term(term);
        true
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        let column_count = self.table.columns().len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit = true;
                false
            }
            KeyCode::Char('/') if self.table.config().features.search => {
                self.mode = Mode::Search;
                true
            }
            KeyCode::Left | KeyCode::Char('h') if column_count > 0 => {
                self.selected_column = (self.selected_column + column_count - 1) % column_count;
                true
            }
            KeyCode::Right | KeyCode::Char('l') if column_count > 0 => {
                self.selected_column = (self.selected_column + 1) % column_count;
                true
            }
            KeyCode::Enter | KeyCode::Char('s') => {
                let selected = self.table.columns().get(self.selected_column);
                match selected.map(|column| column.key.clone()) {
                    Some(key) => self.table.activate_sort(&key),
                    None => false,
                }
            }
            KeyCode::Char('n') | KeyCode::PageDown => self.table.increment_page(),
            KeyCode::Char('p') | KeyCode::PageUp => self.table.decrement_page(),
            KeyCode::Char('g') | KeyCode::Home => self.table.select_page(1),
            KeyCode::Char('G') | KeyCode::End => {
                let last = self.table.pagination_summary().total_pages;
                self.table.select_page(last)
            }
            KeyCode::Char('+') => self.step_rows_per_page(1),
            KeyCode::Char('-') => self.step_rows_per_page(-1),
            KeyCode::Char('1') => self.toggle(Feature::Search),
            KeyCode::Char('2') => self.toggle(Feature::Pagination),
            KeyCode::Char('3') => self.toggle(Feature::Sortable),
            _ => false,
        }
    }

    fn step_rows_per_page(&mut self, step: isize) -> bool {
        let summary = self.table.pagination_summary();
        let options = &summary.rows_per_page_options;
        if options.is_empty() {
            return false;
        }
        let current = summary
            .rows_per_page
            .and_then(|rpp| options.iter().position(|o| *o == rpp))
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(options.len() as isize) as usize;
        self.table.change_rows_per_page(options[next])
    }

    fn toggle(&mut self, feature: Feature) -> bool {
        let enabled = self.table.config().features.get(feature);
        if feature == Feature::Search && enabled {
            self.mode = Mode::Browse;
        }
        self.table.set_feature(feature, !enabled)
    }

    fn collect_signals(&mut self) {
        for signal in self.signals.drain().signals {
            self.status = match signal {
                TableSignal::FilterChanged { matched } => format!("{matched} matching rows"),
                TableSignal::DataReplaced { rows } => format!("Loaded {rows} rows"),
            };
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(frame: &mut Frame, app: &App) {
    let [search_area, table_area, footer_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_search(frame, app, search_area);
    render_table(frame, app, table_area);
    render_footer(frame, app, footer_area);

    let help = Paragraph::new(concat!(
        "/: search  ←/→: column  s: sort  n/p: page  g/G: first/last  ",
        "+/-: rows  1/2/3: features  q: quit",
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area);
}

fn render_search(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let features = app.table.config().features;
    let flag = |name: &str, on: bool| {
        Span::styled(
            format!(" {name}:{} ", if on { "on" } else { "off" }),
            Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
        )
    };
    let border = if app.mode == Mode::Search {
        Color::Yellow
    } else {
        Color::Cyan
    };
    let title = Line::from(vec![
        Span::raw(" Search "),
        flag("search", features.search),
        flag("pagination", features.pagination),
        flag("sortable", features.sortable),
    ]);
    let cursor = if app.mode == Mode::Search { "▏" } else { "" };
    let search = Paragraph::new(format!("{}{cursor}", app.table.search_term())).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(search, area);
}

fn render_table(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let table = &app.table;
    let columns = table.columns();

    let header = TableRow::new(columns.iter().enumerate().map(|(i, column)| {
        let glyph = match table.sort_indicator(&column.key) {
            Some(SortOrder::Asc) => " ▲",
            Some(SortOrder::Desc) => " ▼",
            None => "",
        };
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if i == app.selected_column {
            style = style.fg(Color::Black).bg(Color::Cyan);
        }
        Cell::from(format!("{}{glyph}", column.title)).style(style)
    }));

    let rows = table.visible_rows().iter().map(|row| {
        TableRow::new(
            columns
                .iter()
                .map(|column| Cell::from(table.format_cell(row, column))),
        )
    });

    let widths = vec![Constraint::Fill(1); columns.len().max(1)];
    let widget = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Rows "));
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let summary = app.table.pagination_summary();

    let mut buttons: Vec<Span> = vec![Span::raw(if app.table.can_go_previous() {
        "‹ "
    } else {
        "  "
    })];
    for button in &summary.page_buttons {
        let style = match button.page() {
            Some(page) if app.table.is_active(Some(page)) => {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            }
            _ => Style::default(),
        };
        buttons.push(Span::styled(format!(" {button} "), style));
    }
    buttons.push(Span::raw(if app.table.can_go_next() { " ›" } else { "  " }));

    let rows_per_page = summary
        .rows_per_page
        .map_or_else(|| "all".to_string(), |n| n.to_string());
    let lines = vec![
        Line::from(vec![
            Span::raw(summary.to_string()),
            Span::styled(
                format!("   {rows_per_page} per page   {}", app.status),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(buttons),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

// ============================================================================
// Main - Setup terminal, run event loop, cleanup
// ============================================================================

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let table = load_table(&args)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(table));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(result?)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    let mut should_render = true;

    while !app.quit {
        if should_render {
            terminal.draw(|frame| render(frame, &app))?;
            should_render = false;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                should_render = app.handle_key(key);
            }
            Event::Resize(..) => should_render = true,
            _ => {}
        }
    }
    Ok(())
}
