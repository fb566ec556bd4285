//! Main TUI application state and logic

use crate::parser::{ParseError, Parser, Token};
use crate::ui::panes::{self, TreeRow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    text::Line,
    Frame, Terminal,
};
use std::io;

/// Rows moved by PgUp/PgDn
const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// Source lines, highlighted once up front
    pub highlighted: Vec<Line<'static>>,

    /// The token stream the parser consumed
    pub tokens: Vec<Token>,

    /// Flattened parse tree
    pub tree_rows: Vec<TreeRow>,

    pub lexical_errors: usize,
    pub syntax_errors: Vec<ParseError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane selection and scroll offsets
    pub token_selected: usize,
    pub tree_selected: usize,
    pub source_scroll: usize,
    pub token_scroll: usize,
    pub tree_scroll: usize,

    /// Highlighted source line (1-based)
    pub current_line: Option<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Parse `tokens` and build the explorer state for `source`.
    pub fn new(source: &str, tokens: Vec<Token>, lexical_errors: usize) -> Self {
        let mut parser = Parser::new(tokens);
        let tree = parser.parse_tree();
        let syntax_errors = parser.errors().to_vec();

        let mut app = App {
            highlighted: panes::highlight_source(source),
            tokens: parser.stream.tokens().to_vec(),
            tree_rows: TreeRow::flatten(&tree),
            lexical_errors,
            syntax_errors,
            focused_pane: FocusedPane::Tokens,
            token_selected: 0,
            tree_selected: 0,
            source_scroll: 0,
            token_scroll: 0,
            tree_scroll: 0,
            current_line: None,
            should_quit: false,
            status_message: String::from("Ready!"),
        };
        app.sync_current_line();

        if let Some(err) = app.syntax_errors.first() {
            app.status_message = err.to_string();
        }
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Source on the left, tokens and tree stacked on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        panes::render_source_pane(
            frame,
            columns[0],
            &self.highlighted,
            self.current_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.tokens,
            self.token_selected,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        panes::render_tree_pane(
            frame,
            right_rows[1],
            &self.tree_rows,
            self.tree_selected,
            self.focused_pane == FocusedPane::Tree,
            !self.syntax_errors.is_empty(),
            &mut self.tree_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.lexical_errors,
            self.syntax_errors.len(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
                self.sync_current_line();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
                self.sync_current_line();
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-(PAGE as isize)),
            KeyCode::PageDown => self.move_selection(PAGE as isize),
            KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::End => self.move_selection(isize::MAX),
            _ => {}
        }
    }

    /// Move the focused pane's cursor by `delta`, clamped to its rows
    fn move_selection(&mut self, delta: isize) {
        let (cursor, len) = match self.focused_pane {
            FocusedPane::Tokens => (self.token_selected, self.tokens.len()),
            FocusedPane::Tree => (self.tree_selected, self.tree_rows.len()),
            FocusedPane::Source => (
                self.current_line.unwrap_or(1).saturating_sub(1),
                self.highlighted.len(),
            ),
        };

        if len == 0 {
            return;
        }

        let moved = cursor.saturating_add_signed(delta).min(len - 1);

        match self.focused_pane {
            FocusedPane::Tokens => self.token_selected = moved,
            FocusedPane::Tree => self.tree_selected = moved,
            FocusedPane::Source => self.current_line = Some(moved + 1),
        }
        self.sync_current_line();
    }

    /// Point the source highlight at the focused selection
    fn sync_current_line(&mut self) {
        match self.focused_pane {
            FocusedPane::Tokens => {
                if let Some(token) = self.tokens.get(self.token_selected) {
                    self.current_line = Some(token.location.line);
                    self.status_message = format!("{} at {}", token, token.location);
                }
            }
            FocusedPane::Tree => {
                if let Some(row) = self.tree_rows.get(self.tree_selected) {
                    if let Some(location) = row.location {
                        self.current_line = Some(location.line);
                    }
                    self.status_message = row.text.clone();
                }
            }
            FocusedPane::Source => {}
        }
    }
}
