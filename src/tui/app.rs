//! Main application logic for the terminal user interface.
//!
//! `App` owns the board, the drag controller, and the screen state machine
//! (board view, add/edit form, delete confirmation, help). Every input event
//! funnels through here: keyboard and mouse mutate the board, the board
//! persists itself, and the next frame redraws the whole board from the
//! updated list.

use std::io;
use std::time::{Duration, SystemTime};

use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::board::Board;
use crate::fields::Status;
use crate::tui::{
    board_view::{render_board, sanitize, BoardLayout, BoardView},
    card_form::{CardForm, TITLE_FIELD},
    colors::{column_accent, Theme},
    drag::DragController,
    utils::centered_rect,
};

/// Which screen the app is showing.
#[derive(Clone, Copy, PartialEq)]
enum AppState {
    Board,
    AddCard,
    EditCard,
    Confirm,
    Help,
}

/// Poll ticks (50 ms each) between slot mtime probes.
const SLOT_CHECK_TICKS: u32 = 10;

/// Terminal user interface state and event loop.
pub struct App {
    state: AppState,
    board: Board,
    view: BoardView,
    layout: BoardLayout,
    drag: DragController,
    form: CardForm,
    editing_id: Option<String>,
    confirm_id: Option<String>,
    selected_column: usize,
    selected_card: usize,
    scroll: [usize; 3],
    status_message: String,
    theme: Theme,
    slot_mtime: Option<SystemTime>,
    ticks: u32,
}

impl App {
    pub fn new(board: Board) -> Self {
        let view = BoardView::build(board.tasks());
        let slot_mtime = board.storage().modified();
        App {
            state: AppState::Board,
            board,
            view,
            layout: BoardLayout::default(),
            drag: DragController::new(),
            form: CardForm::new(),
            editing_id: None,
            confirm_id: None,
            selected_column: 0,
            selected_card: 0,
            scroll: [0; 3],
            status_message: String::new(),
            theme: Theme::Dark,
            slot_mtime,
            ticks: 0,
        }
    }

    /// Best-effort status-line announcement.
    fn announce(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Rebuild the column partition after any change to the task list and
    /// remember the slot mtime so our own write is not mistaken for an
    /// external one.
    fn refresh(&mut self) {
        self.view = BoardView::build(self.board.tasks());
        self.slot_mtime = self.board.storage().modified();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        if self.selected_column >= 3 {
            self.selected_column = 0;
        }
        let len = self.view.columns[self.selected_column].ids.len();
        if len == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    /// Id of the card under the selection cursor, if the column has any.
    fn selected_id(&self) -> Option<String> {
        self.view.columns[self.selected_column]
            .ids
            .get(self.selected_card)
            .cloned()
    }

    /// Apply a move (drop event or keyboard shortcut) and follow the card
    /// into its new column.
    fn apply_move(&mut self, id: &str, status: Status) {
        let title = match self.board.get(id) {
            Some(t) => t.title.clone(),
            None => return, // stale id, silent no-op
        };
        if !self.board.set_status(id, status) {
            return;
        }
        self.refresh();
        self.selected_column = status.column_index();
        if let Some(pos) = self.view.columns[self.selected_column]
            .ids
            .iter()
            .position(|i| i == id)
        {
            self.selected_card = pos;
        } else {
            self.clamp_selection();
        }
        self.announce(format!(
            "{} moved to {}",
            sanitize(&title),
            status.column_title()
        ));
    }

    /// Probe the slot for a write by another process; adopt it wholesale
    /// (last writer wins, no merging).
    fn check_external_change(&mut self) {
        let current = self.board.storage().modified();
        if current != self.slot_mtime {
            self.board.reload();
            self.slot_mtime = current;
            self.view = BoardView::build(self.board.tasks());
            self.clamp_selection();
            self.announce("Board reloaded: slot changed on disk".to_string());
        }
    }

    /// Poll for and dispatch one input event. Returns true to quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if !event::poll(Duration::from_millis(50))? {
            self.ticks += 1;
            if self.ticks >= SLOT_CHECK_TICKS {
                self.ticks = 0;
                self.check_external_change();
            }
            return Ok(false);
        }

        match event::read()? {
            Event::Key(key) => {
                self.status_message.clear();
                match self.state {
                    AppState::Board => self.handle_board_key(key.code, key.modifiers),
                    AppState::AddCard => Ok(self.handle_form_key(key.code, false)),
                    AppState::EditCard => Ok(self.handle_form_key(key.code, true)),
                    AppState::Confirm => Ok(self.handle_confirm_key(key.code)),
                    AppState::Help => Ok(self.handle_help_key(key.code)),
                }
            }
            Event::Mouse(mouse) => {
                if self.state == AppState::Board {
                    self.handle_mouse(mouse.kind, mouse.column, mouse.row);
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// Translate mouse events into drag gestures against the last-drawn
    /// geometry. A completed drop becomes a status move.
    fn handle_mouse(&mut self, kind: MouseEventKind, x: u16, y: u16) {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag.on_mouse_down(x, y, &self.layout);
                if let Some(hit) = self.layout.card_at(x, y) {
                    // Clicking a card also selects it.
                    let id = hit.id.clone();
                    for (col_idx, col) in self.view.columns.iter().enumerate() {
                        if let Some(pos) = col.ids.iter().position(|i| *i == id) {
                            self.selected_column = col_idx;
                            self.selected_card = pos;
                            break;
                        }
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag.on_mouse_drag(x, y, &self.layout);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(drop) = self.drag.on_mouse_up(x, y, &self.layout) {
                    self.apply_move(&drop.task_id, drop.status);
                }
            }
            _ => {}
        }
    }

    fn handle_board_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                if self.drag.dragging().is_some() {
                    self.drag.reset();
                } else {
                    return Ok(true);
                }
            }

            // Move the selected card a column over; same path as a drop.
            KeyCode::Left if modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(id) = self.selected_id() {
                    if let Some(prev) = self.board.get(&id).and_then(|t| t.status.prev()) {
                        self.apply_move(&id, prev);
                    }
                }
            }
            KeyCode::Right if modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(id) = self.selected_id() {
                    if let Some(next) = self.board.get(&id).and_then(|t| t.status.next()) {
                        self.apply_move(&id, next);
                    }
                }
            }

            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_column < 2 {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = self.view.columns[self.selected_column].ids.len();
                if len > 0 && self.selected_card + 1 < len {
                    self.selected_card += 1;
                }
            }

            KeyCode::Char('a') => {
                self.form = CardForm::new();
                self.editing_id = None;
                self.state = AppState::AddCard;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    if let Some(task) = self.board.get(&id) {
                        self.form = CardForm::from_task(task);
                        self.editing_id = Some(id);
                        self.state = AppState::EditCard;
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
                if let Some(id) = self.selected_id() {
                    self.confirm_id = Some(id);
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('t') => {
                self.theme = self.theme.toggled();
            }
            KeyCode::Char('r') => {
                self.board.reload();
                self.refresh();
                self.announce("Board reloaded".to_string());
            }
            KeyCode::Char('h') => {
                self.state = AppState::Help;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_form_key(&mut self, key: KeyCode, is_edit: bool) -> bool {
        match key {
            KeyCode::Esc => {
                self.state = AppState::Board;
                self.editing_id = None;
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Enter => {
                // Validation boundary: the store never sees a blank title.
                if !self.form.has_title() {
                    self.announce("Title is required".to_string());
                    return false;
                }
                if is_edit {
                    if let Some(id) = self.editing_id.take() {
                        self.board.update(
                            &id,
                            Some(&self.form.title.value),
                            Some(&self.form.desc.value),
                        );
                        self.refresh();
                        let title = sanitize(self.form.title.value.trim());
                        self.announce(format!("Task updated: {title}"));
                    }
                } else {
                    let created = self
                        .board
                        .create(&self.form.title.value, &self.form.desc.value);
                    let title = created.title.clone();
                    self.refresh();
                    // New cards land at the top of To Do; select them there.
                    self.selected_column = 0;
                    self.selected_card = 0;
                    self.announce(format!("Task created: {}", sanitize(&title)));
                }
                self.state = AppState::Board;
            }
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
        false
    }

    fn handle_confirm_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(id) = self.confirm_id.take() {
                    let title = self.board.get(&id).map(|t| t.title.clone());
                    if self.board.delete(&id) {
                        self.refresh();
                        if let Some(title) = title {
                            self.announce(format!("Task deleted: {}", sanitize(&title)));
                        }
                    }
                }
                self.state = AppState::Board;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                // Dismissed: nothing mutated, nothing to roll back.
                self.confirm_id = None;
                self.state = AppState::Board;
            }
            _ => {}
        }
        false
    }

    fn handle_help_key(&mut self, key: KeyCode) -> bool {
        if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h')) {
            self.state = AppState::Board;
        }
        false
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let slot = self
            .board
            .storage()
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let header = vec![Line::from(vec![
            Span::styled("TASKBOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("{} tasks  [{}]", self.board.len(), slot),
                Style::default()
                    .fg(self.theme.dim_text())
                    .add_modifier(Modifier::ITALIC),
            ),
        ])];
        let block = Paragraph::new(header)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(block, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Board => {
                    "a: Add | e/Enter: Edit | d: Delete | drag or Ctrl+←/→: Move | t: Theme | r: Reload | h: Help | q: Quit"
                        .to_string()
                }
                AppState::AddCard => "Add card - Enter: Save | Tab: Next field | Esc: Cancel".to_string(),
                AppState::EditCard => "Edit card - Enter: Save | Tab: Next field | Esc: Cancel".to_string(),
                AppState::Confirm => "Confirm delete".to_string(),
                AppState::Help => "Help".to_string(),
            }
        };
        let accent = column_accent(Status::Todo);
        let status = Paragraph::new(text)
            .style(Style::default().bg(accent).fg(self.theme.selection_fg()))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render_form(&self, f: &mut Frame, area: Rect, is_edit: bool) {
        let popup = centered_rect(60, 40, area);
        f.render_widget(Clear, popup);

        let title = if is_edit { "Edit Card" } else { "New Card" };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(column_accent(Status::InProgress)));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let field_style = |active: bool| {
            if active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.dim_text())
            }
        };
        let title_field = Paragraph::new(sanitize(&self.form.title.value)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title")
                .border_style(field_style(self.form.title.active)),
        );
        f.render_widget(title_field, rows[0]);
        let desc_field = Paragraph::new(sanitize(&self.form.desc.value)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Description")
                .border_style(field_style(self.form.desc.active)),
        );
        f.render_widget(desc_field, rows[1]);

        let (row, field) = if self.form.current_field == TITLE_FIELD {
            (rows[0], &self.form.title)
        } else {
            (rows[1], &self.form.desc)
        };
        f.set_cursor_position((row.x + 1 + field.cursor as u16, row.y + 1));
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 25, area);
        f.render_widget(Clear, popup);

        let title = self
            .confirm_id
            .as_deref()
            .and_then(|id| self.board.get(id))
            .map(|t| sanitize(&t.title))
            .unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Delete this task?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(title),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let dialog = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm")
                    .border_style(Style::default().fg(ratatui::style::Color::Red)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(dialog, popup);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from(Span::styled(
                "Taskboard Help",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Board:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  ←/→ ↑/↓      Select column / card"),
            Line::from("  mouse drag    Drop a card on another column to move it"),
            Line::from("  Ctrl+←/→     Move the selected card a column over"),
            Line::from("  a             Add a card (lands on top of To Do)"),
            Line::from("  e / Enter     Edit the selected card"),
            Line::from("  d / Del       Delete the selected card (asks first)"),
            Line::from("  t             Toggle dark/light theme"),
            Line::from("  r             Reload the board from disk"),
            Line::from("  q / Esc       Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "Form:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  Tab/↑/↓      Switch between title and description"),
            Line::from("  Enter         Save (title must not be empty)"),
            Line::from("  Esc           Cancel"),
            Line::from(""),
            Line::from("Changes save to the board file immediately. If another"),
            Line::from("process writes the same file, this board reloads it;"),
            Line::from("the last writer wins."),
        ];
        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Esc to return"),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        if self.state == AppState::Help {
            self.render_help(f, chunks[1]);
        } else {
            let selected = if self.view.columns[self.selected_column].ids.is_empty() {
                None
            } else {
                Some((self.selected_column, self.selected_card))
            };
            self.layout = render_board(
                f,
                chunks[1],
                self.board.tasks(),
                &self.view,
                &mut self.scroll,
                selected,
                self.drag.dragging(),
                self.drag.hover(),
                self.theme,
            );
            match self.state {
                AppState::AddCard => self.render_form(f, chunks[1], false),
                AppState::EditCard => self.render_form(f, chunks[1], true),
                AppState::Confirm => self.render_confirm(f, chunks[1]),
                _ => {}
            }
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop: draw, handle one input, repeat until quit.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
