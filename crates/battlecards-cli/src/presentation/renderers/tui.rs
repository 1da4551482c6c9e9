//! Interactive browse screen.
//!
//! ## Design:
//! - Renderer owns UI state only: focus cursor, column cursor, open modal, status line
//! - `App` owns the document, navigation and edit mode; every domain action goes through it
//! - Prompts are modals; the action they belong to runs only when the modal is submitted

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tracing::debug;

use battlecards_engine::{Action, ActionKind, CardPane, EditableText};
use battlecards_runtime::app::{
    CONFIRM_DELETE, PROMPT_CARD_TITLE, PROMPT_COLUMN_HEADER, PROMPT_TAB_TITLE,
};
use battlecards_runtime::{App, AppError, EditInput, EditOutcome, GateOutcome, ScriptedPrompter};
use battlecards_store::{LoadReport, LoadSource};

use crate::presentation::views::tui::{
    CardView, Focus, ModalView, NavView, Status, StatusBarView, focus_stops,
};

const CURSOR: &str = "▏";

enum Modal {
    Password { input: String, rejected: bool },
    Prompt { title: &'static str, input: String, action: Action },
    Confirm { action: Action },
    /// The session itself lives in `App`.
    Editor,
}

pub struct TuiRenderer {
    app: App,

    /// UI State: index into the active card's focus stops
    focus: usize,

    /// UI State: column within a header or row
    column: usize,

    modal: Option<Modal>,

    status: Option<Status>,

    should_quit: bool,
}

impl TuiRenderer {
    pub fn new(app: App, report: &LoadReport) -> Self {
        let status = match (report.warnings.first(), report.source) {
            (Some(warning), _) => Some(Status::warning(warning.to_string())),
            (None, LoadSource::Empty) => Some(Status::warning("Started with an empty document")),
            (None, _) => None,
        };
        Self {
            app,
            focus: 0,
            column: 0,
            modal: None,
            status,
            should_quit: false,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        ctrlc::set_handler(move || {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            std::process::exit(130);
        })?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(250))?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key_event(key);
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    // --- focus ---

    fn active_card(&self) -> Option<&CardPane> {
        self.app.tree().active_card()
    }

    fn stops(&self) -> Vec<Focus> {
        self.active_card().map(focus_stops).unwrap_or_default()
    }

    fn current_focus(&self) -> Option<Focus> {
        self.stops().get(self.focus).copied()
    }

    fn column_count(&self) -> usize {
        self.active_card()
            .and_then(CardPane::active_tab)
            .map(|tab| tab.headers.len())
            .unwrap_or(0)
    }

    fn move_focus(&mut self, delta: isize) {
        let last = self.stops().len().saturating_sub(1);
        self.focus = self.focus.saturating_add_signed(delta).min(last);
    }

    fn focus_on(&mut self, target: Focus) {
        if let Some(i) = self.stops().iter().position(|f| *f == target) {
            self.focus = i;
        }
    }

    fn settle(&mut self) {
        self.move_focus(0);
        self.column = self.column.min(self.column_count().saturating_sub(1));
        if let Some(notice) = self.app.take_notice() {
            self.status = Some(Status::warning(notice));
        }
    }

    fn focused_text(&self) -> Option<&EditableText> {
        let card = self.active_card()?;
        let focus = self.current_focus()?;
        match focus {
            Focus::Title => Some(&card.title),
            Focus::Subtitle => Some(&card.subtitle),
            Focus::SubTab => card.sub_tabs.iter().find(|l| l.active).map(|l| &l.title),
            Focus::Description => card.active_tab()?.description.as_ref(),
            Focus::Headers => card.active_tab()?.headers.get(self.column),
            Focus::Row(row) => card.active_tab()?.rows.get(row)?.cells.get(self.column),
            Focus::Detail { row, bullet } => card
                .active_tab()?
                .rows
                .get(row)?
                .detail
                .bullets
                .get(bullet)
                .map(|b| &b.text),
        }
    }

    fn delete_action(&self) -> Option<Action> {
        let card = self.active_card()?;
        let action = match self.current_focus()? {
            Focus::Title => card.actions.iter().find(|a| a.kind == ActionKind::DeleteCard),
            Focus::SubTab => self.active_tab_delete(),
            Focus::Row(row) => card.active_tab()?.rows.get(row)?.delete.as_ref(),
            Focus::Detail { row, bullet } => card
                .active_tab()?
                .rows
                .get(row)?
                .detail
                .bullets
                .get(bullet)?
                .delete
                .as_ref(),
            Focus::Subtitle | Focus::Description | Focus::Headers => None,
        };
        action.cloned()
    }

    fn active_tab_delete(&self) -> Option<&Action> {
        self.active_card()?
            .sub_tabs
            .iter()
            .find(|l| l.active)?
            .delete
            .as_ref()
    }

    /// Add a detail to an expanded focused row, otherwise add a row.
    fn add_action(&self) -> Option<Action> {
        let tab = self.active_card()?.active_tab()?;
        let row = match self.current_focus() {
            Some(Focus::Row(row)) | Some(Focus::Detail { row, .. }) => tab.rows.get(row),
            _ => None,
        };
        match row {
            Some(row) if row.expanded => row.detail.add.clone(),
            _ => tab.actions.iter().find(|a| a.kind == ActionKind::AddRow).cloned(),
        }
    }

    fn tab_action(&self, kind: ActionKind) -> Option<Action> {
        let tab = self.active_card()?.active_tab()?;
        tab.actions.iter().find(|a| a.kind == kind).cloned()
    }

    fn card_action(&self, kind: ActionKind) -> Option<Action> {
        let card = self.active_card()?;
        card.actions.iter().find(|a| a.kind == kind).cloned()
    }

    // --- actions ---

    fn perform(&mut self, action: &Action, mut prompter: ScriptedPrompter) {
        let outcome = self.app.perform(action, &mut prompter);
        debug!(kind = ?action.kind, path = %action.path, ok = outcome.is_ok(), "tui action");
        match outcome {
            Ok(true) => {
                self.status = Some(Status::info(format!("Done: {}", action.kind.label())));
                self.after_action(action);
            }
            Ok(false) => self.status = Some(Status::info("Nothing changed")),
            Err(err) => self.report_error(err),
        }
        self.settle();
    }

    /// Move focus onto whatever an add created.
    fn after_action(&mut self, action: &Action) {
        match action.kind {
            ActionKind::AddRow => {
                if let Some(row) = self
                    .active_card()
                    .and_then(CardPane::active_tab)
                    .and_then(|tab| tab.rows.last())
                    .map(|r| r.index)
                {
                    self.focus_on(Focus::Row(row));
                }
            }
            ActionKind::AddDetail => {
                let last = self.active_card().and_then(CardPane::active_tab).and_then(|tab| {
                    tab.rows
                        .iter()
                        .find(|r| r.detail.add.as_ref() == Some(action))
                        .map(|r| (r.index, r.detail.bullets.len().saturating_sub(1)))
                });
                if let Some((row, bullet)) = last {
                    self.focus_on(Focus::Detail { row, bullet });
                }
            }
            ActionKind::AddCard | ActionKind::AddTab | ActionKind::DeleteCard => {
                self.focus = 0;
                self.column = 0;
            }
            ActionKind::AddColumn => {
                self.column = self.column_count().saturating_sub(1);
            }
            _ => {}
        }
    }

    fn report_error(&mut self, err: AppError) {
        self.status = Some(if err.is_user_facing() {
            Status::warning(err.to_string())
        } else {
            Status::error(err.to_string())
        });
    }

    fn open_prompt(&mut self, action: Option<Action>, title: &'static str) {
        match action {
            Some(action) => {
                self.modal = Some(Modal::Prompt {
                    title,
                    input: String::new(),
                    action,
                })
            }
            None => self.status = Some(Status::warning("Not available here")),
        }
    }

    fn open_confirm(&mut self, action: Option<Action>) {
        match action {
            Some(action) => self.modal = Some(Modal::Confirm { action }),
            None => self.status = Some(Status::warning("Nothing to delete here")),
        }
    }

    fn begin_edit(&mut self) {
        let Some(path) = self.focused_text().map(|t| t.path.clone()) else {
            self.status = Some(Status::warning("Nothing to edit here"));
            return;
        };
        match self.app.begin_edit(&path) {
            Ok(Some(_)) => self.modal = Some(Modal::Editor),
            Ok(None) => self.status = Some(Status::warning("Nothing to edit here")),
            Err(err) => self.report_error(err),
        }
    }

    // --- keys ---

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.modal.take() {
            Some(modal) => self.handle_modal_key(modal, key),
            None => self.handle_browse_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.step_card(-1),
            KeyCode::Right => self.step_card(1),
            KeyCode::Tab => self.step_sub_tab(1),
            KeyCode::BackTab => self.step_sub_tab(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_focus(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_focus(-1),
            KeyCode::Char('h') => self.column = self.column.saturating_sub(1),
            KeyCode::Char('l') => {
                self.column = (self.column + 1).min(self.column_count().saturating_sub(1))
            }
            KeyCode::Enter => self.toggle_focused_row(),
            KeyCode::Char('E') => self.toggle_edit_mode(),
            KeyCode::Char(c @ ('e' | 'd' | 'a' | 'c' | 'T' | 'C' | 'X')) => {
                if self.app.is_edit_mode() {
                    self.handle_edit_key(c);
                } else {
                    self.status = Some(Status::warning("Press E to enter edit mode first"));
                }
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, c: char) {
        match c {
            'e' => self.begin_edit(),
            'd' => {
                let action = self.delete_action();
                self.open_confirm(action);
            }
            'X' => {
                let action = self.active_tab_delete().cloned();
                self.open_confirm(action);
            }
            'a' => match self.add_action() {
                Some(action) => self.perform(&action, ScriptedPrompter::confirming()),
                None => self.status = Some(Status::warning("Add a tab first")),
            },
            'c' => {
                let action = self.tab_action(ActionKind::AddColumn);
                self.open_prompt(action, PROMPT_COLUMN_HEADER);
            }
            'T' => {
                let action = self.card_action(ActionKind::AddTab);
                self.open_prompt(action, PROMPT_TAB_TITLE);
            }
            'C' => {
                let action = self
                    .app
                    .tree()
                    .actions
                    .iter()
                    .find(|a| a.kind == ActionKind::AddCard)
                    .cloned();
                self.open_prompt(action, PROMPT_CARD_TITLE);
            }
            _ => {}
        }
    }

    fn step_card(&mut self, delta: isize) {
        let ids: Vec<String> = self.app.tree().nav.iter().map(|n| n.card_id.clone()).collect();
        if ids.is_empty() {
            return;
        }
        let current = self.app.tree().nav.iter().position(|n| n.active).unwrap_or(0);
        let next = (current as isize + delta).rem_euclid(ids.len() as isize) as usize;
        self.app.select_card(&ids[next]);
        self.focus = 0;
        self.column = 0;
    }

    fn step_sub_tab(&mut self, delta: isize) {
        let Some(card) = self.active_card() else {
            return;
        };
        let ids: Vec<String> = card.sub_tabs.iter().map(|l| l.tab_id.clone()).collect();
        if ids.is_empty() {
            return;
        }
        let current = card.sub_tabs.iter().position(|l| l.active).unwrap_or(0);
        let next = (current as isize + delta).rem_euclid(ids.len() as isize) as usize;
        self.app.select_sub_tab(&ids[next]);
        self.focus_on(Focus::SubTab);
        self.settle();
    }

    fn toggle_focused_row(&mut self) {
        let row = match self.current_focus() {
            Some(Focus::Row(row)) | Some(Focus::Detail { row, .. }) => row,
            _ => return,
        };
        let Some((card_id, tab_id)) = self.active_card().and_then(|card| {
            card.active_tab()
                .map(|tab| (card.card_id.clone(), tab.tab_id.clone()))
        }) else {
            return;
        };
        self.app.toggle_row(&card_id, &tab_id, row);
        self.focus_on(Focus::Row(row));
    }

    fn toggle_edit_mode(&mut self) {
        if !self.app.is_edit_mode() {
            self.modal = Some(Modal::Password {
                input: String::new(),
                rejected: false,
            });
            return;
        }
        match self.app.exit_edit_mode() {
            Ok(()) => self.status = Some(Status::info("Left edit mode")),
            Err(err) => self.report_error(err),
        }
        self.settle();
    }

    fn handle_modal_key(&mut self, modal: Modal, key: KeyEvent) {
        match modal {
            Modal::Password { mut input, rejected } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => match self.app.enter_edit_mode(&input) {
                    GateOutcome::Entered => {
                        self.status = Some(Status::info("Edit mode on"));
                        self.settle();
                    }
                    GateOutcome::Rejected => {
                        self.modal = Some(Modal::Password {
                            input: String::new(),
                            rejected: true,
                        })
                    }
                },
                code => {
                    edit_line(&mut input, code);
                    self.modal = Some(Modal::Password { input, rejected });
                }
            },

            Modal::Prompt {
                title,
                mut input,
                action,
            } => match key.code {
                KeyCode::Esc => self.status = Some(Status::info("Cancelled")),
                KeyCode::Enter => {
                    self.perform(&action, ScriptedPrompter::confirming().answer(input))
                }
                code => {
                    edit_line(&mut input, code);
                    self.modal = Some(Modal::Prompt {
                        title,
                        input,
                        action,
                    });
                }
            },

            Modal::Confirm { action } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.perform(&action, ScriptedPrompter::confirming())
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.status = Some(Status::info("Cancelled"))
                }
                _ => self.modal = Some(Modal::Confirm { action }),
            },

            Modal::Editor => {
                let Some(input) = editor_input(key) else {
                    self.modal = Some(Modal::Editor);
                    return;
                };
                match self.app.edit_input(input) {
                    Ok(Some(EditOutcome::Editing)) => self.modal = Some(Modal::Editor),
                    Ok(Some(EditOutcome::Commit(_))) => self.status = Some(Status::info("Saved")),
                    Ok(Some(EditOutcome::Abort)) => {
                        self.status = Some(Status::info("Edit cancelled"))
                    }
                    Ok(None) => {}
                    Err(err) => self.report_error(err),
                }
                self.settle();
            }
        }
    }

    // --- drawing ---

    pub fn render(&self, f: &mut Frame) {
        let size = f.area();

        let main_chunks = Layout::vertical([
            Constraint::Min(3),    // Nav + card
            Constraint::Length(3), // Status bar
        ])
        .split(size);

        let body = Layout::horizontal([Constraint::Length(26), Constraint::Min(20)])
            .split(main_chunks[0]);

        f.render_widget(NavView::new(self.app.tree()), body[0]);

        match self.active_card() {
            Some(card) => f.render_widget(
                CardView::new(card, self.current_focus(), self.column, self.app.is_edit_mode()),
                body[1],
            ),
            None => {
                let empty = Paragraph::new("No cards yet. Press E, then C to add one.")
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(empty, body[1]);
            }
        }

        f.render_widget(
            StatusBarView::new(self.status.as_ref(), self.app.is_edit_mode()),
            main_chunks[1],
        );

        if let Some(modal) = &self.modal {
            self.render_modal(f, modal);
        }
    }

    fn render_modal(&self, f: &mut Frame, modal: &Modal) {
        let size = f.area();
        match modal {
            Modal::Password { input, rejected } => {
                let mut body = vec![
                    Line::raw("Enter password:"),
                    Line::raw(format!("{}{}", "•".repeat(input.chars().count()), CURSOR)),
                ];
                if *rejected {
                    body.push(Line::styled(
                        "Incorrect password",
                        Style::default().fg(Color::Red),
                    ));
                }
                f.render_widget(
                    ModalView::new("Edit Mode", body, "[Enter] unlock  [Esc] cancel"),
                    size,
                );
            }
            Modal::Prompt { title, input, .. } => {
                let body = vec![Line::raw(format!("{}{}", input, CURSOR))];
                f.render_widget(ModalView::new(title, body, "[Enter] ok  [Esc] cancel"), size);
            }
            Modal::Confirm { action } => {
                let body = vec![
                    Line::raw(CONFIRM_DELETE),
                    Line::styled(
                        format!("{} at {}", action.kind.label(), action.path),
                        Style::default().fg(Color::DarkGray),
                    ),
                ];
                f.render_widget(ModalView::new("Confirm", body, "[y] yes  [n] no"), size);
            }
            Modal::Editor => {
                let Some(session) = self.app.session() else {
                    return;
                };
                let (before, after) = session.buffer().split_at(session.cursor());
                let text = format!("{}{}{}", before, CURSOR, after);
                let body = text.split('\n').map(|l| Line::raw(l.to_string())).collect();
                let hint = if session.is_multiline() {
                    "[Enter] save  [Alt+Enter] new line  [Esc] cancel"
                } else {
                    "[Enter] save  [Esc] cancel"
                };
                let title = session.path().to_string();
                f.render_widget(ModalView::new(&title, body, hint), size);
            }
        }
    }
}

/// Minimal line editing for password and prompt input.
fn edit_line(input: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(c) => input.push(c),
        KeyCode::Backspace => {
            input.pop();
        }
        _ => {}
    }
}

fn editor_input(key: KeyEvent) -> Option<EditInput> {
    let input = match key.code {
        KeyCode::Esc => EditInput::Cancel,
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => EditInput::Newline,
        KeyCode::Enter => EditInput::Confirm {
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
        },
        KeyCode::Tab => EditInput::Blur,
        KeyCode::Backspace => EditInput::Backspace,
        KeyCode::Delete => EditInput::Delete,
        KeyCode::Left => EditInput::Left,
        KeyCode::Right => EditInput::Right,
        KeyCode::Home => EditInput::Home,
        KeyCode::End => EditInput::End,
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => return None,
        KeyCode::Char(c) => EditInput::Char(c),
        _ => return None,
    };
    Some(input)
}
