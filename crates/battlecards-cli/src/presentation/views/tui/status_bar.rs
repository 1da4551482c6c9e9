//! Bottom bar: the latest status message and key hints.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            message: message.into(),
        }
    }
}

fn level_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Info => Color::Green,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}

const READ_KEYS: &[(&str, &str)] = &[
    ("q", "quit"),
    ("←/→", "card"),
    ("Tab", "sub-tab"),
    ("j/k", "move"),
    ("Enter", "expand"),
    ("E", "edit mode"),
];

const EDIT_KEYS: &[(&str, &str)] = &[
    ("e", "edit"),
    ("d", "delete"),
    ("a", "add row/detail"),
    ("c", "column"),
    ("T", "tab"),
    ("C", "card"),
    ("X", "drop tab"),
    ("E", "done"),
];

pub struct StatusBarView<'a> {
    status: Option<&'a Status>,
    edit_mode: bool,
}

impl<'a> StatusBarView<'a> {
    pub fn new(status: Option<&'a Status>, edit_mode: bool) -> Self {
        Self { status, edit_mode }
    }
}

impl<'a> Widget for StatusBarView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(inner);

        if let Some(status) = self.status {
            Paragraph::new(Span::styled(
                status.message.as_str(),
                Style::default().fg(level_color(status.level)),
            ))
            .render(chunks[0], buf);
        }

        let keys = if self.edit_mode { EDIT_KEYS } else { READ_KEYS };
        let mut spans = Vec::new();
        for (key, label) in keys {
            spans.push(Span::styled(format!("[{}]", key), Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(format!("{} ", label)));
        }
        Paragraph::new(Line::from(spans)).render(chunks[1], buf);
    }
}
