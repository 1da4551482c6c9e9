//! Centered dialog box drawn over the screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

pub struct ModalView<'a> {
    title: &'a str,
    body: Vec<Line<'a>>,
    hint: &'a str,
}

impl<'a> ModalView<'a> {
    pub fn new(title: &'a str, body: Vec<Line<'a>>, hint: &'a str) -> Self {
        Self { title, body, hint }
    }

    /// Area the dialog occupies inside `screen`.
    pub fn area(&self, screen: Rect) -> Rect {
        let width = screen.width.min(64);
        let wanted = u16::try_from(self.body.len()).unwrap_or(u16::MAX).saturating_add(4);
        let height = screen.height.min(wanted.max(5));
        Rect {
            x: screen.x + (screen.width - width) / 2,
            y: screen.y + (screen.height - height) / 2,
            width,
            height,
        }
    }
}

impl<'a> Widget for ModalView<'a> {
    fn render(self, screen: Rect, buf: &mut Buffer) {
        let area = self.area(screen);
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = self.body;
        lines.push(Line::default());
        lines.push(Line::styled(self.hint, Style::default().fg(Color::DarkGray)));
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
