//! Main pane: the active card and its active tab.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use battlecards_engine::{CardPane, TabPane};

use super::{Focus, styled_lines};
use crate::presentation::formatters::{cell_text, column_widths, index_width, pad};

const SEPARATOR: &str = " │ ";

fn focused_line() -> Style {
    Style::default().bg(Color::DarkGray)
}

fn focused_cell() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

fn hint(text: String) -> Line<'static> {
    Line::styled(text, Style::default().fg(Color::DarkGray))
}

/// Lines of the pane, remembering where the focused item starts.
#[derive(Default)]
struct Lines {
    lines: Vec<Line<'static>>,
    focus_at: Option<usize>,
}

impl Lines {
    fn push(&mut self, line: Line<'static>, focused: bool) {
        if focused && self.focus_at.is_none() {
            self.focus_at = Some(self.lines.len());
        }
        self.lines.push(line);
    }

    fn extend(&mut self, lines: Vec<Line<'static>>, focused: bool) {
        for line in lines {
            self.push(line, focused);
        }
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }
}

pub struct CardView<'a> {
    card: &'a CardPane,
    focus: Option<Focus>,
    column: usize,
    edit_mode: bool,
}

impl<'a> CardView<'a> {
    pub fn new(card: &'a CardPane, focus: Option<Focus>, column: usize, edit_mode: bool) -> Self {
        Self {
            card,
            focus,
            column,
            edit_mode,
        }
    }

    fn is_focused(&self, target: Focus) -> bool {
        self.focus == Some(target)
    }

    fn base(&self, target: Focus) -> Style {
        if self.is_focused(target) {
            focused_line()
        } else {
            Style::default()
        }
    }

    fn lines(&self) -> Lines {
        let mut out = Lines::default();

        out.push(
            Line::from(vec![
                Span::styled(
                    self.card.title.raw.clone(),
                    self.base(Focus::Title).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({})", self.card.card_id),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            self.is_focused(Focus::Title),
        );
        out.extend(
            styled_lines(&self.card.subtitle.raw, self.base(Focus::Subtitle).fg(Color::Gray)),
            self.is_focused(Focus::Subtitle),
        );
        out.blank();

        if self.card.sub_tabs.is_empty() {
            let text = if self.edit_mode {
                "No tabs. Press T to add one."
            } else {
                "No tabs."
            };
            out.push(hint(text.to_string()), false);
            return out;
        }

        let mut tabs = Vec::new();
        for (i, link) in self.card.sub_tabs.iter().enumerate() {
            if i > 0 {
                tabs.push(Span::raw("   "));
            }
            let style = match (link.active, self.is_focused(Focus::SubTab)) {
                (true, true) => focused_cell(),
                (true, false) => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                (false, _) => Style::default(),
            };
            tabs.push(Span::styled(link.title.raw.clone(), style));
        }
        out.push(Line::from(tabs), self.is_focused(Focus::SubTab));
        out.blank();

        if let Some(tab) = self.card.active_tab() {
            if let Some(description) = &tab.description {
                out.extend(
                    styled_lines(&description.raw, self.base(Focus::Description)),
                    self.is_focused(Focus::Description),
                );
                out.blank();
            }
            self.table(tab, &mut out);
        }
        out
    }

    fn cells_line(
        &self,
        lead: String,
        texts: Vec<String>,
        widths: &[usize],
        base: Style,
        focused: bool,
    ) -> Line<'static> {
        let mut spans = vec![Span::styled(lead, base)];
        for (i, (text, width)) in texts.into_iter().zip(widths).enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, base.fg(Color::DarkGray)));
            }
            let style = if focused && i == self.column {
                focused_cell()
            } else {
                base
            };
            spans.push(Span::styled(pad(&text, *width), style));
        }
        Line::from(spans)
    }

    fn table(&self, tab: &TabPane, out: &mut Lines) {
        let widths = column_widths(tab);
        let index = index_width(tab.rows.len());

        let headers = (0..widths.len())
            .map(|i| tab.headers.get(i).map(|h| cell_text(&h.raw)).unwrap_or_default())
            .collect();
        let focused = self.is_focused(Focus::Headers);
        out.push(
            self.cells_line(
                " ".repeat(index + 4),
                headers,
                &widths,
                self.base(Focus::Headers).add_modifier(Modifier::BOLD),
                focused,
            ),
            focused,
        );

        for row in &tab.rows {
            let focused = self.is_focused(Focus::Row(row.index));
            let marker = if row.expanded { '▾' } else { '▸' };
            let cells = (0..widths.len())
                .map(|i| row.cells.get(i).map(|c| cell_text(&c.raw)).unwrap_or_default())
                .collect();
            out.push(
                self.cells_line(
                    format!("{} {:>index$}  ", marker, row.index),
                    cells,
                    &widths,
                    self.base(Focus::Row(row.index)),
                    focused,
                ),
                focused,
            );

            if !row.expanded {
                continue;
            }
            let indent = " ".repeat(index + 4);
            if row.detail.bullets.is_empty() {
                let text = if self.edit_mode {
                    "(no details; press a to add one)"
                } else {
                    "(no details)"
                };
                out.push(hint(format!("{}{}", indent, text)), false);
            }
            for (b, bullet) in row.detail.bullets.iter().enumerate() {
                let target = Focus::Detail { row: row.index, bullet: b };
                let base = self.base(target);
                for (n, line) in styled_lines(&bullet.text.raw, base).into_iter().enumerate() {
                    let lead = if n == 0 { "• " } else { "  " };
                    let mut spans = vec![Span::styled(format!("{}{}", indent, lead), base)];
                    spans.extend(line.spans);
                    out.push(Line::from(spans), self.is_focused(target));
                }
            }
        }

        if tab.rows.is_empty() && self.edit_mode {
            out.push(hint("(no rows; press a to add one)".to_string()), false);
        }
    }
}

impl<'a> Widget for CardView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines();
        let height = usize::from(inner.height);
        let offset = match lines.focus_at {
            Some(at) if height > 0 && at >= height => at + 1 - height,
            _ => 0,
        };

        Paragraph::new(lines.lines)
            .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
            .render(inner, buf);
    }
}
