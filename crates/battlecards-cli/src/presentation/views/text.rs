use std::fmt;

use battlecards_engine::markup::{self, Emphasis, StyledLine};
use battlecards_engine::{CardPane, TabPane, ViewTree};
use owo_colors::OwoColorize;

use crate::presentation::formatters::{cell_text, column_widths, index_width, pad};

// --------------------------------------------------------
// Card Text View
// --------------------------------------------------------

/// The active card of a tree, laid out for a terminal or a pipe.
pub struct CardTextView<'a> {
    tree: &'a ViewTree,
    color: bool,
}

impl<'a> CardTextView<'a> {
    pub fn new(tree: &'a ViewTree) -> Self {
        Self { tree, color: false }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint(&self, text: &str, emphasis: Emphasis) -> String {
        if !self.color {
            return text.to_string();
        }
        match (emphasis.bold, emphasis.italic) {
            (true, true) => text.bold().italic().to_string(),
            (true, false) => text.bold().to_string(),
            (false, true) => text.italic().to_string(),
            (false, false) => text.to_string(),
        }
    }

    fn styled(&self, line: &StyledLine) -> String {
        line.iter()
            .map(|span| self.paint(&span.text, span.emphasis))
            .collect()
    }

    fn write_markup(&self, f: &mut fmt::Formatter, raw: &str, indent: &str) -> fmt::Result {
        for line in markup::parse(raw) {
            writeln!(f, "{}{}", indent, self.styled(&line))?;
        }
        Ok(())
    }

    fn write_header(&self, f: &mut fmt::Formatter, card: &CardPane) -> fmt::Result {
        let title = self.paint(&card.title.raw, Emphasis { bold: true, italic: false });
        let id = format!("({})", card.card_id);
        if self.color {
            writeln!(f, "{} {}", title, id.dimmed())?;
        } else {
            writeln!(f, "{} {}", title, id)?;
        }
        self.write_markup(f, &card.subtitle.raw, "")
    }

    fn write_table(&self, f: &mut fmt::Formatter, tab: &TabPane) -> fmt::Result {
        let widths = column_widths(tab);
        let index = index_width(tab.rows.len());
        let gutter = " ".repeat(index + 2);

        let headers: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let text = tab.headers.get(i).map(|h| cell_text(&h.raw)).unwrap_or_default();
                pad(&text, *w)
            })
            .collect();
        let header_line = format!("{}  {}", gutter, headers.join(" | "));
        let header_line = header_line.trim_end();
        writeln!(f, "{}", self.paint(header_line, Emphasis { bold: true, italic: false }))?;

        for row in &tab.rows {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let text = row.cells.get(i).map(|c| cell_text(&c.raw)).unwrap_or_default();
                    pad(&text, *w)
                })
                .collect();
            let marker = if row.expanded { '▾' } else { '▸' };
            let line = format!("{} {:>index$}  {}", marker, row.index, cells.join(" | "));
            writeln!(f, "{}", line.trim_end())?;

            if !row.expanded {
                continue;
            }
            let indent = " ".repeat(index + 4);
            if row.detail.bullets.is_empty() {
                writeln!(f, "{}(no details)", indent)?;
            }
            for bullet in &row.detail.bullets {
                for (n, line) in markup::parse(&bullet.text.raw).iter().enumerate() {
                    let lead = if n == 0 { "• " } else { "  " };
                    writeln!(f, "{}{}{}", indent, lead, self.styled(line))?;
                }
            }
        }
        Ok(())
    }
}

impl<'a> fmt::Display for CardTextView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.tree.nav.is_empty() {
            writeln!(f, "No cards yet.")?;
            return Ok(());
        }

        let nav: Vec<String> = self
            .tree
            .nav
            .iter()
            .map(|item| {
                if item.active {
                    format!("[{}]", item.title)
                } else {
                    item.title.clone()
                }
            })
            .collect();
        writeln!(f, "Cards: {}", nav.join("  "))?;

        let Some(card) = self.tree.active_card() else {
            return Ok(());
        };
        writeln!(f)?;
        self.write_header(f, card)?;
        writeln!(f)?;

        if card.sub_tabs.is_empty() {
            writeln!(f, "No tabs.")?;
            return Ok(());
        }
        let tabs: Vec<String> = card
            .sub_tabs
            .iter()
            .map(|link| {
                if link.active {
                    format!("[{}]", link.title.raw)
                } else {
                    link.title.raw.clone()
                }
            })
            .collect();
        writeln!(f, "Tabs: {}", tabs.join("  "))?;

        let Some(tab) = card.active_tab() else {
            return Ok(());
        };
        if let Some(description) = &tab.description {
            writeln!(f)?;
            self.write_markup(f, &description.raw, "")?;
        }
        writeln!(f)?;
        self.write_table(f, tab)
    }
}
