//! Ratatui widgets for the browse screen.
//!
//! Widgets borrow the rendered tree plus whatever UI state they need to
//! highlight; they never touch the document.

mod card;
mod modal;
mod nav;
mod status_bar;

pub use card::CardView;
pub use modal::ModalView;
pub use nav::NavView;
pub use status_bar::{Status, StatusBarView, StatusLevel};

use battlecards_engine::CardPane;
use battlecards_engine::markup::{self, StyledLine};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Where the focus cursor sits within the active card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Subtitle,
    SubTab,
    Description,
    Headers,
    Row(usize),
    Detail { row: usize, bullet: usize },
}

/// Focus stops of a card from top to bottom.
pub fn focus_stops(card: &CardPane) -> Vec<Focus> {
    let mut stops = vec![Focus::Title, Focus::Subtitle];
    let Some(tab) = card.active_tab() else {
        return stops;
    };
    stops.push(Focus::SubTab);
    if tab.description.is_some() {
        stops.push(Focus::Description);
    }
    stops.push(Focus::Headers);
    for row in &tab.rows {
        stops.push(Focus::Row(row.index));
        if row.expanded {
            stops.extend((0..row.detail.bullets.len()).map(|bullet| Focus::Detail {
                row: row.index,
                bullet,
            }));
        }
    }
    stops
}

fn span_style(base: Style, emphasis: markup::Emphasis) -> Style {
    let mut style = base;
    if emphasis.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if emphasis.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}

/// Markup line as ratatui spans, emphasis layered over `base`.
pub fn styled_line(line: &StyledLine, base: Style) -> Line<'static> {
    Line::from(
        line.iter()
            .map(|span| Span::styled(span.text.clone(), span_style(base, span.emphasis)))
            .collect::<Vec<_>>(),
    )
}

/// Every line of `raw`; an empty text still takes one line.
pub fn styled_lines(raw: &str, base: Style) -> Vec<Line<'static>> {
    let lines: Vec<Line<'static>> = markup::parse(raw)
        .iter()
        .map(|line| styled_line(line, base))
        .collect();
    if lines.is_empty() {
        vec![Line::styled(String::new(), base)]
    } else {
        lines
    }
}
