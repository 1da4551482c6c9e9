//! Sidebar listing every card.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Widget},
};

use battlecards_engine::ViewTree;

pub struct NavView<'a> {
    tree: &'a ViewTree,
}

impl<'a> NavView<'a> {
    pub fn new(tree: &'a ViewTree) -> Self {
        Self { tree }
    }
}

impl<'a> Widget for NavView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.tree.edit_mode {
            " Cards [edit] "
        } else {
            " Cards "
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        let items: Vec<ListItem> = self
            .tree
            .nav
            .iter()
            .map(|item| {
                let style = if item.active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(item.title.clone()).style(style)
            })
            .collect();

        List::new(items).block(block).render(area, buf);
    }
}
