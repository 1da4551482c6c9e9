use crate::context::ExecutionContext;
use crate::presentation::renderers::ConsoleRenderer;
use anyhow::{Result, bail};
use tracing::debug;

#[derive(Debug, Default)]
pub struct ShowOptions {
    pub card: Option<String>,
    pub tab: Option<String>,
    pub expand: Vec<usize>,
}

pub fn handle(ctx: &ExecutionContext, options: ShowOptions) -> Result<()> {
    let (mut app, _report) = ctx.open_app()?;
    let renderer = ConsoleRenderer::new(ctx.format);

    if let Some(card) = &options.card
        && !app.select_card(card)
    {
        bail!("No card with id '{}'", card);
    }
    if let Some(tab) = &options.tab
        && !app.select_sub_tab(tab)
    {
        bail!("No tab with id '{}' in the shown card", tab);
    }

    if !options.expand.is_empty() {
        let Some((card_id, tab_id, rows)) = app.tree().active_card().and_then(|card| {
            card.active_tab()
                .map(|tab| (card.card_id.clone(), tab.tab_id.clone(), tab.rows.len()))
        }) else {
            bail!("Nothing to expand: the shown card has no tabs");
        };
        for &row in &options.expand {
            if row >= rows {
                bail!("Row {} does not exist (the tab has {} rows)", row, rows);
            }
            if !app.view().is_expanded(&card_id, &tab_id, row) {
                app.toggle_row(&card_id, &tab_id, row);
            }
        }
        debug!(card = %card_id, tab = %tab_id, rows = ?options.expand, "rows expanded");
    }

    if let Some(notice) = app.take_notice() {
        renderer.notice(&notice);
    }
    renderer.render_tree(app.tree())
}
