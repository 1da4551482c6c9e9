use crate::tree::*;
use crate::ViewState;
use battlecards_types::{Card, Details, Document, Path, Row, Tab};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit edit affordances (add/delete actions).
    pub edit_mode: bool,
}

/// Build the full view of `doc` and apply `view` to it.
///
/// Pure: neither argument is modified. Cards whose stored shape cannot be
/// read are left out of the tree and logged.
pub fn render(doc: &Document, view: &ViewState, options: RenderOptions) -> ViewTree {
    let mut tree = ViewTree {
        edit_mode: options.edit_mode,
        nav: Vec::new(),
        cards: Vec::new(),
        actions: Vec::new(),
    };
    if options.edit_mode {
        tree.actions
            .push(Action::new(ActionKind::AddCard, Path::root()));
    }

    for card_id in doc.card_ids() {
        let card = match doc.card(card_id) {
            Ok(Some(card)) => card,
            Ok(None) => continue,
            Err(err) => {
                warn!(card = %card_id, error = %err, "skipping card with unreadable shape");
                continue;
            }
        };
        tree.nav.push(NavItem {
            card_id: card_id.to_string(),
            title: card.title.clone(),
            active: false,
        });
        tree.cards.push(card_pane(card_id, &card, options));
    }

    apply_view_state(&mut tree, doc, view);
    debug!(
        cards = tree.cards.len(),
        edit_mode = options.edit_mode,
        active = tree.active_card().map(|c| c.card_id.as_str()).unwrap_or("-"),
        "rendered view"
    );
    tree
}

fn card_pane(card_id: &str, card: &Card, options: RenderOptions) -> CardPane {
    let base = Path::root().key(card_id);
    let edit = options.edit_mode;

    let sub_tabs = card
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let tab_path = base.clone().key("tabs").index(i);
            SubTabLink {
                tab_id: tab.id.clone(),
                title: EditableText::new(tab_path.clone().key("title"), &tab.title, false),
                active: false,
                delete: edit.then(|| Action::new(ActionKind::DeleteTab, tab_path)),
            }
        })
        .collect();

    let tabs = card
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| tab_pane(base.clone().key("tabs").index(i), i, tab, edit))
        .collect();

    let mut actions = Vec::new();
    if edit {
        actions.push(Action::new(ActionKind::DeleteCard, base.clone()));
        actions.push(Action::new(ActionKind::AddTab, base.clone().key("tabs")));
    }

    CardPane {
        card_id: card_id.to_string(),
        active: false,
        title: EditableText::new(base.clone().key("title"), &card.title, false),
        subtitle: EditableText::new(base.key("subtitle"), &card.subtitle, true),
        sub_tabs,
        tabs,
        actions,
    }
}

fn tab_pane(tab_path: Path, index: usize, tab: &Tab, edit: bool) -> TabPane {
    let description = tab
        .description
        .as_ref()
        .filter(|d| !d.is_empty())
        .map(|d| EditableText::new(tab_path.clone().key("description"), d, true));

    let headers = tab
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| EditableText::new(tab_path.clone().key("headers").index(i), h, false))
        .collect();

    let content = tab_path.clone().key("content");
    let rows = tab
        .content
        .iter()
        .enumerate()
        .map(|(i, row)| row_view(content.clone().index(i), i, row, edit))
        .collect();

    let mut actions = Vec::new();
    if edit {
        actions.push(Action::new(ActionKind::AddColumn, tab_path.clone()));
        actions.push(Action::new(ActionKind::AddRow, content));
    }

    TabPane {
        tab_id: tab.id.clone(),
        index,
        active: false,
        description,
        headers,
        rows,
        actions,
    }
}

fn row_view(row_path: Path, index: usize, row: &Row, edit: bool) -> RowView {
    let cells = row
        .row
        .iter()
        .enumerate()
        .map(|(i, cell)| EditableText::new(row_path.clone().key("row").index(i), cell, true))
        .collect();

    let details_path = row_path.clone().key("details");
    let (legacy, bullets) = match &row.details {
        Details::Bullets(lines) => (
            false,
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let path = details_path.clone().index(i);
                    DetailBullet {
                        text: EditableText::new(path.clone(), line, true),
                        delete: edit.then(|| Action::new(ActionKind::DeleteDetail, path)),
                    }
                })
                .collect(),
        ),
        Details::Blob(text) => (
            true,
            vec![DetailBullet {
                text: EditableText::new(details_path.clone(), text, true),
                delete: None,
            }],
        ),
    };

    RowView {
        index,
        cells,
        expanded: false,
        detail: DetailPanel {
            expanded: false,
            legacy,
            bullets,
            add: edit.then(|| Action::new(ActionKind::AddDetail, details_path)),
        },
        delete: edit.then(|| Action::new(ActionKind::DeleteRow, row_path)),
    }
}

/// Mark the active card, one active tab per card, and expanded rows.
fn apply_view_state(tree: &mut ViewTree, doc: &Document, view: &ViewState) {
    let active_card = view
        .active_card()
        .filter(|id| tree.cards.iter().any(|c| c.card_id == *id))
        .map(str::to_string)
        .or_else(|| tree.cards.first().map(|c| c.card_id.clone()));

    for item in &mut tree.nav {
        item.active = active_card.as_deref() == Some(item.card_id.as_str());
    }

    for card in &mut tree.cards {
        card.active = active_card.as_deref() == Some(card.card_id.as_str());

        let selected = view
            .effective_sub_tab(doc, &card.card_id)
            .and_then(|id| card.tabs.iter().position(|t| t.tab_id == id))
            .or(if card.tabs.is_empty() { None } else { Some(0) });

        for (i, (tab, link)) in card.tabs.iter_mut().zip(&mut card.sub_tabs).enumerate() {
            tab.active = selected == Some(i);
            link.active = tab.active;

            for row in &mut tab.rows {
                let expanded = view.is_expanded(&card.card_id, &tab.tab_id, row.index);
                row.expanded = expanded;
                row.detail.expanded = expanded;
            }
        }
    }
}
