//! Rendered view of a document.
//!
//! The tree is rebuilt in full after every change and is disposable: nothing
//! in it outlives the next render. Addresses back into the document are
//! carried as [`Path`]s, never as references.

use battlecards_types::Path;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewTree {
    pub edit_mode: bool,
    pub nav: Vec<NavItem>,
    pub cards: Vec<CardPane>,
    /// Document-level affordances (add card). Empty outside edit mode.
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub card_id: String,
    pub title: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardPane {
    pub card_id: String,
    pub active: bool,
    pub title: EditableText,
    pub subtitle: EditableText,
    pub sub_tabs: Vec<SubTabLink>,
    pub tabs: Vec<TabPane>,
    /// Delete card, add tab.
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubTabLink {
    pub tab_id: String,
    pub title: EditableText,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabPane {
    pub tab_id: String,
    pub index: usize,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<EditableText>,
    pub headers: Vec<EditableText>,
    pub rows: Vec<RowView>,
    /// Add column, add row.
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub index: usize,
    pub cells: Vec<EditableText>,
    pub expanded: bool,
    pub detail: DetailPanel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub expanded: bool,
    /// Details stored as one free-form string rather than bullets.
    pub legacy: bool,
    pub bullets: Vec<DetailBullet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailBullet {
    pub text: EditableText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Action>,
}

/// A piece of document text and the path it was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditableText {
    pub path: Path,
    /// Stored text, markup not applied.
    pub raw: String,
    /// Whether an editor for this field accepts line breaks.
    pub multiline: bool,
}

impl EditableText {
    pub fn new(path: Path, raw: impl Into<String>, multiline: bool) -> Self {
        Self {
            path,
            raw: raw.into(),
            multiline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    AddCard,
    DeleteCard,
    AddTab,
    DeleteTab,
    AddColumn,
    AddRow,
    DeleteRow,
    AddDetail,
    DeleteDetail,
}

impl ActionKind {
    pub fn is_delete(self) -> bool {
        matches!(
            self,
            ActionKind::DeleteCard
                | ActionKind::DeleteTab
                | ActionKind::DeleteRow
                | ActionKind::DeleteDetail
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::AddCard => "add card",
            ActionKind::DeleteCard => "delete card",
            ActionKind::AddTab => "add tab",
            ActionKind::DeleteTab => "delete tab",
            ActionKind::AddColumn => "add column",
            ActionKind::AddRow => "add row",
            ActionKind::DeleteRow => "delete row",
            ActionKind::AddDetail => "add detail",
            ActionKind::DeleteDetail => "delete detail",
        }
    }
}

/// An affordance and the path it operates on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub kind: ActionKind,
    pub path: Path,
}

impl Action {
    pub fn new(kind: ActionKind, path: Path) -> Self {
        Self { kind, path }
    }
}

impl ViewTree {
    pub fn active_card(&self) -> Option<&CardPane> {
        self.cards.iter().find(|c| c.active)
    }

    pub fn card(&self, card_id: &str) -> Option<&CardPane> {
        self.cards.iter().find(|c| c.card_id == card_id)
    }

    /// Every editable text in the tree, in reading order.
    pub fn editables(&self) -> impl Iterator<Item = &EditableText> {
        self.cards.iter().flat_map(CardPane::editables)
    }

    pub fn find_editable(&self, path: &Path) -> Option<&EditableText> {
        self.editables().find(|e| &e.path == path)
    }

    /// Every affordance in the tree, document-level ones first.
    pub fn all_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions
            .iter()
            .chain(self.cards.iter().flat_map(CardPane::all_actions))
    }

    pub fn find_action(&self, kind: ActionKind, path: &Path) -> Option<&Action> {
        self.all_actions()
            .find(|a| a.kind == kind && &a.path == path)
    }
}

impl CardPane {
    pub fn active_tab(&self) -> Option<&TabPane> {
        self.tabs.iter().find(|t| t.active)
    }

    pub fn editables(&self) -> impl Iterator<Item = &EditableText> {
        [&self.title, &self.subtitle]
            .into_iter()
            .chain(self.sub_tabs.iter().map(|s| &s.title))
            .chain(self.tabs.iter().flat_map(TabPane::editables))
    }

    pub fn all_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions
            .iter()
            .chain(self.sub_tabs.iter().filter_map(|s| s.delete.as_ref()))
            .chain(self.tabs.iter().flat_map(TabPane::all_actions))
    }
}

impl TabPane {
    pub fn editables(&self) -> impl Iterator<Item = &EditableText> {
        self.description
            .iter()
            .chain(self.headers.iter())
            .chain(self.rows.iter().flat_map(RowView::editables))
    }

    pub fn all_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions
            .iter()
            .chain(self.rows.iter().flat_map(RowView::all_actions))
    }

    pub fn expanded_rows(&self) -> impl Iterator<Item = &RowView> {
        self.rows.iter().filter(|r| r.expanded)
    }
}

impl RowView {
    pub fn editables(&self) -> impl Iterator<Item = &EditableText> {
        self.cells
            .iter()
            .chain(self.detail.bullets.iter().map(|b| &b.text))
    }

    pub fn all_actions(&self) -> impl Iterator<Item = &Action> {
        self.delete
            .iter()
            .chain(self.detail.add.iter())
            .chain(self.detail.bullets.iter().filter_map(|b| b.delete.as_ref()))
    }
}
