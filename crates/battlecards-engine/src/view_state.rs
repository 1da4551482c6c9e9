//! Navigation state that lives beside the document but is never persisted.

use battlecards_types::Document;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Identifies one row of one tab of one card.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RowKey {
    pub card_id: String,
    pub tab_id: String,
    pub row: usize,
}

impl RowKey {
    pub fn new(card_id: impl Into<String>, tab_id: impl Into<String>, row: usize) -> Self {
        Self {
            card_id: card_id.into(),
            tab_id: tab_id.into(),
            row,
        }
    }
}

/// Selected card, selected sub-tab per card, and expanded rows.
///
/// Ids are plain strings, so anything held here can go stale when the document
/// changes. Call [`ViewState::reconcile`] after every structural mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    active_card: Option<String>,
    sub_tabs: BTreeMap<String, String>,
    expanded: BTreeSet<RowKey>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_card(&self) -> Option<&str> {
        self.active_card.as_deref()
    }

    /// Remembered sub-tab of `card_id`.
    pub fn active_sub_tab(&self, card_id: &str) -> Option<&str> {
        self.sub_tabs.get(card_id).map(String::as_str)
    }

    /// Remembered sub-tab if it still exists, else the card's first tab.
    pub fn effective_sub_tab<'a>(&'a self, doc: &'a Document, card_id: &str) -> Option<&'a str> {
        let tabs = doc.tab_ids(card_id);
        match self.active_sub_tab(card_id) {
            Some(tab) if tabs.contains(&tab) => Some(tab),
            _ => tabs.first().copied(),
        }
    }

    /// Make `card_id` the active card. Unknown ids are ignored.
    pub fn select_card(&mut self, doc: &Document, card_id: &str) -> bool {
        if !doc.contains_card(card_id) {
            return false;
        }
        self.active_card = Some(card_id.to_string());
        self.settle_sub_tab(doc, card_id);
        true
    }

    /// Select `tab_id` within `card_id`. Ignored unless the tab belongs to the card.
    pub fn select_sub_tab(&mut self, doc: &Document, card_id: &str, tab_id: &str) -> bool {
        if !doc.has_tab(card_id, tab_id) {
            return false;
        }
        self.sub_tabs
            .insert(card_id.to_string(), tab_id.to_string());
        true
    }

    /// Flip the expansion of one row; returns the new state.
    pub fn toggle_row_expanded(&mut self, card_id: &str, tab_id: &str, row: usize) -> bool {
        let key = RowKey::new(card_id, tab_id, row);
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    pub fn is_expanded(&self, card_id: &str, tab_id: &str, row: usize) -> bool {
        self.expanded.contains(&RowKey::new(card_id, tab_id, row))
    }

    pub fn expanded_rows(&self) -> impl Iterator<Item = &RowKey> {
        self.expanded.iter()
    }

    /// Bring every id back in line with `doc`.
    ///
    /// The active card falls back to the first card; sub-tab selections fall
    /// back to the first tab; expansions of rows that no longer exist are
    /// dropped.
    pub fn reconcile(&mut self, doc: &Document) {
        let active = self
            .active_card
            .take()
            .filter(|id| doc.contains_card(id))
            .or_else(|| doc.first_card_id().map(str::to_string));
        self.active_card = active;

        self.sub_tabs.retain(|card, tab| doc.has_tab(card, tab));
        if let Some(card) = self.active_card.clone() {
            self.settle_sub_tab(doc, &card);
        }

        self.expanded.retain(|key| {
            doc.row_count(&key.card_id, &key.tab_id)
                .is_some_and(|rows| key.row < rows)
        });
    }

    /// Account for the removal of row `row`: its expansion goes away and the
    /// expansions of later rows move up by one.
    pub fn forget_row(&mut self, card_id: &str, tab_id: &str, row: usize) {
        let (kept, moved): (BTreeSet<RowKey>, BTreeSet<RowKey>) =
            std::mem::take(&mut self.expanded)
                .into_iter()
                .filter(|key| !(key.card_id == card_id && key.tab_id == tab_id && key.row == row))
                .partition(|key| !(key.card_id == card_id && key.tab_id == tab_id && key.row > row));

        self.expanded = kept;
        self.expanded.extend(moved.into_iter().map(|mut key| {
            key.row -= 1;
            key
        }));
    }

    fn settle_sub_tab(&mut self, doc: &Document, card_id: &str) {
        match self.effective_sub_tab(doc, card_id).map(str::to_string) {
            Some(tab) => {
                self.sub_tabs.insert(card_id.to_string(), tab);
            }
            None => {
                self.sub_tabs.remove(card_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Document {
        Document::from_value(json!({
            "a": {"title": "A", "tabs": [
                {"id": "a-x", "title": "X", "headers": ["h"], "content": [
                    {"row": ["0"]}, {"row": ["1"]}, {"row": ["2"]}, {"row": ["3"]}
                ]},
                {"id": "a-y", "title": "Y", "headers": [], "content": []}
            ]},
            "b": {"title": "B", "tabs": []}
        }))
        .unwrap()
    }

    #[test]
    fn test_select_unknown_card_is_noop() {
        let doc = doc();
        let mut view = ViewState::new();
        assert!(!view.select_card(&doc, "zzz"));
        assert_eq!(view.active_card(), None);
    }

    #[test]
    fn test_select_card_defaults_to_first_tab() {
        let doc = doc();
        let mut view = ViewState::new();
        assert!(view.select_card(&doc, "a"));
        assert_eq!(view.active_sub_tab("a"), Some("a-x"));
    }

    #[test]
    fn test_card_without_tabs_has_no_sub_tab() {
        let doc = doc();
        let mut view = ViewState::new();
        view.select_card(&doc, "b");
        assert_eq!(view.active_card(), Some("b"));
        assert_eq!(view.active_sub_tab("b"), None);
    }

    #[test]
    fn test_sub_tab_remembered_across_card_switch() {
        let doc = doc();
        let mut view = ViewState::new();
        view.select_card(&doc, "a");
        assert!(view.select_sub_tab(&doc, "a", "a-y"));
        view.select_card(&doc, "b");
        view.select_card(&doc, "a");
        assert_eq!(view.active_sub_tab("a"), Some("a-y"));
    }

    #[test]
    fn test_select_foreign_sub_tab_is_noop() {
        let doc = doc();
        let mut view = ViewState::new();
        view.select_card(&doc, "b");
        assert!(!view.select_sub_tab(&doc, "b", "a-x"));
        assert_eq!(view.active_sub_tab("b"), None);
    }

    #[test]
    fn test_toggle_is_symmetric() {
        let mut view = ViewState::new();
        assert!(view.toggle_row_expanded("a", "a-x", 2));
        assert!(view.is_expanded("a", "a-x", 2));
        assert!(!view.toggle_row_expanded("a", "a-x", 2));
        assert!(!view.is_expanded("a", "a-x", 2));
    }

    #[test]
    fn test_reconcile_prunes_stale_ids() {
        let mut view = ViewState::new();
        let full = doc();
        view.select_card(&full, "a");
        view.select_sub_tab(&full, "a", "a-y");
        view.toggle_row_expanded("a", "a-x", 3);
        view.toggle_row_expanded("a", "a-x", 0);

        let trimmed = Document::from_value(json!({
            "b": {"title": "B", "tabs": []},
            "a": {"title": "A", "tabs": [
                {"id": "a-x", "title": "X", "headers": ["h"], "content": [{"row": ["0"]}]}
            ]}
        }))
        .unwrap();
        view.reconcile(&trimmed);

        assert_eq!(view.active_card(), Some("a"));
        assert_eq!(view.active_sub_tab("a"), Some("a-x"));
        assert!(view.is_expanded("a", "a-x", 0));
        assert!(!view.is_expanded("a", "a-x", 3));
    }

    #[test]
    fn test_reconcile_falls_back_to_first_card() {
        let mut view = ViewState::new();
        let full = doc();
        view.select_card(&full, "b");

        let without_b = Document::from_value(json!({"a": full.as_value()["a"].clone()})).unwrap();
        view.reconcile(&without_b);
        assert_eq!(view.active_card(), Some("a"));

        view.reconcile(&Document::new());
        assert_eq!(view.active_card(), None);
    }

    #[test]
    fn test_forget_row_shifts_later_expansions() {
        let mut view = ViewState::new();
        view.toggle_row_expanded("a", "a-x", 0);
        view.toggle_row_expanded("a", "a-x", 1);
        view.toggle_row_expanded("a", "a-x", 3);
        view.toggle_row_expanded("a", "a-y", 3);

        view.forget_row("a", "a-x", 1);

        assert!(view.is_expanded("a", "a-x", 0));
        assert!(!view.is_expanded("a", "a-x", 1));
        assert!(view.is_expanded("a", "a-x", 2));
        assert!(!view.is_expanded("a", "a-x", 3));
        assert!(view.is_expanded("a", "a-y", 3));
    }
}
