use crate::{Result, SeedSource, StaticSeed, Storage, StoreError};
use battlecards_core::{slugify, tab_id, SuffixClock};
use battlecards_types::{Document, Path, PathError, Seg};
use serde_json::{json, Value};
use tracing::{debug, warn};

pub const DEFAULT_STORAGE_KEY: &str = "battleCardData";

/// Values given to newly created entities.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreDefaults {
    pub subtitle: String,
    pub tab_headers: Vec<String>,
    /// Cell count for a new row when neither headers nor sibling rows say otherwise.
    pub row_cells: usize,
    pub cell_placeholder: String,
    pub detail_placeholder: String,
}

impl Default for StoreDefaults {
    fn default() -> Self {
        Self {
            subtitle: "New card subtitle...".to_string(),
            tab_headers: vec![
                "Feature".to_string(),
                "Our Product".to_string(),
                "Competitor".to_string(),
            ],
            row_cells: 3,
            cell_placeholder: "...".to_string(),
            detail_placeholder: "More details here...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// A stored snapshot was adopted.
    Snapshot,
    /// Storage held nothing usable; the seed was adopted and persisted.
    Seed,
    /// Neither storage nor seed produced a document.
    Empty,
}

#[derive(Debug)]
pub struct LoadReport {
    pub source: LoadSource,
    pub warnings: Vec<StoreError>,
}

/// Owner of the in-memory document.
///
/// Every mutating operation persists before it returns. When a write fails the
/// store keeps working in memory for the rest of the session and reports the
/// failure once through [`DocumentStore::take_notice`].
pub struct DocumentStore {
    doc: Document,
    storage: Box<dyn Storage>,
    seed: Box<dyn SeedSource>,
    key: String,
    defaults: StoreDefaults,
    clock: SuffixClock,
    durable: bool,
    pending_notice: Option<StoreError>,
}

impl DocumentStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            doc: Document::new(),
            storage: Box::new(storage),
            seed: Box::new(StaticSeed::embedded()),
            key: DEFAULT_STORAGE_KEY.to_string(),
            defaults: StoreDefaults::default(),
            clock: SuffixClock::new(),
            durable: true,
            pending_notice: None,
        }
    }

    pub fn with_seed(mut self, seed: impl SeedSource + 'static) -> Self {
        self.seed = Box::new(seed);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_defaults(mut self, defaults: StoreDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn defaults(&self) -> &StoreDefaults {
        &self.defaults
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_durable(&self) -> bool {
        self.durable
    }

    /// Persistence failure not yet shown to the user, if any.
    pub fn take_notice(&mut self) -> Option<StoreError> {
        self.pending_notice.take()
    }

    /// Adopt the stored snapshot, or the seed when storage has nothing usable.
    pub fn load(&mut self) -> LoadReport {
        let mut warnings = Vec::new();

        match self.storage.get_item(&self.key) {
            Ok(Some(text)) => match Document::from_json_str(&text) {
                Ok(doc) => {
                    debug!(key = %self.key, cards = doc.len(), "loaded stored snapshot");
                    self.doc = doc;
                    return LoadReport {
                        source: LoadSource::Snapshot,
                        warnings,
                    };
                }
                Err(err) => {
                    warn!(key = %self.key, error = %err, "stored snapshot is corrupt; reseeding");
                    warnings.push(StoreError::CorruptSnapshot(err));
                }
            },
            Ok(None) => debug!(key = %self.key, "no stored snapshot"),
            Err(source) => {
                warn!(key = %self.key, error = %source, "could not read stored snapshot; reseeding");
                warnings.push(StoreError::Persistence {
                    key: self.key.clone(),
                    source,
                });
            }
        }

        match self.seed.fetch() {
            Ok(doc) => {
                debug!(seed = %self.seed.describe(), cards = doc.len(), "adopted seed document");
                self.doc = doc;
                self.commit();
                LoadReport {
                    source: LoadSource::Seed,
                    warnings,
                }
            }
            Err(err) => {
                warn!(error = %err, "seed unavailable; starting with an empty document");
                self.doc = Document::new();
                warnings.push(err);
                LoadReport {
                    source: LoadSource::Empty,
                    warnings,
                }
            }
        }
    }

    /// Write the whole document under the storage key.
    pub fn persist(&mut self) -> Result<()> {
        let text = self
            .doc
            .to_json_pretty()
            .map_err(|e| StoreError::Persistence {
                key: self.key.clone(),
                source: e.into(),
            })?;
        self.storage
            .set_item(&self.key, &text)
            .map_err(|source| StoreError::Persistence {
                key: self.key.clone(),
                source,
            })
    }

    /// Remove the stored snapshot so the next load starts from the seed.
    pub fn clear_storage(&mut self) -> Result<()> {
        debug!(key = %self.key, storage = %self.storage.describe(), "clearing stored snapshot");
        self.storage
            .remove_item(&self.key)
            .map_err(|source| StoreError::Persistence {
                key: self.key.clone(),
                source,
            })
    }

    fn commit(&mut self) {
        if !self.durable {
            return;
        }
        if let Err(err) = self.persist() {
            warn!(
                storage = %self.storage.describe(),
                error = %err,
                "persistence failed; keeping changes in memory only"
            );
            self.durable = false;
            self.pending_notice = Some(err);
        }
    }

    /// Create a card keyed by the slug of `title` and return its id.
    pub fn add_card(&mut self, title: &str) -> Result<String> {
        let id = slugify(title);
        if id.is_empty() {
            return Err(StoreError::EmptyTitle {
                title: title.to_string(),
            });
        }
        if self.doc.contains_card(&id) {
            return Err(StoreError::DuplicateId { id });
        }

        let card = json!({
            "title": title,
            "subtitle": self.defaults.subtitle,
            "tabs": [],
        });
        self.doc.set(&Path::root().key(id.as_str()), card)?;
        debug!(card = %id, "added card");
        self.commit();
        Ok(id)
    }

    /// Append a tab to `card_id` and return the new tab id.
    pub fn add_tab(&mut self, card_id: &str, title: &str) -> Result<String> {
        if !self.doc.contains_card(card_id) {
            return Err(StoreError::UnknownCard {
                id: card_id.to_string(),
            });
        }
        if slugify(title).is_empty() {
            return Err(StoreError::EmptyTitle {
                title: title.to_string(),
            });
        }

        let tabs_path = Path::root().key(card_id).key("tabs");
        if self.doc.get(&tabs_path).is_none() {
            self.doc.set(&tabs_path, json!([]))?;
        }

        let id = loop {
            let candidate = tab_id(card_id, title, &self.clock.next_suffix());
            if !self.doc.all_tab_ids().contains(&candidate.as_str()) {
                break candidate;
            }
        };

        let tab = json!({
            "id": id,
            "title": title,
            "headers": self.defaults.tab_headers,
            "content": [],
        });
        match self.doc.get_mut(&tabs_path) {
            Some(Value::Array(tabs)) => tabs.push(tab),
            _ => return Err(StoreError::shape(&tabs_path, "tabs is not a sequence")),
        }
        debug!(card = %card_id, tab = %id, "added tab");
        self.commit();
        Ok(id)
    }

    /// Append `header` to the tab at `tab_path` and a placeholder cell to each of its rows.
    pub fn add_column(&mut self, tab_path: &Path, header: &str) -> Result<()> {
        let placeholder = self.defaults.cell_placeholder.clone();
        let tab = self
            .doc
            .get_mut(tab_path)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| StoreError::shape(tab_path, "not a tab"))?;

        // Check every row before touching anything so a bad row leaves the tab intact.
        let rows_ok = match tab.get("content") {
            None => true,
            Some(Value::Array(rows)) => rows
                .iter()
                .all(|r| r.get("row").is_some_and(Value::is_array)),
            Some(_) => false,
        };
        if !rows_ok || !tab.get("headers").is_none_or(Value::is_array) {
            return Err(StoreError::shape(tab_path, "tab rows or headers are malformed"));
        }

        if let Some(Value::Array(headers)) = tab.get_mut("headers") {
            headers.push(Value::from(header));
        } else {
            tab.insert("headers".to_string(), json!([header]));
        }
        if let Some(Value::Array(rows)) = tab.get_mut("content") {
            for row in rows.iter_mut() {
                if let Some(Value::Array(cells)) = row.get_mut("row") {
                    cells.push(Value::from(placeholder.as_str()));
                }
            }
        }

        debug!(tab = %tab_path, header, "added column");
        self.commit();
        Ok(())
    }

    /// Append a placeholder row to the sequence at `content_path`; returns its index.
    pub fn add_row(&mut self, content_path: &Path) -> Result<usize> {
        let cells = self.row_width(content_path);
        let row = json!({
            "row": vec![self.defaults.cell_placeholder.as_str(); cells],
            "details": [],
        });

        let index = match self.doc.get_mut(content_path) {
            Some(Value::Array(rows)) => {
                rows.push(row);
                rows.len() - 1
            }
            _ => return Err(StoreError::shape(content_path, "not a row sequence")),
        };
        debug!(content = %content_path, index, cells, "added row");
        self.commit();
        Ok(index)
    }

    fn row_width(&self, content_path: &Path) -> usize {
        let from_headers = content_path
            .parent()
            .and_then(|tab| self.doc.get(&tab.key("headers")))
            .and_then(Value::as_array)
            .map(Vec::len);
        let from_first_row = || {
            self.doc
                .get(content_path)
                .and_then(|rows| rows.get(0))
                .and_then(|first| first.get("row"))
                .and_then(Value::as_array)
                .map(Vec::len)
        };
        from_headers
            .or_else(from_first_row)
            .unwrap_or(self.defaults.row_cells)
    }

    /// Append a placeholder bullet to the details at `details_path`; returns its index.
    ///
    /// A legacy single-string detail is turned into a bullet list first, keeping
    /// its text as the first bullet unless it is empty.
    pub fn add_detail(&mut self, details_path: &Path) -> Result<usize> {
        let placeholder = Value::from(self.defaults.detail_placeholder.as_str());
        let slot = self
            .doc
            .get_mut(details_path)
            .ok_or_else(|| StoreError::shape(details_path, "no details here"))?;

        if let Value::String(blob) = slot {
            let upgraded = if blob.trim().is_empty() {
                Vec::new()
            } else {
                vec![Value::String(std::mem::take(blob))]
            };
            debug!(details = %details_path, "upgrading legacy detail text to bullets");
            *slot = Value::Array(upgraded);
        }

        let index = match slot {
            Value::Array(bullets) => {
                bullets.push(placeholder);
                bullets.len() - 1
            }
            _ => return Err(StoreError::shape(details_path, "details are not a list")),
        };
        debug!(details = %details_path, index, "added detail");
        self.commit();
        Ok(index)
    }

    /// Replace (or append) the value at `path`.
    ///
    /// Refused with `ShapeViolation` when the write would leave a row with a
    /// different number of cells than its tab has headers.
    pub fn update_field(&mut self, path: &Path, value: Value) -> Result<()> {
        self.keep_tables_sound(path, |doc| doc.set(path, value))?;
        debug!(path = %path, "updated field");
        self.commit();
        Ok(())
    }

    /// Remove whatever `path` addresses and return it.
    ///
    /// A lone header or cell cannot be removed, nor a tab's whole `headers` or
    /// `content` list or a row's `row` list: rows and headers must stay the
    /// same length.
    pub fn delete_by_path(&mut self, path: &Path) -> Result<Value> {
        if let Some(parent) = path.parent()
            && let Some(container) = parent.last().and_then(Seg::as_key)
            && (container == "headers" || container == "row")
            && self.doc.get(&parent).is_some_and(Value::is_array)
        {
            return Err(StoreError::shape(
                path,
                "single headers and cells are not deletable",
            ));
        }

        if is_table_frame(path) {
            return Err(StoreError::shape(path, "table structure is not deletable"));
        }

        let removed = self.keep_tables_sound(path, |doc| doc.delete(path))?;
        debug!(path = %path, "deleted");
        self.commit();
        Ok(removed)
    }

    /// Apply `change` and undo it if it broke the row/header invariant of the
    /// card it touched. Cards that were already ragged are left to the caller.
    fn keep_tables_sound<T>(
        &mut self,
        path: &Path,
        change: impl FnOnce(&mut Document) -> std::result::Result<T, PathError>,
    ) -> Result<T> {
        let Some(first) = path.segments().first() else {
            return Ok(change(&mut self.doc)?);
        };
        let card = Path::root().key(first.key_text());
        let before = self.doc.get(&card).cloned();
        let was_sound = before.as_ref().is_none_or(tables_are_sound);

        let out = change(&mut self.doc)?;

        if was_sound && !self.doc.get(&card).is_none_or(tables_are_sound) {
            match before {
                Some(previous) => self.doc.set(&card, previous)?,
                None => {
                    self.doc.delete(&card)?;
                }
            }
            warn!(path = %path, "refused change that unbalances rows and headers");
            return Err(StoreError::shape(
                path,
                "rows and headers would differ in length",
            ));
        }
        Ok(out)
    }
}

/// `tabs[t].headers`, `tabs[t].content` or `content[r].row` as a whole.
fn is_table_frame(path: &Path) -> bool {
    match path.segments() {
        [.., Seg::Key(parent), Seg::Index(_), Seg::Key(field)] => {
            (parent == "tabs" && (field == "headers" || field == "content"))
                || (parent == "content" && field == "row")
        }
        _ => false,
    }
}

/// Every row of every tab in `card` has one cell per header.
fn tables_are_sound(card: &Value) -> bool {
    let Some(tabs) = card.get("tabs").and_then(Value::as_array) else {
        return true;
    };
    tabs.iter().all(|tab| {
        let width = tab.get("headers").and_then(Value::as_array).map_or(0, Vec::len);
        tab.get("content").and_then(Value::as_array).is_none_or(|rows| {
            rows.iter()
                .all(|row| row.get("row").and_then(Value::as_array).map_or(0, Vec::len) == width)
        })
    })
}
