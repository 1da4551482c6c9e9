//! The application context.
//!
//! `App` is the single owner of the document store, the navigation state, the
//! edit-mode flag, the open edit session and the last rendered tree. Every
//! operation follows the same cycle: mutate through the store (which
//! persists), reconcile the view state, re-render the whole tree.

use crate::{
    AppError, Config, EditInput, EditOutcome, EditSession, GateOutcome, PasswordGate, Prompter,
    Result as RuntimeResult,
};
use battlecards_engine::{render, Action, ActionKind, RenderOptions, ViewState, ViewTree};
use battlecards_store::{
    DocumentStore, FileSeed, FileStorage, LoadReport, LoadSource, StaticSeed, StoreError,
};
use battlecards_types::{Document, Path, PathError, Seg};
use serde_json::Value;
use std::path::Path as FsPath;
use tracing::{debug, error, info, warn};

pub type Result<T> = std::result::Result<T, AppError>;

pub const STORAGE_DIR: &str = "storage";

pub const PROMPT_CARD_TITLE: &str = "Enter New Card Title (e.g., Salesforce)";
pub const PROMPT_TAB_TITLE: &str = "Enter New Tab Title";
pub const PROMPT_COLUMN_HEADER: &str = "Enter New Column Header";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this item?";

#[derive(Debug, Clone, Default)]
pub struct AppSettings {
    pub gate: PasswordGate,
    /// Return path errors instead of logging and ignoring them.
    pub strict_paths: bool,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> RuntimeResult<Self> {
        Ok(Self {
            gate: PasswordGate::from_config(&config.edit)?,
            strict_paths: config.edit.strict_paths,
        })
    }
}

pub struct App {
    store: DocumentStore,
    view: ViewState,
    settings: AppSettings,
    edit_mode: bool,
    session: Option<EditSession>,
    tree: ViewTree,
    load_source: LoadSource,
}

impl App {
    /// Load `store` and render the initial view.
    pub fn new(mut store: DocumentStore, settings: AppSettings) -> (Self, LoadReport) {
        let report = store.load();
        info!(source = ?report.source, cards = store.document().len(), "document loaded");

        let mut view = ViewState::new();
        view.reconcile(store.document());
        let tree = render(store.document(), &view, RenderOptions::default());

        let app = Self {
            store,
            view,
            settings,
            edit_mode: false,
            session: None,
            tree,
            load_source: report.source,
        };
        (app, report)
    }

    /// Open the workspace in `data_dir` as described by `config`.
    pub fn open(data_dir: &FsPath, config: &Config) -> RuntimeResult<(Self, LoadReport)> {
        let storage = FileStorage::new(data_dir.join(STORAGE_DIR));
        let store = DocumentStore::new(storage)
            .with_key(config.storage.key.clone())
            .with_defaults(config.store_defaults());
        let store = match config.seed_path(data_dir) {
            Some(path) => store.with_seed(FileSeed::new(path)),
            None => store.with_seed(StaticSeed::embedded()),
        };
        let settings = AppSettings::from_config(config)?;
        Ok(Self::new(store, settings))
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    /// A storage problem the user has not been told about yet.
    pub fn take_notice(&mut self) -> Option<String> {
        self.store.take_notice().map(|err| {
            format!("{} (changes are kept for this session only)", err)
        })
    }

    fn refresh(&mut self) {
        self.view.reconcile(self.store.document());
        self.tree = render(
            self.store.document(),
            &self.view,
            RenderOptions {
                edit_mode: self.edit_mode,
            },
        );
    }

    fn require_edit_mode(&self) -> Result<()> {
        if self.edit_mode {
            Ok(())
        } else {
            Err(AppError::EditModeRequired)
        }
    }

    /// Route a path failure: returned in strict mode, otherwise logged and dropped.
    fn path_failure(&self, err: PathError) -> Result<()> {
        error!(error = %err, "path did not resolve");
        if self.settings.strict_paths {
            Err(AppError::Path(err))
        } else {
            Ok(())
        }
    }

    fn store_result<T>(&self, result: std::result::Result<T, StoreError>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(StoreError::Path(err)) => self.path_failure(err).map(|()| None),
            Err(err @ StoreError::ShapeViolation { .. }) => {
                error!(error = %err, "operation does not fit the target");
                if self.settings.strict_paths {
                    Err(err.into())
                } else {
                    Ok(None)
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    // --- navigation ---

    pub fn select_card(&mut self, card_id: &str) -> bool {
        let changed = self.view.select_card(self.store.document(), card_id);
        if changed {
            self.refresh();
        }
        changed
    }

    /// Select a sub-tab of the active card.
    pub fn select_sub_tab(&mut self, tab_id: &str) -> bool {
        let Some(card_id) = self.view.active_card().map(str::to_string) else {
            return false;
        };
        let changed = self
            .view
            .select_sub_tab(self.store.document(), &card_id, tab_id);
        if changed {
            self.refresh();
        }
        changed
    }

    pub fn toggle_row(&mut self, card_id: &str, tab_id: &str, row: usize) -> bool {
        let expanded = self.view.toggle_row_expanded(card_id, tab_id, row);
        self.refresh();
        expanded
    }

    // --- edit mode ---

    pub fn enter_edit_mode(&mut self, password: &str) -> GateOutcome {
        if !self.settings.gate.check(password) {
            warn!("edit mode password rejected");
            return GateOutcome::Rejected;
        }
        self.edit_mode = true;
        info!("entered edit mode");
        self.refresh();
        GateOutcome::Entered
    }

    /// Leave edit mode, committing any open edit first.
    pub fn exit_edit_mode(&mut self) -> Result<()> {
        self.finish_session()?;
        self.edit_mode = false;
        info!("left edit mode");
        self.refresh();
        Ok(())
    }

    // --- edit sessions ---

    /// Open an inline editor on the text at `path`.
    ///
    /// An editor already open elsewhere is committed first.
    pub fn begin_edit(&mut self, path: &Path) -> Result<Option<&EditSession>> {
        self.require_edit_mode()?;
        self.finish_session()?;

        let Some(editable) = self.tree.find_editable(path) else {
            return match self.store.document().get(path) {
                None => self
                    .path_failure(PathError::Invalid {
                        path: path.clone(),
                        reason: "nothing rendered at this path",
                    })
                    .map(|()| None),
                Some(_) => Err(AppError::NotEditable { path: path.clone() }),
            };
        };
        let multiline = editable.multiline;
        let current = match self.store.document().get(path) {
            Some(Value::String(text)) => text.clone(),
            _ => editable.raw.clone(),
        };

        debug!(path = %path, multiline, "edit session opened");
        self.session = Some(EditSession::new(path.clone(), current, multiline));
        Ok(self.session.as_ref())
    }

    /// Feed one input to the open editor.
    pub fn edit_input(&mut self, input: EditInput) -> Result<Option<EditOutcome>> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let outcome = session.apply(input);
        match &outcome {
            EditOutcome::Editing => {}
            EditOutcome::Abort => {
                debug!(path = %session.path(), "edit session aborted");
                self.session = None;
            }
            EditOutcome::Commit(text) => {
                let text = text.clone();
                if let Some(session) = self.session.take() {
                    self.commit_text(session.path(), text)?;
                }
            }
        }
        Ok(Some(outcome))
    }

    /// Commit the open editor, if any.
    pub fn finish_session(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            let path = session.path().clone();
            self.commit_text(&path, session.into_commit())?;
        }
        Ok(())
    }

    /// Drop the open editor without writing.
    pub fn abort_session(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(path = %session.path(), "edit session aborted");
        }
    }

    fn commit_text(&mut self, path: &Path, text: String) -> Result<()> {
        debug!(path = %path, "edit session committed");
        self.update_field(path, Value::String(text))
    }

    // --- mutations ---

    /// Create a card and make it active. Blank titles are treated as cancel.
    pub fn add_card(&mut self, title: &str) -> Result<Option<String>> {
        self.require_edit_mode()?;
        if title.trim().is_empty() {
            return Ok(None);
        }
        let id = self.store.add_card(title)?;
        self.view.select_card(self.store.document(), &id);
        self.refresh();
        Ok(Some(id))
    }

    /// Create a tab and make it the card's active sub-tab.
    pub fn add_tab(&mut self, card_id: &str, title: &str) -> Result<Option<String>> {
        self.require_edit_mode()?;
        if title.trim().is_empty() {
            return Ok(None);
        }
        let id = self.store.add_tab(card_id, title)?;
        self.view
            .select_sub_tab(self.store.document(), card_id, &id);
        self.refresh();
        Ok(Some(id))
    }

    pub fn add_column(&mut self, tab_path: &Path, header: &str) -> Result<bool> {
        self.require_edit_mode()?;
        if header.trim().is_empty() {
            return Ok(false);
        }
        let result = self.store.add_column(tab_path, header);
        let done = self.store_result(result)?;
        self.refresh();
        Ok(done.is_some())
    }

    pub fn add_row(&mut self, content_path: &Path) -> Result<Option<usize>> {
        self.require_edit_mode()?;
        let result = self.store.add_row(content_path);
        let row = self.store_result(result)?;
        self.refresh();
        Ok(row)
    }

    /// Append a detail bullet and expand the row so it is visible.
    pub fn add_detail(&mut self, details_path: &Path) -> Result<Option<usize>> {
        self.require_edit_mode()?;
        let result = self.store.add_detail(details_path);
        let index = self.store_result(result)?;
        if index.is_some()
            && let Some((card_id, tab_id, row)) = self.row_address(details_path)
            && !self.view.is_expanded(&card_id, &tab_id, row)
        {
            self.view.toggle_row_expanded(&card_id, &tab_id, row);
        }
        self.refresh();
        Ok(index)
    }

    pub fn update_field(&mut self, path: &Path, value: Value) -> Result<()> {
        self.require_edit_mode()?;
        let result = self.store.update_field(path, value);
        self.store_result(result)?;
        self.refresh();
        Ok(())
    }

    /// Delete whatever `path` addresses.
    pub fn delete(&mut self, path: &Path) -> Result<Option<Value>> {
        self.require_edit_mode()?;
        let row = self.row_address(path).filter(|_| is_whole_row(path));
        let result = self.store.delete_by_path(path);
        let removed = self.store_result(result)?;
        if removed.is_some()
            && let Some((card_id, tab_id, index)) = row
        {
            self.view.forget_row(&card_id, &tab_id, index);
        }
        self.refresh();
        Ok(removed)
    }

    /// Card id, tab id and row index of a path at or below `card.tabs[t].content[r]`.
    fn row_address(&self, path: &Path) -> Option<(String, String, usize)> {
        match path.segments() {
            [Seg::Key(card), Seg::Key(tabs), Seg::Index(t), Seg::Key(content), Seg::Index(r), ..]
                if tabs == "tabs" && content == "content" =>
            {
                let tab_id = self.store.document().tab_ids(card).get(*t)?.to_string();
                Some((card.clone(), tab_id, *r))
            }
            _ => None,
        }
    }

    // --- affordances ---

    /// Carry out a rendered affordance, asking `prompter` for whatever it needs.
    ///
    /// Returns `false` when the user cancelled or the action did nothing.
    pub fn perform(&mut self, action: &Action, prompter: &mut dyn Prompter) -> Result<bool> {
        self.require_edit_mode()?;
        self.finish_session()?;

        if action.kind.is_delete() {
            if !prompter.confirm(CONFIRM_DELETE) {
                return Ok(false);
            }
            return Ok(self.delete(&action.path)?.is_some());
        }

        match action.kind {
            ActionKind::AddCard => match prompter.prompt_for_text(PROMPT_CARD_TITLE) {
                Some(title) => Ok(self.add_card(&title)?.is_some()),
                None => Ok(false),
            },
            ActionKind::AddTab => {
                let Some(card_id) = action.path.segments().first().and_then(Seg::as_key) else {
                    return Ok(false);
                };
                let card_id = card_id.to_string();
                match prompter.prompt_for_text(PROMPT_TAB_TITLE) {
                    Some(title) => Ok(self.add_tab(&card_id, &title)?.is_some()),
                    None => Ok(false),
                }
            }
            ActionKind::AddColumn => match prompter.prompt_for_text(PROMPT_COLUMN_HEADER) {
                Some(header) => self.add_column(&action.path, &header),
                None => Ok(false),
            },
            ActionKind::AddRow => Ok(self.add_row(&action.path)?.is_some()),
            ActionKind::AddDetail => Ok(self.add_detail(&action.path)?.is_some()),
            ActionKind::DeleteCard
            | ActionKind::DeleteTab
            | ActionKind::DeleteRow
            | ActionKind::DeleteDetail => Ok(false),
        }
    }

    /// Clear stored data and reload from the seed.
    pub fn reset(&mut self) -> Result<LoadReport> {
        self.session = None;
        self.store.clear_storage()?;
        let report = self.store.load();
        self.load_source = report.source;
        self.view = ViewState::new();
        self.refresh();
        info!(source = ?report.source, "document reset");
        Ok(report)
    }
}

/// Exactly `card.tabs[t].content[r]`, not a cell or detail inside the row.
fn is_whole_row(path: &Path) -> bool {
    matches!(
        path.segments(),
        [Seg::Key(_), Seg::Key(_), Seg::Index(_), Seg::Key(_), Seg::Index(_)]
    )
}
