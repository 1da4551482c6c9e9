//! Inline editing of a single text field.
//!
//! A session holds a snapshot of the stored text and an editing buffer. It
//! ends in exactly one of two ways: commit (the buffer is written back) or
//! abort (the snapshot stands and nothing is written).

use battlecards_types::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditInput {
    Char(char),
    /// Explicit line break. Ignored by single-line fields.
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// The confirm key, with or without shift held.
    Confirm { shift: bool },
    Cancel,
    /// Focus left the editor.
    Blur,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Editing,
    Commit(String),
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    path: Path,
    snapshot: String,
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
    multiline: bool,
}

impl EditSession {
    pub fn new(path: Path, current: impl Into<String>, multiline: bool) -> Self {
        let snapshot = current.into();
        Self {
            path,
            cursor: snapshot.len(),
            buffer: snapshot.clone(),
            snapshot,
            multiline,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer != self.snapshot
    }

    /// Text to write back when the session is finalised from outside.
    pub fn into_commit(self) -> String {
        self.buffer
    }

    pub fn apply(&mut self, input: EditInput) -> EditOutcome {
        match input {
            EditInput::Char('\n') | EditInput::Newline => {
                if self.multiline {
                    self.insert('\n');
                }
            }
            EditInput::Char(c) => self.insert(c),
            EditInput::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.buffer.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                }
            }
            EditInput::Delete => {
                if let Some(next) = self.next_boundary() {
                    self.buffer.replace_range(self.cursor..next, "");
                }
            }
            EditInput::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            EditInput::Right => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
            }
            EditInput::Home => {
                self.cursor = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
            }
            EditInput::End => {
                self.cursor = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
            }
            EditInput::Confirm { shift } => {
                if self.multiline || !shift {
                    return EditOutcome::Commit(self.buffer.clone());
                }
            }
            EditInput::Blur => return EditOutcome::Commit(self.buffer.clone()),
            EditInput::Cancel => {
                self.buffer = self.snapshot.clone();
                self.cursor = self.buffer.len();
                return EditOutcome::Abort;
            }
        }
        EditOutcome::Editing
    }

    fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}
