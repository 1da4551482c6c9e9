//! Text prompts and confirmations requested by affordances.

use std::collections::VecDeque;

/// Asks the user for input on behalf of an action.
///
/// `None` from [`Prompter::prompt_for_text`] means the prompt was cancelled.
pub trait Prompter {
    fn prompt_for_text(&mut self, title: &str) -> Option<String>;

    fn confirm(&mut self, message: &str) -> bool;
}

/// Answers prompts from a fixed script, for non-interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Option<String>>,
    confirm: bool,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    /// Confirms everything and has no text answers queued.
    pub fn confirming() -> Self {
        Self {
            confirm: true,
            ..Self::default()
        }
    }

    /// Refuses every confirmation.
    pub fn declining() -> Self {
        Self::default()
    }

    pub fn answer(mut self, text: impl Into<String>) -> Self {
        self.answers.push_back(Some(text.into()));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    /// Titles and messages shown so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_for_text(&mut self, title: &str) -> Option<String> {
        self.asked.push(title.to_string());
        self.answers.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirm
    }
}
