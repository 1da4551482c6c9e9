//! Line-based prompts for console commands.

use std::io::{self, BufRead, Write};

use battlecards_runtime::Prompter;

/// Asks on `output` and reads answers line by line from `input`.
///
/// End of input counts as cancel (or "no" for confirmations).
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        write!(self.output, "{}", question).ok()?;
        self.output.flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn prompt_for_text(&mut self, title: &str) -> Option<String> {
        self.ask(&format!("{}: ", title))
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.ask(&format!("{} [y/N] ", message))
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }
}
