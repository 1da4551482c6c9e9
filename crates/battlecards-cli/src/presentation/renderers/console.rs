use anyhow::Result;
use battlecards_engine::ViewTree;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;

use crate::presentation::views::{CardTextView, HtmlView};
use crate::types::OutputFormat;

/// Writes command output to stdout in the requested format.
pub struct ConsoleRenderer {
    format: OutputFormat,
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: std::io::stdout().is_terminal(),
        }
    }

    pub fn render_tree(&self, tree: &ViewTree) -> Result<()> {
        match self.format {
            OutputFormat::Plain => print!("{}", CardTextView::new(tree).with_color(self.color)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tree)?),
            OutputFormat::Html => print!("{}", HtmlView::new(tree)),
        }
        Ok(())
    }

    /// A raw document value. Strings print bare in plain mode.
    pub fn render_value(&self, value: &Value) -> Result<()> {
        match (self.format, value) {
            (OutputFormat::Plain, Value::String(text)) => println!("{}", text),
            _ => println!("{}", serde_json::to_string_pretty(value)?),
        }
        Ok(())
    }

    /// A result model: JSON when asked for, its Display form otherwise.
    pub fn render<T: Serialize + Display>(&self, model: &T) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(model)?),
            OutputFormat::Plain | OutputFormat::Html => print!("{}", model),
        }
        Ok(())
    }

    pub fn notice(&self, message: &str) {
        if std::io::stderr().is_terminal() {
            eprintln!("{} {}", "Warning:".yellow().bold(), message);
        } else {
            eprintln!("Warning: {}", message);
        }
    }
}
