use crate::args::EditCommand;
use crate::context::ExecutionContext;
use crate::presentation::prompt::ConsolePrompter;
use crate::presentation::renderers::ConsoleRenderer;
use crate::presentation::view_models::EditResultViewModel;
use anyhow::{Context, Result, bail};
use battlecards_runtime::app::CONFIRM_DELETE;
use battlecards_runtime::{App, GateOutcome, Prompter};
use battlecards_types::Path;
use is_terminal::IsTerminal;
use serde_json::Value;

pub fn handle(ctx: &ExecutionContext, password: Option<&str>, command: EditCommand) -> Result<()> {
    let (mut app, _report) = ctx.open_app()?;
    let renderer = ConsoleRenderer::new(ctx.format);

    let password = match password {
        Some(password) => password.to_string(),
        None if std::io::stdin().is_terminal() => ConsolePrompter::stdio()
            .prompt_for_text("Password")
            .context("No password given")?,
        None => bail!("Editing needs a password: pass --password or set BATTLECARDS_PASSWORD"),
    };
    if app.enter_edit_mode(&password) == GateOutcome::Rejected {
        bail!("Incorrect password");
    }

    let Some(result) = apply(&mut app, command)? else {
        return Ok(());
    };

    if let Some(notice) = app.take_notice() {
        renderer.notice(&notice);
    }
    renderer.render(&result)
}

fn parse(path: &str) -> Result<Path> {
    Path::parse(path).with_context(|| format!("Invalid path '{}'", path))
}

/// Run one edit; `None` when the user backed out.
fn apply(app: &mut App, command: EditCommand) -> Result<Option<EditResultViewModel>> {
    let result = match command {
        EditCommand::Set { path, value, json } => {
            let path = parse(&path)?;
            let value = if json {
                serde_json::from_str(&value).context("VALUE is not valid JSON")?
            } else {
                Value::String(value)
            };
            app.update_field(&path, value.clone())?;
            if app.document().get(&path) != Some(&value) {
                bail!("Nothing changed: {} could not be written", path);
            }
            EditResultViewModel::new("updated", path.to_string())
        }

        EditCommand::Delete { path, yes } => {
            let path = parse(&path)?;
            if !yes && !ConsolePrompter::stdio().confirm(CONFIRM_DELETE) {
                eprintln!("Cancelled.");
                return Ok(None);
            }
            if app.delete(&path)?.is_none() {
                bail!("Nothing changed: {} could not be deleted", path);
            }
            EditResultViewModel::new("deleted", path.to_string())
        }

        EditCommand::AddCard { title } => match app.add_card(&title)? {
            Some(id) => EditResultViewModel::new("added card", id),
            None => bail!("Card title must not be empty"),
        },

        EditCommand::AddTab { card, title } => match app.add_tab(&card, &title)? {
            Some(id) => EditResultViewModel::new("added tab", format!("{}.tabs", card)).with_id(id),
            None => bail!("Tab title must not be empty"),
        },

        EditCommand::AddColumn { tab_path, header } => {
            if header.trim().is_empty() {
                bail!("Column header must not be empty");
            }
            let path = parse(&tab_path)?;
            if !app.add_column(&path, &header)? {
                bail!("Nothing changed: {} is not a tab", path);
            }
            EditResultViewModel::new("added column", path.to_string())
        }

        EditCommand::AddRow { content_path } => {
            let path = parse(&content_path)?;
            match app.add_row(&path)? {
                Some(index) => EditResultViewModel::new("added row", path.to_string()).with_index(index),
                None => bail!("Nothing changed: {} is not a row list", path),
            }
        }

        EditCommand::AddDetail { details_path } => {
            let path = parse(&details_path)?;
            match app.add_detail(&path)? {
                Some(index) => {
                    EditResultViewModel::new("added detail", path.to_string()).with_index(index)
                }
                None => bail!("Nothing changed: {} is not a detail list", path),
            }
        }
    };
    Ok(Some(result))
}
