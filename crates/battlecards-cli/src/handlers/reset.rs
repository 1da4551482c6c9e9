use crate::context::ExecutionContext;
use crate::presentation::prompt::ConsolePrompter;
use anyhow::Result;
use battlecards_runtime::Prompter;
use battlecards_store::LoadSource;

pub fn handle(ctx: &ExecutionContext, yes: bool) -> Result<()> {
    if !yes
        && !ConsolePrompter::stdio()
            .confirm("Discard all saved changes and start again from the seed?")
    {
        eprintln!("Cancelled.");
        return Ok(());
    }

    let (mut app, _report) = ctx.open_app()?;
    let report = app.reset()?;

    match report.source {
        LoadSource::Seed => println!("Saved data cleared; loaded {} cards from the seed.", app.document().len()),
        LoadSource::Empty => println!("Saved data cleared; the seed could not be loaded, starting empty."),
        LoadSource::Snapshot => println!("Saved data cleared."),
    }
    Ok(())
}
