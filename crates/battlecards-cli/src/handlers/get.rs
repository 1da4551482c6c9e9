use crate::context::ExecutionContext;
use crate::presentation::renderers::ConsoleRenderer;
use anyhow::{Result, bail};
use battlecards_types::Path;

pub fn handle(ctx: &ExecutionContext, path: &str) -> Result<()> {
    let path = Path::parse(path)?;
    let (app, _report) = ctx.open_app()?;

    let Some(value) = app.document().get(&path) else {
        bail!("Nothing stored at {}", path);
    };
    ConsoleRenderer::new(ctx.format).render_value(value)
}
