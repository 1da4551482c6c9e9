use crate::context::ExecutionContext;
use crate::presentation::renderers::TuiRenderer;
use anyhow::Result;
use tracing::info;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let (app, report) = ctx.open_app()?;
    info!(source = ?report.source, data_dir = %ctx.data_dir().display(), "starting browse");

    TuiRenderer::new(app, &report).run()
}
