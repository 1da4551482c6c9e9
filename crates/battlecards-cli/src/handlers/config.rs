use crate::context::ExecutionContext;
use crate::presentation::renderers::ConsoleRenderer;
use crate::presentation::view_models::ConfigViewModel;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let path = ctx.config_path();
    let exists = path.exists();
    let model = ConfigViewModel::new(path, exists, ctx.config()?);
    ConsoleRenderer::new(ctx.format).render(&model)
}
