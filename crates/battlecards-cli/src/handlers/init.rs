use crate::context::ExecutionContext;
use anyhow::Result;
use battlecards_runtime::{Config, DEFAULT_PASSWORD};

pub fn handle(ctx: &ExecutionContext, force: bool) -> Result<()> {
    let config_path = ctx.config_path();

    if config_path.exists() && !force {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
        return Ok(());
    }

    let mut config = Config::default();
    config.edit.password = Some(DEFAULT_PASSWORD.to_string());
    config.save_to(&config_path)?;

    println!("Wrote {}", config_path.display());
    println!("Change edit.password before sharing this workspace.");
    Ok(())
}
