use super::args::{Cli, Commands};
use super::handlers;
use crate::context::ExecutionContext;
use crate::logging::{self, LogTarget};
use anyhow::Result;
use battlecards_core::resolve_workspace_path;
use is_terminal::IsTerminal;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;
    let ctx = ExecutionContext::new(data_dir, cli.format);

    let command = cli.command.unwrap_or(Commands::Browse);
    let interactive = matches!(command, Commands::Browse) && std::io::stdout().is_terminal();

    let target = if interactive {
        LogTarget::File(ctx.log_path())
    } else {
        LogTarget::Stderr
    };
    logging::init(cli.log_level, target)?;

    match command {
        Commands::Browse if interactive => handlers::browse::handle(&ctx),
        Commands::Browse => handlers::show::handle(&ctx, handlers::show::ShowOptions::default()),

        Commands::Show { card, tab, expand } => handlers::show::handle(
            &ctx,
            handlers::show::ShowOptions { card, tab, expand },
        ),

        Commands::Get { path } => handlers::get::handle(&ctx, &path),

        Commands::Edit { password, command } => {
            handlers::edit::handle(&ctx, password.as_deref(), command)
        }

        Commands::Reset { yes } => handlers::reset::handle(&ctx, yes),

        Commands::Init { force } => handlers::init::handle(&ctx, force),

        Commands::Config => handlers::config::handle(&ctx),
    }
}
