pub mod args;
pub mod completion;
pub mod config;
pub mod context;
pub mod update;

pub use args::{Cli, Commands, CompletionShell};
pub use config::ConfigRequest;
pub use context::AppContext;

use crate::services::KillMode;
use anyhow::Result;

/// Runs a parsed command line against the real adapters
pub fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::new(&cli.config_dir);
    dispatch(cli.command, &ctx)
}

/// Runs one command with the adapters wired into `ctx`
pub fn dispatch(command: Commands, ctx: &AppContext) -> Result<()> {
    match command {
        Commands::List => ctx.lifecycle().list(),
        Commands::Clean => ctx.lifecycle().clean(),
        Commands::Up { caminho } => ctx.devcontainer().up(&ctx.workspace(caminho.as_deref())?),
        Commands::Run { caminho } => ctx.devcontainer().run(&ctx.workspace(caminho.as_deref())?),
        Commands::Open { caminho } => ctx.devcontainer().open(&ctx.workspace(caminho.as_deref())?),
        Commands::Shell { caminho } => {
            ctx.devcontainer().shell(&ctx.workspace(caminho.as_deref())?)
        }
        Commands::Exec { path, command } => ctx
            .devcontainer()
            .exec(&ctx.workspace(path.as_deref())?, &command),
        Commands::Ports { caminho } => ctx.lifecycle().ports(&ctx.workspace(caminho.as_deref())?),
        Commands::Logs { follow, caminho } => ctx
            .lifecycle()
            .logs(&ctx.workspace(caminho.as_deref())?, follow),
        Commands::Down { caminho } => {
            ctx.lifecycle().down(&ctx.workspace(caminho.as_deref())?)?;
            Ok(())
        }
        Commands::Kill { keep, caminho } => {
            let mode = if keep { KillMode::Keep } else { KillMode::Remove };
            ctx.lifecycle()
                .kill(&ctx.workspace(caminho.as_deref())?, mode)?;
            Ok(())
        }
        Commands::Config {
            chave,
            valor,
            global,
            interactive,
        } => config::run(
            ctx.config_dir(),
            &ConfigRequest {
                key: chave,
                value: valor,
                global,
                interactive,
            },
        ),
        Commands::AddCompletion { shell } => completion::install(shell, ctx.config_dir()),
        Commands::Update => update::update(),
    }
}
