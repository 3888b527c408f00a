use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::debug;

use code_template::{
    cli::commands::{
        list::ListCommand, module::ModuleCommand, version::VersionCommand, CommandHandler, Context,
    },
    cli::{Cli, Commands},
    config::Settings,
    logging::{initialize_tracing, LogTarget},
    modules::catalog,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The browser owns the terminal, so its logs go to a file
    let target = if cli.command.is_some() {
        LogTarget::Stderr
    } else {
        LogTarget::cache_file()
    };
    initialize_tracing(cli.log_level.to_filter_directive(), target);

    let settings = Settings::resolve(cli.root, cli.ledger)
        .context("Failed to determine the project directory")?;
    debug!(root = %settings.root.display(), ledger = %settings.ledger_path.display(), "Settings resolved");

    let registry = catalog::builtin(&settings).context("Failed to load the module catalog")?;
    let context = Context::new(settings, registry);

    match cli.command {
        Some(Commands::Install { module }) => run(ModuleCommand::install(module), &context).await,
        Some(Commands::Update { module }) => run(ModuleCommand::update(module), &context).await,
        Some(Commands::Uninstall { module }) => {
            run(ModuleCommand::uninstall(module), &context).await
        }
        Some(Commands::Version { module }) => run(VersionCommand::new(module), &context).await,
        Some(Commands::List { filter, json }) => {
            run(ListCommand::new(filter, json), &context).await
        }
        None => browse(&context).await,
    }
}

async fn run<C: CommandHandler>(command: C, context: &Context) -> Result<()> {
    debug!(command = command.name(), "Executing command");
    command.execute(context).await?;
    Ok(())
}

#[cfg(feature = "tui")]
async fn browse(context: &Context) -> Result<()> {
    code_template::cli::tui::run_browser(context).await?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
async fn browse(_context: &Context) -> Result<()> {
    anyhow::bail!("Built without the interactive browser; pass a subcommand (see --help)")
}
