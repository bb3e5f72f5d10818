//! Roster CLI entry point.
//!
//! Binary name: `roster`
//!
//! Parses CLI arguments, loads configuration, initializes tracing and the
//! assignment store, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, DocsCommand};
use roster_infra::config::load_config;
use roster_infra::filesystem::resolve_data_dir;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "roster", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);
    let config = load_config(&data_dir).await;

    roster_observe::tracing_setup::init_tracing(&config.logging, cli.level_override())
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;
    tracing::debug!(data_dir = %data_dir.display(), "configuration loaded");

    let result = dispatch(cli, data_dir, config).await;
    roster_observe::tracing_setup::shutdown_tracing();
    result
}

async fn dispatch(
    cli: Cli,
    data_dir: std::path::PathBuf,
    config: roster_types::config::RosterConfig,
) -> anyhow::Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Similar {
            corpus,
            query,
            k,
            min_score,
        } => cli::similar::run(&config, &corpus, &query, k, min_score, json).await,

        Commands::Docs { action } => match action {
            DocsCommand::Search { index, query, k } => {
                cli::similar::search_docs(&config, &index, &query, k, json).await
            }
        },

        Commands::Assign { action } => {
            let state = AppState::init(data_dir, config).await?;
            cli::assign::run(&state, action, json).await
        }

        Commands::Check {
            freelancer,
            start,
            end,
            allocation,
            exclude,
        } => {
            let state = AppState::init(data_dir, config).await?;
            cli::check::run(&state, freelancer, start, end, allocation, exclude, json).await
        }

        Commands::Completions { .. } => Ok(()),
    }
}
