use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use launch_atlas::app::AppContext;
use launch_atlas::cli::{commands, Cli, Commands};
use launch_atlas::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = if cli.ephemeral {
        AppContext::ephemeral(config)?
    } else {
        AppContext::new(config)?
    };

    match cli.command {
        Commands::List { feed } => {
            commands::list_launches(&ctx, &feed).await?;
        }
        Commands::Agencies { pages } => {
            commands::list_agencies(&ctx, pages).await?;
        }
        Commands::Like { id } => {
            commands::toggle_like(&ctx, &id).await?;
        }
        Commands::Liked => {
            commands::list_liked(&ctx).await?;
        }
        Commands::Open { id, pages } => {
            commands::open_launch(&ctx, &id, pages).await?;
        }
        Commands::Watch { feed } => {
            commands::watch(&ctx, &feed).await?;
        }
    }

    Ok(())
}
