use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use huffscrape::app::AppContext;
use huffscrape::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.config.as_deref())?;

    match cli.command {
        Commands::Scrape { fresh } => {
            commands::scrape(&ctx, fresh).await?;
        }
        Commands::Export => {
            commands::export(&ctx)?;
        }
        Commands::Status => {
            commands::status(&ctx)?;
        }
    }

    Ok(())
}
