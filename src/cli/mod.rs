pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "huffscrape")]
#[command(about = "Resumable product and review scraper", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/huffscrape/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk the catalog, resuming from the last checkpoint
    Scrape {
        /// Discard the checkpoint and start from the first listing page
        #[arg(long)]
        fresh: bool,
    },
    /// Write the product table from the checkpoint
    Export,
    /// Show checkpoint progress
    Status,
}
