use tracing::{info, warn};

use crate::app::{AppContext, Result};
use crate::checkpoint::CheckpointStore;
use crate::output;

pub async fn scrape(ctx: &AppContext, fresh: bool) -> Result<()> {
    if fresh {
        ctx.store.init()?;
    } else {
        info!("Resuming from checkpoint in {}", ctx.config.output.data_dir.display());
    }

    let summary = match ctx.walker().walk().await {
        Ok(summary) => summary,
        Err(e) => {
            if e.is_resumable() {
                warn!("Walk stopped: {}. Checkpoint is intact; rerun without --fresh to resume", e);
            }
            return Err(e);
        }
    };

    println!(
        "Scraped {} products ({} already done) across {} pages",
        summary.processed, summary.skipped, summary.pages
    );

    export(ctx)
}

/// Write `df_info.csv` from the checkpoint and show its first rows.
pub fn export(ctx: &AppContext) -> Result<()> {
    let checkpoint = ctx.store.load()?;
    let path = ctx.products_table();
    output::write_products(&path, &checkpoint.products)?;
    println!("Wrote {} products to {}", checkpoint.products.len(), path.display());

    for (id, product) in output::read_products(&path)?.into_iter().take(5) {
        println!(
            "{:>4}  {:<40}  ${:<7}  {} reviews",
            id,
            product.name,
            product.price.map(|p| p.to_string()).unwrap_or_default(),
            product.review_count
        );
    }

    Ok(())
}

pub fn status(ctx: &AppContext) -> Result<()> {
    let checkpoint = ctx.store.load()?;
    let markers = &checkpoint.markers;

    println!("Data directory:   {}", ctx.config.output.data_dir.display());
    println!("Pages completed:  {}", markers.completed_pages());
    println!("Entries scraped:  {}", markers.processed_count());
    println!("Last marker:      {}", markers.last());
    match checkpoint.saved_at {
        Some(at) => println!("Last saved:       {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Last saved:       never"),
    }

    Ok(())
}
