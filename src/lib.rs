//! # huffscrape
//!
//! A resumable scraper for the disposable-device catalog of one storefront.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Extractor → Walker ⇄ CheckpointStore
//!                         ↓
//!                 ReviewCollector → CSV output
//! ```
//!
//! The walker processes one listing entry at a time and saves the checkpoint
//! pair after each one, so an interrupted run picks up at the first entry it
//! had not finished.
//!
//! ## Quick Start
//!
//! ```bash
//! # Start a new scrape
//! huffscrape scrape --fresh
//!
//! # Resume after an interruption
//! huffscrape scrape
//!
//! # Check progress / rewrite the product table
//! huffscrape status
//! huffscrape export
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the config,
/// checkpoint store, fetcher, extractor and review collector.
pub mod app;

/// Resumable walk state.
///
/// - [`CheckpointStore`](checkpoint::CheckpointStore): load/save the marker and product pair
/// - [`FileCheckpointStore`](checkpoint::FileCheckpointStore): two JSON files on disk
/// - [`MemoryCheckpointStore`](checkpoint::MemoryCheckpointStore): in-process store
pub mod checkpoint;

/// Command-line interface using clap.
///
/// - `scrape [--fresh]` - Walk the catalog
/// - `export` - Write the product table
/// - `status` - Show checkpoint progress
pub mod cli;

/// Configuration loaded from `~/.config/huffscrape/config.toml`.
pub mod config;

/// Core domain models: markers, resume cursor, products, reviews.
pub mod domain;

/// Storefront markup knowledge behind the [`Extractor`](extract::Extractor) trait.
pub mod extract;

/// Listing page fetching with classified errors.
pub mod fetcher;

/// CSV product and review tables.
pub mod output;

/// Browser-driven review collection via chromiumoxide.
pub mod scraper;

/// The resumable pagination loop.
pub mod walker;

#[cfg(test)]
mod test_utils;
