//! Deck Reconcile - MTG collection vs. deck list reconciliation
//!
//! Diffs deck and available lists against a collection export and writes
//! per-deck owned/missing lists.

use clap::Parser;
use deck_reconcile::config::{
    DEFAULT_AVAILABLE_DIR, DEFAULT_COLLECTION_PATH, DEFAULT_DECK_DIR, DEFAULT_OUT_DIR,
};
use deck_reconcile::{Config, DiffMode};
use std::path::PathBuf;

/// Reconcile a card collection against deck and available lists
#[derive(Parser, Debug)]
#[command(name = "deck_reconcile")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the collection CSV export
    #[arg(short, long, default_value = DEFAULT_COLLECTION_PATH)]
    collection: PathBuf,

    /// Directory containing deck list files
    #[arg(short, long, default_value = DEFAULT_DECK_DIR)]
    decks: PathBuf,

    /// Directory containing available-card list files
    #[arg(short, long, default_value = DEFAULT_AVAILABLE_DIR)]
    available: PathBuf,

    /// Output directory for diffs.csv and per-deck lists
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    out: PathBuf,

    /// Do not rename list files carrying the legacy "Deck - " prefix
    #[arg(long, default_value_t = false)]
    no_rename: bool,

    /// Also require quantities to match when diffing against the collection
    #[arg(long, default_value_t = false)]
    exact_quantities: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            collection_path: args.collection,
            deck_dir: args.decks,
            available_dir: args.available,
            out_dir: args.out,
            rename_legacy_prefix: !args.no_rename,
            diff_mode: if args.exact_quantities {
                DiffMode::Exact
            } else {
                DiffMode::Existence
            },
        }
    }
}

fn main() {
    // Set RUST_LOG to control verbosity, e.g. RUST_LOG=deck_reconcile=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(Args::parse());
    log::info!("Starting deck_reconcile...");
    log::info!("Collection: {}", config.collection_path.display());
    log::info!("Decks: {}", config.deck_dir.display());
    log::info!("Available: {}", config.available_dir.display());

    match deck_reconcile::run(&config) {
        Ok(summary) => {
            log::info!(
                "Diff: {} collection-only, {} aggregate-only ({} printings from {} entries)",
                summary.collection_only,
                summary.aggregate_only,
                summary.reduced_keys,
                summary.entries
            );
            log::info!(
                "Decks: {} reconciled, {} skipped (all entries have a set)",
                summary.decks_reconciled,
                summary.decks_skipped
            );
            log::info!("Output written to {}", config.out_dir.display());
        }
        Err(e) => {
            log::error!("Reconciliation failed: {}", e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
