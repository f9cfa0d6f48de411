//! End-to-end reconciliation run

use log::info;

use crate::collection::read_collection;
use crate::config::Config;
use crate::diff::diff;
use crate::error::Result;
use crate::lists::{flatten, load_lists, merge_by_name};
use crate::models::DiffSide;
use crate::output::{write_deck_report, write_diff_report};
use crate::reconcile::reconcile_decks;
use crate::reduce::reduce_entries;

/// Counts collected over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub collection_rows: usize,
    pub deck_lists: usize,
    pub available_lists: usize,
    pub entries: usize,
    pub reduced_keys: usize,
    pub collection_only: usize,
    pub aggregate_only: usize,
    pub decks_reconciled: usize,
    pub decks_skipped: usize,
}

/// Runs the whole pipeline: load, reduce, diff, reconcile and write outputs.
///
/// Stops at the first error; outputs already written by then are left in place.
pub fn run(config: &Config) -> Result<RunSummary> {
    let collection = read_collection(&config.collection_path)?;
    let decks = load_lists(&config.deck_dir, config.rename_legacy_prefix)?;
    let available = load_lists(&config.available_dir, config.rename_legacy_prefix)?;

    let deck_entries = flatten(&decks);
    let pool = flatten(&available);

    let reduced = reduce_entries(deck_entries.iter().chain(pool.iter()));
    info!(
        "Reduced {} entries to {} distinct printings",
        deck_entries.len() + pool.len(),
        reduced.len()
    );

    let diffs = diff(&collection, &reduced, config.diff_mode);
    write_diff_report(&config.diff_report_path(), &diffs)?;

    let deck_names = merge_by_name(&decks).len();
    let reports = reconcile_decks(&decks, &pool);
    for report in &reports {
        write_deck_report(&config.out_dir, report)?;
    }

    let summary = RunSummary {
        collection_rows: collection.len(),
        deck_lists: decks.len(),
        available_lists: available.len(),
        entries: deck_entries.len() + pool.len(),
        reduced_keys: reduced.len(),
        collection_only: diffs
            .iter()
            .filter(|d| d.side == DiffSide::CollectionOnly)
            .count(),
        aggregate_only: diffs
            .iter()
            .filter(|d| d.side == DiffSide::AggregateOnly)
            .count(),
        decks_reconciled: reports.len(),
        decks_skipped: deck_names - reports.len(),
    };

    Ok(summary)
}
