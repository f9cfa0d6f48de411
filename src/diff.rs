//! Collection vs. aggregate comparison.
//!
//! The diff is existence-based by default: a composite key present on both
//! sides is considered matched regardless of quantities. Partial fulfilment is
//! the per-deck reconciler's business.

use std::collections::HashSet;

use crate::models::{CardKey, CollectionRow, DiffRow, DiffSide, ReducedEntry};

/// How collection rows are matched against reduced entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffMode {
    /// Match on composite key only
    #[default]
    Existence,
    /// Match on composite key and quantity; a quantity mismatch lists the key on both sides
    Exact,
}

/// Computes the rows present on exactly one side.
///
/// Collection-only rows carry the collection quantity; aggregate-only rows carry
/// the summed quantity and contributing sources. Rows are stably sorted by
/// sources, so collection-only rows (no sources) come first.
pub fn diff(collection: &[CollectionRow], reduced: &[ReducedEntry], mode: DiffMode) -> Vec<DiffRow> {
    let mut rows = Vec::new();

    match mode {
        DiffMode::Existence => {
            let aggregate_keys: HashSet<&CardKey> = reduced.iter().map(|r| &r.key).collect();
            let collection_keys: HashSet<&CardKey> = collection.iter().map(|c| &c.key).collect();

            rows.extend(
                collection
                    .iter()
                    .filter(|c| !aggregate_keys.contains(&c.key))
                    .map(collection_only),
            );
            rows.extend(
                reduced
                    .iter()
                    .filter(|r| !collection_keys.contains(&r.key))
                    .map(aggregate_only),
            );
        }
        DiffMode::Exact => {
            let aggregate_keys: HashSet<(&CardKey, u64)> =
                reduced.iter().map(|r| (&r.key, r.quantity)).collect();
            let collection_keys: HashSet<(&CardKey, u64)> = collection
                .iter()
                .map(|c| (&c.key, u64::from(c.quantity)))
                .collect();

            rows.extend(
                collection
                    .iter()
                    .filter(|c| !aggregate_keys.contains(&(&c.key, u64::from(c.quantity))))
                    .map(collection_only),
            );
            rows.extend(
                reduced
                    .iter()
                    .filter(|r| !collection_keys.contains(&(&r.key, r.quantity)))
                    .map(aggregate_only),
            );
        }
    }

    rows.sort_by(|a, b| a.sources.cmp(&b.sources));
    rows
}

fn collection_only(row: &CollectionRow) -> DiffRow {
    DiffRow {
        side: DiffSide::CollectionOnly,
        key: row.key.clone(),
        collection_quantity: Some(row.quantity),
        aggregate_quantity: None,
        sources: None,
    }
}

fn aggregate_only(entry: &ReducedEntry) -> DiffRow {
    DiffRow {
        side: DiffSide::AggregateOnly,
        key: entry.key.clone(),
        collection_quantity: None,
        aggregate_quantity: Some(entry.quantity),
        sources: Some(entry.sources.clone()),
    }
}
