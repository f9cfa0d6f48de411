use std::collections::BTreeMap;

use crate::models::{CardEntry, CardKey, ReducedEntry};

/// Groups entries by composite key, summing quantities.
///
/// `sources` lists the source of every contributing entry in input order.
/// Repeats are kept, since the same printing showing up in several lists is
/// exactly what callers want to see. Output is ordered by key.
pub fn reduce_entries<'a, I>(entries: I) -> Vec<ReducedEntry>
where
    I: IntoIterator<Item = &'a CardEntry>,
{
    let mut groups: BTreeMap<CardKey, ReducedEntry> = BTreeMap::new();

    for entry in entries {
        let group = groups
            .entry(entry.key.clone())
            .or_insert_with(|| ReducedEntry {
                key: entry.key.clone(),
                quantity: 0,
                sources: Vec::new(),
            });
        group.quantity += u64::from(entry.quantity);
        group.sources.push(entry.source.clone());
    }

    groups.into_values().collect()
}
