//! Per-deck owned/missing partitioning.
//!
//! For a deck, every available-pool line whose card name the deck uses is
//! "owned" (shown with the list it can be pulled from), and every deck line
//! whose card name the pool never mentions is "missing". Matching is by card
//! name only; printings do not have to agree.

use std::collections::HashSet;

use log::debug;

use crate::lists::merge_by_name;
use crate::models::{CardEntry, SourceList};
use crate::parser::FOIL_MARKER;

/// Owned and missing partitions for one deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckReport {
    pub deck: String,
    /// Pool lines usable for the deck, quantity set to what the deck needs
    pub owned: Vec<CardEntry>,
    /// Deck lines with no pool line of the same card name
    pub missing: Vec<CardEntry>,
    /// Width of the widest list name in the pool, used to align owned lines
    pub source_width: usize,
}

/// Partitions one deck against the available pool.
///
/// Returns `None` when every entry in the deck already names a set, in which
/// case the deck is left alone.
pub fn reconcile_deck(deck: &SourceList, pool: &[CardEntry]) -> Option<DeckReport> {
    if deck.entries.iter().all(|e| e.key.set_id.is_some()) {
        debug!("Skipping deck '{}': every entry has a set", deck.name);
        return None;
    }

    let deck_cards: HashSet<&str> = deck.entries.iter().map(CardEntry::card).collect();
    let pool_cards: HashSet<&str> = pool.iter().map(CardEntry::card).collect();

    let mut owned: Vec<CardEntry> = pool
        .iter()
        .filter(|e| deck_cards.contains(e.card()))
        .map(|e| CardEntry {
            quantity: required_quantity(deck, e.card()).unwrap_or(e.quantity),
            ..e.clone()
        })
        .collect();

    let mut missing: Vec<CardEntry> = deck
        .entries
        .iter()
        .filter(|e| !pool_cards.contains(e.card()))
        .cloned()
        .collect();

    sort_rows(&mut owned);
    sort_rows(&mut missing);

    Some(DeckReport {
        deck: deck.name.clone(),
        owned,
        missing,
        source_width: pool.iter().map(|e| e.source.chars().count()).max().unwrap_or(0),
    })
}

/// Reconciles every distinct deck name in order, dropping the skipped ones.
///
/// Deck files sharing a logical name are reconciled together as one deck.
pub fn reconcile_decks(decks: &[SourceList], pool: &[CardEntry]) -> Vec<DeckReport> {
    merge_by_name(decks)
        .iter()
        .filter_map(|deck| reconcile_deck(deck, pool))
        .collect()
}

/// Quantity of the first deck line for `card`
fn required_quantity(deck: &SourceList, card: &str) -> Option<u32> {
    deck.entries
        .iter()
        .find(|e| e.card() == card)
        .map(|e| e.quantity)
}

fn sort_rows(rows: &mut [CardEntry]) {
    rows.sort_by(|a, b| {
        a.source
            .cmp(&b.source)
            .then_with(|| a.key.card.cmp(&b.key.card))
            .then_with(|| a.key.set_id.cmp(&b.key.set_id))
    });
}

/// Formats an entry as `quantity card [<variation>] [[set]] [(F)]`, leaving out absent parts
pub fn format_entry(entry: &CardEntry) -> String {
    let mut line = format!("{} {}", entry.quantity, entry.key.card);
    if let Some(variation) = &entry.key.variation {
        line.push_str(&format!(" <{variation}>"));
    }
    if let Some(set_id) = &entry.key.set_id {
        line.push_str(&format!(" [{set_id}]"));
    }
    if entry.key.foil.is_foil() {
        line.push(' ');
        line.push_str(FOIL_MARKER);
    }
    line
}

/// Formats owned rows, prefixed by their source list.
///
/// Sources are padded to `min_width` or to the widest row source, whichever
/// is larger.
pub fn format_owned(rows: &[CardEntry], min_width: usize) -> Vec<String> {
    let width = rows
        .iter()
        .map(|r| r.source.chars().count())
        .max()
        .unwrap_or(0)
        .max(min_width);
    rows.iter()
        .map(|r| format!("{:<width$} | {}", r.source, format_entry(r)))
        .collect()
}

/// Formats missing rows without a source prefix
pub fn format_missing(rows: &[CardEntry]) -> Vec<String> {
    rows.iter().map(format_entry).collect()
}
