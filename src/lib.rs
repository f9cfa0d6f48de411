//! Deck Reconcile - MTG collection vs. deck list reconciliation
//!
//! Parses plain-text deck and available-card lists, sums them per printing,
//! diffs the result against a collection CSV export and writes per-deck
//! owned/missing lists.

pub mod collection;
pub mod config;
pub mod diff;
pub mod error;
pub mod lists;
pub mod models;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod reconcile;
pub mod reduce;

pub use collection::read_collection;
pub use config::Config;
pub use diff::{diff, DiffMode};
pub use error::{ReconcileError, Result};
pub use lists::{load_lists, normalize_list_files};
pub use models::{CardEntry, CardKey, CollectionRow, DiffRow, DiffSide, Foil, ReducedEntry, SourceList};
pub use parser::{parse_line, LineParse};
pub use pipeline::{run, RunSummary};
pub use reconcile::{reconcile_deck, DeckReport};
pub use reduce::reduce_entries;
