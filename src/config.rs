use std::path::PathBuf;

use crate::diff::DiffMode;

pub const DEFAULT_COLLECTION_PATH: &str = "data/my_collection.csv";
pub const DEFAULT_DECK_DIR: &str = "data/decks/";
pub const DEFAULT_AVAILABLE_DIR: &str = "data/available/";
pub const DEFAULT_OUT_DIR: &str = "out/";

/// Inputs and outputs of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Collection CSV export
    pub collection_path: PathBuf,
    /// Root of the deck list files
    pub deck_dir: PathBuf,
    /// Root of the available-card list files
    pub available_dir: PathBuf,
    /// Directory receiving `diffs.csv` and the per-deck folders
    pub out_dir: PathBuf,
    /// Rename list files carrying the legacy "Deck - " prefix on disk
    pub rename_legacy_prefix: bool,
    pub diff_mode: DiffMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection_path: PathBuf::from(DEFAULT_COLLECTION_PATH),
            deck_dir: PathBuf::from(DEFAULT_DECK_DIR),
            available_dir: PathBuf::from(DEFAULT_AVAILABLE_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            rename_legacy_prefix: true,
            diff_mode: DiffMode::Existence,
        }
    }
}

impl Config {
    /// Location of the diff report
    pub fn diff_report_path(&self) -> PathBuf {
        self.out_dir.join(crate::output::DIFF_REPORT_FILE)
    }
}
