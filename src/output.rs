//! Report writing.
//!
//! Outputs are written to a temporary location next to their destination and
//! moved into place afterwards, so a failed run never leaves a half-written
//! report where the previous one used to be.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;

use crate::error::{ReconcileError, Result};
use crate::models::DiffRow;
use crate::reconcile::{format_missing, format_owned, DeckReport};

/// File name of the diff report inside the output directory
pub const DIFF_REPORT_FILE: &str = "diffs.csv";
pub const OWNED_FILE: &str = "owned.txt";
pub const MISSING_FILE: &str = "missing.txt";

/// Separator used when flattening source lists into one CSV field
const SOURCES_SEPARATOR: &str = "; ";

/// Diff report header, in [`DiffRecord`] field order
const DIFF_COLUMNS: [&str; 8] = [
    "side",
    "card",
    "variation",
    "set_id",
    "foil",
    "collection_quantity",
    "aggregate_quantity",
    "sources",
];

#[derive(Debug, Serialize)]
struct DiffRecord<'a> {
    side: &'static str,
    card: &'a str,
    variation: Option<&'a str>,
    set_id: Option<&'a str>,
    foil: &'static str,
    collection_quantity: Option<u32>,
    aggregate_quantity: Option<u64>,
    sources: Option<String>,
}

impl<'a> From<&'a DiffRow> for DiffRecord<'a> {
    fn from(row: &'a DiffRow) -> Self {
        Self {
            side: row.side.as_str(),
            card: &row.key.card,
            variation: row.key.variation.as_deref(),
            set_id: row.key.set_id.as_deref(),
            foil: row.key.foil.as_str(),
            collection_quantity: row.collection_quantity,
            aggregate_quantity: row.aggregate_quantity,
            sources: row.sources.as_ref().map(|s| s.join(SOURCES_SEPARATOR)),
        }
    }
}

/// Writes diff rows as CSV to `path`, replacing any previous report.
pub fn write_diff_report(path: &Path, rows: &[DiffRow]) -> Result<()> {
    let parent = parent_dir(path);
    fs::create_dir_all(parent).map_err(|e| ReconcileError::io(parent, e))?;

    let tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| ReconcileError::io(parent, e))?;
    {
        // Header is written by hand so an empty report still has one
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file());
        wtr.write_record(DIFF_COLUMNS)?;
        for row in rows {
            wtr.serialize(DiffRecord::from(row))?;
        }
        wtr.flush().map_err(|e| ReconcileError::io(tmp.path(), e))?;
    }

    tmp.persist(path)
        .map_err(|e| ReconcileError::io(path, e.error))?;
    info!("Wrote {} diff rows to {}", rows.len(), path.display());
    Ok(())
}

/// Writes `owned.txt` and `missing.txt` for one deck under `out_dir/<deck>/`.
///
/// The deck directory is assembled in a temporary directory first and then
/// swapped in, so stale files from an earlier run never survive.
pub fn write_deck_report(out_dir: &Path, report: &DeckReport) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).map_err(|e| ReconcileError::io(out_dir, e))?;

    let staging = tempfile::Builder::new()
        .prefix(".deck-")
        .tempdir_in(out_dir)
        .map_err(|e| ReconcileError::io(out_dir, e))?;

    write_lines(
        &staging.path().join(OWNED_FILE),
        &format_owned(&report.owned, report.source_width),
    )?;
    write_lines(&staging.path().join(MISSING_FILE), &format_missing(&report.missing))?;

    // `staging` stays alive so a failed swap still cleans the staged directory up
    let target = out_dir.join(&report.deck);
    swap_into_place(staging.path(), &target)?;

    info!(
        "Wrote deck '{}': {} owned, {} missing -> {}",
        report.deck,
        report.owned.len(),
        report.missing.len(),
        target.display()
    );
    Ok(target)
}

/// Replaces `target` with `staged`, moving any existing directory aside first.
///
/// If `staged` cannot be moved in, the previous directory is put back.
fn swap_into_place(staged: &Path, target: &Path) -> Result<()> {
    let backup = if target.exists() {
        let backup = target.with_file_name(format!(
            ".{}.old",
            target.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
        ));
        if backup.exists() {
            fs::remove_dir_all(&backup).map_err(|e| ReconcileError::io(&backup, e))?;
        }
        fs::rename(target, &backup).map_err(|e| ReconcileError::io(target, e))?;
        Some(backup)
    } else {
        None
    };

    if let Err(e) = fs::rename(staged, target) {
        if let Some(backup) = &backup {
            if let Err(restore) = fs::rename(backup, target) {
                warn!(
                    "Could not restore {} from {}: {restore}",
                    target.display(),
                    backup.display()
                );
            }
        }
        return Err(ReconcileError::io(staged, e));
    }

    if let Some(backup) = backup {
        fs::remove_dir_all(&backup).map_err(|e| ReconcileError::io(&backup, e))?;
    }
    Ok(())
}

/// Writes one line per entry, each terminated by a newline
fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut file = fs::File::create(path).map_err(|e| ReconcileError::io(path, e))?;
    for line in lines {
        writeln!(file, "{line}").map_err(|e| ReconcileError::io(path, e))?;
    }
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
