//! Collection CSV loading.
//!
//! The collection export carries (at least) the columns
//! `Card, Variation, Set ID, Foil, Quantity`. Header names are lowercased with
//! spaces turned into underscores before lookup, so `Set ID` becomes `set_id`.

use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::error::{ReconcileError, Result};
use crate::models::{CardKey, CollectionRow, Foil};

/// Normalized names of the columns the loader needs
pub const REQUIRED_COLUMNS: [&str; 5] = ["card", "variation", "set_id", "foil", "quantity"];

#[derive(Debug, Deserialize)]
struct CollectionRecord {
    card: String,
    variation: Option<String>,
    set_id: Option<String>,
    foil: Option<String>,
    quantity: String,
}

/// Normalizes a header name: trimmed, lowercased, spaces replaced by underscores
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Loads the collection export at `path`.
pub fn read_collection(path: &Path) -> Result<Vec<CollectionRow>> {
    let file = std::fs::File::open(path).map_err(|e| ReconcileError::io(path, e))?;
    let rows = read_collection_from(file)?;
    info!("Loaded {} collection rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Loads collection rows from any CSV reader.
///
/// # Errors
/// [`ReconcileError::MissingColumn`] when a required column is absent, and
/// [`ReconcileError::InvalidField`] for unreadable foil or quantity values.
pub fn read_collection_from<R: Read>(reader: R) -> Result<Vec<CollectionRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: csv::StringRecord = rdr.headers()?.iter().map(normalize_header).collect();
    debug!("Collection headers: {:?}", headers);

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ReconcileError::MissingColumn(column.to_string()));
        }
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw: CollectionRecord = record.deserialize(Some(&headers))?;
        rows.push(to_row(raw, line)?);
    }

    Ok(rows)
}

fn to_row(raw: CollectionRecord, line: u64) -> Result<CollectionRow> {
    let foil_value = raw.foil.unwrap_or_default();
    let foil = Foil::parse(&foil_value).ok_or_else(|| ReconcileError::InvalidField {
        line,
        column: "foil",
        value: foil_value.clone(),
    })?;

    let quantity = raw
        .quantity
        .parse::<u32>()
        .map_err(|_| ReconcileError::InvalidField {
            line,
            column: "quantity",
            value: raw.quantity.clone(),
        })?;

    Ok(CollectionRow {
        key: CardKey::new(
            &raw.card,
            non_empty(raw.variation.as_deref()),
            non_empty(raw.set_id.as_deref()),
            foil,
        ),
        quantity,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
