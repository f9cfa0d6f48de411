use std::fmt;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches the split-card separator in any spacing, e.g. "Fire // Ice" or "Fire//Ice"
    static ref SPLIT_SEPARATOR: Regex = Regex::new(r"\s*//\s*").unwrap();
}

/// Canonicalizes a card name so split cards compare equally across exports
pub fn normalize_card_name(name: &str) -> String {
    SPLIT_SEPARATOR.replace_all(name.trim(), "/").into_owned()
}

/// Print finish of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Foil {
    Regular,
    Foil,
}

impl Foil {
    /// Returns the column value used in reports ("regular" or "foil")
    pub fn as_str(&self) -> &'static str {
        match self {
            Foil::Regular => "regular",
            Foil::Foil => "foil",
        }
    }

    /// Parse a collection export value, accepting the common boolean spellings
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "foil" | "true" | "1" | "yes" => Some(Foil::Foil),
            "regular" | "" | "false" | "0" | "no" | "normal" | "nonfoil" => Some(Foil::Regular),
            _ => None,
        }
    }

    pub fn is_foil(&self) -> bool {
        matches!(self, Foil::Foil)
    }
}

impl fmt::Display for Foil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite identity of a card printing.
///
/// Two keys are equal when name, variation, set and finish all match; a missing
/// variation or set only equals another missing one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardKey {
    pub card: String,
    pub variation: Option<String>,
    pub set_id: Option<String>,
    pub foil: Foil,
}

impl CardKey {
    pub fn new(card: &str, variation: Option<&str>, set_id: Option<&str>, foil: Foil) -> Self {
        Self {
            card: normalize_card_name(card),
            variation: variation.map(str::to_string),
            set_id: set_id.map(str::to_string),
            foil,
        }
    }
}

/// A successfully parsed list line, before it is tagged with its list name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCard {
    pub quantity: u32,
    pub key: CardKey,
}

impl ParsedCard {
    pub fn with_source(self, source: &str) -> CardEntry {
        CardEntry {
            quantity: self.quantity,
            key: self.key,
            source: source.to_string(),
        }
    }
}

/// One card line from a deck or available list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEntry {
    pub quantity: u32,
    pub key: CardKey,
    /// Logical name of the list the line came from
    pub source: String,
}

impl CardEntry {
    pub fn card(&self) -> &str {
        &self.key.card
    }
}

/// Quantity-summed entry for one composite key across every list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedEntry {
    pub key: CardKey,
    /// Sum of the contributing line quantities
    pub quantity: u64,
    /// Contributing list names in read order, one per contributing line
    pub sources: Vec<String>,
}

/// One row of the collection export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRow {
    pub key: CardKey,
    pub quantity: u32,
}

/// Which side of the comparison a diff row was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSide {
    /// Owned but not referenced by any list
    CollectionOnly,
    /// Referenced by a list but not owned
    AggregateOnly,
}

impl DiffSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffSide::CollectionOnly => "collection-only",
            DiffSide::AggregateOnly => "aggregate-only",
        }
    }
}

/// A composite key present on exactly one side of the comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    pub side: DiffSide,
    pub key: CardKey,
    pub collection_quantity: Option<u32>,
    pub aggregate_quantity: Option<u64>,
    pub sources: Option<Vec<String>>,
}

/// The parsed contents of a single list file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceList {
    pub name: String,
    pub path: PathBuf,
    pub entries: Vec<CardEntry>,
}

impl SourceList {
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|e| e.quantity as u64).sum()
    }
}
