//! Card line parsing for deck and available list exports.
//!
//! Each non-empty line of a list file has the shape
//!
//! ```text
//! <quantity> <card name> [<variation>] [[set id]] [(F)]
//! ```
//!
//! where every bracketed group is optional. The card name runs up to the first
//! `<` or `[`. Lines that do not fit are reported as [`LineParse::Unparsed`].

use std::path::Path;

use log::debug;

use crate::error::{ReconcileError, Result};
use crate::models::{CardKey, Foil, ParsedCard};

/// Marker appended to foil printings
pub const FOIL_MARKER: &str = "(F)";

/// Outcome of parsing one list line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParse {
    Parsed(ParsedCard),
    /// The raw line, unchanged
    Unparsed(String),
}

impl LineParse {
    /// Converts a non-match into an [`ReconcileError::UnparsedLine`] for the given location
    pub fn into_result(self, path: &Path, line_number: usize) -> Result<ParsedCard> {
        match self {
            LineParse::Parsed(card) => Ok(card),
            LineParse::Unparsed(line) => Err(ReconcileError::UnparsedLine {
                path: path.to_path_buf(),
                line_number,
                line,
            }),
        }
    }
}

/// Parses a single list line.
///
/// # Arguments
/// * `line` - One line of a deck or available list, without the line terminator
///
/// # Returns
/// [`LineParse::Parsed`] with the quantity and composite key, or
/// [`LineParse::Unparsed`] carrying the raw line.
pub fn parse_line(line: &str) -> LineParse {
    match parse_tokens(line) {
        Some(card) => LineParse::Parsed(card),
        None => {
            debug!("Line does not match card grammar: {line}");
            LineParse::Unparsed(line.to_string())
        }
    }
}

/// Parses a single list line, failing on a non-match.
pub fn parse_card_line(line: &str) -> Result<ParsedCard> {
    parse_line(line).into_result(Path::new("<input>"), 1)
}

fn parse_tokens(line: &str) -> Option<ParsedCard> {
    let line = line.trim();
    let (quantity, rest) = split_quantity(line)?;

    let name_end = rest.find(&['<', '['][..]).unwrap_or(rest.len());
    let (mut name, mut tail) = rest.split_at(name_end);

    let mut foil = Foil::Regular;
    if tail.is_empty() {
        // No groups follow, so a foil marker is glued to the name
        if let Some(stripped) = name.trim_end().strip_suffix(FOIL_MARKER) {
            name = stripped;
            foil = Foil::Foil;
        }
    }
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut variation = None;
    if let Some(after) = tail.strip_prefix('<') {
        let end = after.find('>')?;
        let value = after[..end].trim();
        if value.is_empty() {
            return None;
        }
        variation = Some(value);
        tail = after[end + 1..].trim_start();
    }

    let mut set_id = None;
    if let Some(after) = tail.strip_prefix('[') {
        let end = after.find(']')?;
        let value = &after[..end];
        if value.is_empty() || !value.chars().all(is_word_char) {
            return None;
        }
        set_id = Some(value);
        tail = after[end + 1..].trim_start();
    }

    if let Some(after) = tail.strip_prefix(FOIL_MARKER) {
        foil = Foil::Foil;
        tail = after.trim_start();
    }

    if !tail.is_empty() {
        debug!("Ignoring trailing text '{tail}' in line: {line}");
    }

    Some(ParsedCard {
        quantity,
        key: CardKey::new(name, variation, set_id, foil),
    })
}

/// Splits the leading count from the rest of the line.
///
/// The count must be followed by whitespace and be at least 1.
fn split_quantity(line: &str) -> Option<(u32, &str)> {
    let digits_end = line.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }

    let rest = &line[digits_end..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let quantity: u32 = line[..digits_end].parse().ok()?;
    if quantity == 0 {
        return None;
    }

    Some((quantity, rest.trim_start()))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
