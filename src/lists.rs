//! Deck and available list loading.
//!
//! List files are plain `*.txt` exports, one card per line, possibly nested in
//! sub-directories. The file stem is the list's logical name, minus the legacy
//! `"Deck - "` prefix some exporters add.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use crate::error::{ReconcileError, Result};
use crate::models::{CardEntry, SourceList};
use crate::parser::parse_line;

/// Prefix older deck exports put in front of the deck name
pub const LEGACY_PREFIX: &str = "Deck - ";

/// File extension of list exports
const LIST_EXTENSION: &str = "txt";

/// A list file after its name has been normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedList {
    /// Path the file was found at
    pub original: PathBuf,
    /// Path the file lives at now (differs from `original` only after a rename)
    pub path: PathBuf,
    /// Logical list name
    pub name: String,
}

/// Finds all list files below `root`, sorted by path.
///
/// A missing root is treated as an empty directory.
pub fn discover_list_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        warn!("List directory {} does not exist, treating as empty", root.display());
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory loop detected"));
            ReconcileError::io(path, source)
        })?;

        let is_list = entry.file_type().is_file()
            && entry.path().extension().and_then(|ext| ext.to_str()) == Some(LIST_EXTENSION);
        if is_list {
            paths.push(entry.into_path());
        }
    }

    paths.sort();
    Ok(paths)
}

/// Returns the logical list name for a file: its stem without the legacy prefix
pub fn logical_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match stem.strip_prefix(LEGACY_PREFIX) {
        Some(stripped) => stripped.to_string(),
        None => stem,
    }
}

/// Resolves logical names for `paths`, optionally renaming prefixed files on disk.
///
/// Renaming is idempotent: files without the prefix are left alone. Every
/// planned rename is checked first; if any would overwrite an existing file the
/// call fails with [`ReconcileError::NameCollision`] and no file is moved.
pub fn normalize_list_files(paths: &[PathBuf], rename: bool) -> Result<Vec<NormalizedList>> {
    let mut normalized: Vec<NormalizedList> = paths
        .iter()
        .map(|original| NormalizedList {
            original: original.clone(),
            path: original.clone(),
            name: logical_name(original),
        })
        .collect();

    if rename {
        let mut planned = Vec::new();
        for (idx, list) in normalized.iter().enumerate() {
            if !has_legacy_prefix(&list.original) {
                continue;
            }
            let target = list
                .original
                .with_file_name(format!("{}.{LIST_EXTENSION}", list.name));
            if target.exists() {
                return Err(ReconcileError::NameCollision {
                    from: list.original.clone(),
                    to: target,
                });
            }
            planned.push((idx, target));
        }

        for (idx, target) in planned {
            let list = &mut normalized[idx];
            fs::rename(&list.original, &target)
                .map_err(|e| ReconcileError::io(&list.original, e))?;
            info!("Renamed {} -> {}", list.original.display(), target.display());
            list.path = target;
        }
    }

    warn_duplicate_names(&normalized);
    Ok(normalized)
}

fn has_legacy_prefix(path: &Path) -> bool {
    path.file_stem()
        .map(|s| s.to_string_lossy().starts_with(LEGACY_PREFIX))
        .unwrap_or(false)
}

fn warn_duplicate_names(lists: &[NormalizedList]) {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for list in lists {
        if let Some(first) = seen.insert(&list.name, &list.path) {
            warn!(
                "List name '{}' is used by both {} and {}; their entries share one source",
                list.name,
                first.display(),
                list.path.display()
            );
        }
    }
}

/// Parses the text of one list file.
///
/// Blank lines are skipped; any other line that does not parse aborts with
/// [`ReconcileError::UnparsedLine`] carrying its 1-based line number.
pub fn parse_list(name: &str, path: &Path, text: &str) -> Result<SourceList> {
    let mut entries = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let card = parse_line(line).into_result(path, idx + 1)?;
        entries.push(card.with_source(name));
    }

    Ok(SourceList {
        name: name.to_string(),
        path: path.to_path_buf(),
        entries,
    })
}

/// Reads and parses every list file below `root`.
pub fn load_lists(root: &Path, rename: bool) -> Result<Vec<SourceList>> {
    let paths = discover_list_files(root)?;
    let normalized = normalize_list_files(&paths, rename)?;

    let mut lists = Vec::with_capacity(normalized.len());
    for list in normalized {
        info!("Reading {}", list.path.display());
        let text =
            fs::read_to_string(&list.path).map_err(|e| ReconcileError::io(&list.path, e))?;
        lists.push(parse_list(&list.name, &list.path, &text)?);
    }

    info!(
        "Loaded {} list(s) with {} entries from {}",
        lists.len(),
        lists.iter().map(|l| l.entries.len()).sum::<usize>(),
        root.display()
    );
    Ok(lists)
}

/// Merges lists sharing a logical name into one list per name.
///
/// Lists keep the position of their first file, and entries stay in file
/// order, so a merged list reads as the concatenation of its files.
pub fn merge_by_name(lists: &[SourceList]) -> Vec<SourceList> {
    let mut merged: Vec<SourceList> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for list in lists {
        match index.get(list.name.as_str()) {
            Some(&i) => merged[i].entries.extend(list.entries.iter().cloned()),
            None => {
                index.insert(&list.name, merged.len());
                merged.push(list.clone());
            }
        }
    }

    merged
}

/// Concatenates the entries of all lists in file order
pub fn flatten(lists: &[SourceList]) -> Vec<CardEntry> {
    lists.iter().flat_map(|l| l.entries.iter().cloned()).collect()
}
