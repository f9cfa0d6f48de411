use deck_reconcile::lists::{discover_list_files, load_lists, normalize_list_files};
use deck_reconcile::ReconcileError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Test fixtures - sample deck lists

fn write_list(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_list(dir.path(), "Deck - Atraxa.txt", "1 Sol Ring\n3 Opt [XLN]\n");
    write_list(dir.path(), "commander/Zur.txt", "1 Necropotence [ICE] (F)\n\n1 Sol Ring\n");
    write_list(dir.path(), "Burn.txt", "4 Lightning Bolt [LEA]\n");
    write_list(dir.path(), "notes.md", "not a list");
    dir
}

#[test]
fn test_discover_finds_nested_txt_files_sorted() {
    let dir = sample_tree();

    let files = discover_list_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["Burn.txt", "Deck - Atraxa.txt", "commander/Zur.txt"]);
}

#[test]
fn test_discover_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();

    let files = discover_list_files(&dir.path().join("nope")).unwrap();

    assert!(files.is_empty());
}

#[test]
fn test_load_lists_renames_legacy_prefix() {
    let dir = sample_tree();

    let lists = load_lists(dir.path(), true).unwrap();
    let names: Vec<_> = lists.iter().map(|l| l.name.as_str()).collect();

    assert_eq!(names, vec!["Burn", "Atraxa", "Zur"]);
    assert!(dir.path().join("Atraxa.txt").exists());
    assert!(!dir.path().join("Deck - Atraxa.txt").exists());

    let zur = &lists[2];
    assert_eq!(zur.entries.len(), 2);
    assert!(zur.entries.iter().all(|e| e.source == "Zur"));
}

#[test]
fn test_load_lists_rename_is_idempotent() {
    let dir = sample_tree();

    let first = load_lists(dir.path(), true).unwrap();
    let second = load_lists(dir.path(), true).unwrap();

    let first_names: Vec<_> = first.iter().map(|l| l.name.clone()).collect();
    let second_names: Vec<_> = second.iter().map(|l| l.name.clone()).collect();
    assert_eq!(first_names.len(), second_names.len());
    for name in &first_names {
        assert!(second_names.contains(name));
    }
}

#[test]
fn test_load_lists_without_rename_leaves_files() {
    let dir = sample_tree();

    let lists = load_lists(dir.path(), false).unwrap();

    assert!(lists.iter().any(|l| l.name == "Atraxa"));
    assert!(dir.path().join("Deck - Atraxa.txt").exists());
    assert!(!dir.path().join("Atraxa.txt").exists());
}

#[test]
fn test_rename_collision_keeps_both_files() {
    let dir = TempDir::new().unwrap();
    write_list(dir.path(), "Atraxa.txt", "1 Sol Ring\n");
    write_list(dir.path(), "Deck - Atraxa.txt", "1 Opt\n");

    let files = discover_list_files(dir.path()).unwrap();
    let err = normalize_list_files(&files, true).unwrap_err();

    assert!(matches!(err, ReconcileError::NameCollision { .. }));
    assert_eq!(
        fs::read_to_string(dir.path().join("Atraxa.txt")).unwrap(),
        "1 Sol Ring\n"
    );
    assert!(dir.path().join("Deck - Atraxa.txt").exists());
}

#[test]
fn test_rename_collision_moves_no_file() {
    let dir = TempDir::new().unwrap();
    write_list(dir.path(), "B.txt", "1 Sol Ring\n");
    write_list(dir.path(), "Deck - A.txt", "1 Opt\n");
    write_list(dir.path(), "Deck - B.txt", "1 Ponder\n");

    let files = discover_list_files(dir.path()).unwrap();
    let err = normalize_list_files(&files, true).unwrap_err();

    assert!(matches!(err, ReconcileError::NameCollision { .. }));
    // "Deck - A.txt" sorts before the colliding file and must still be untouched
    assert!(dir.path().join("Deck - A.txt").exists());
    assert!(!dir.path().join("A.txt").exists());
    assert!(dir.path().join("Deck - B.txt").exists());
}

#[test]
fn test_unparseable_line_aborts_load() {
    let dir = TempDir::new().unwrap();
    write_list(dir.path(), "Atraxa.txt", "1 Sol Ring\nSideboard\n1 Opt\n");

    let err = load_lists(dir.path(), false).unwrap_err();

    match err {
        ReconcileError::UnparsedLine { path, line_number, line } => {
            assert_eq!(path, dir.path().join("Atraxa.txt"));
            assert_eq!(line_number, 2);
            assert_eq!(line, "Sideboard");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_directory_loads_nothing() {
    let dir = TempDir::new().unwrap();

    assert!(load_lists(dir.path(), true).unwrap().is_empty());
}
