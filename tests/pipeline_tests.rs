use deck_reconcile::output::{DIFF_REPORT_FILE, MISSING_FILE, OWNED_FILE};
use deck_reconcile::{read_collection, run, Config, DiffMode, ReconcileError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

// Test fixtures - sample collection and lists

fn create_sample_collection_content() -> String {
    r#"Card,Variation,Set ID,Foil,Quantity,Condition
Sol Ring,,,regular,1,NM
Lightning Bolt,,LEA,regular,2,EX
Fire // Ice,Showcase,STX,foil,1,NM
Island,,,regular,20,NM"#
        .to_string()
}

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_config(root: &Path) -> Config {
    write_file(&root.join("my_collection.csv"), &create_sample_collection_content());

    // Burn is fully set-specified and is not reconciled
    write_file(
        &root.join("decks/Deck - Burn.txt"),
        "4 Lightning Bolt [LEA]\n1 Fire // Ice <Showcase> [STX] (F)\n",
    );
    write_file(
        &root.join("decks/commander/Atraxa.txt"),
        "3 Sol Ring [C15]\n1 Counterspell\n1 Opt\n",
    );
    write_file(&root.join("available/Bulk.txt"), "5 Sol Ring [C15]\n2 Opt [XLN]\n");

    Config {
        collection_path: root.join("my_collection.csv"),
        deck_dir: root.join("decks"),
        available_dir: root.join("available"),
        out_dir: root.join("out"),
        rename_legacy_prefix: true,
        diff_mode: DiffMode::Existence,
    }
}

#[test]
fn test_read_collection_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", create_sample_collection_content()).unwrap();

    let rows = read_collection(temp_file.path()).unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2].key.card, "Fire/Ice");
    assert_eq!(rows[3].quantity, 20);
}

#[test]
fn test_read_collection_missing_file() {
    let err = read_collection(Path::new("/this/path/does/not/exist.csv")).unwrap_err();

    assert!(matches!(err, ReconcileError::Io { .. }));
}

#[test]
fn test_run_writes_diff_and_deck_files() {
    let dir = TempDir::new().unwrap();
    let config = sample_config(dir.path());

    let summary = run(&config).unwrap();

    assert_eq!(summary.collection_rows, 4);
    assert_eq!(summary.deck_lists, 2);
    assert_eq!(summary.available_lists, 1);
    assert_eq!(summary.decks_reconciled, 1);
    assert_eq!(summary.decks_skipped, 1);
    // Sol Ring (no set) and Island are unused; Sol Ring [C15], Counterspell, Opt, Opt [XLN] are unowned
    assert_eq!(summary.collection_only, 2);
    assert_eq!(summary.aggregate_only, 4);

    let diff = fs::read_to_string(config.out_dir.join(DIFF_REPORT_FILE)).unwrap();
    let lines: Vec<_> = diff.lines().collect();
    assert_eq!(
        lines[0],
        "side,card,variation,set_id,foil,collection_quantity,aggregate_quantity,sources"
    );
    assert!(lines[1].starts_with("collection-only,"));
    assert!(lines[2].starts_with("collection-only,"));
    assert!(diff.contains("aggregate-only,Sol Ring,,C15,regular,,8,Atraxa; Bulk"));
    assert!(!diff.contains("Lightning Bolt"));

    let deck_dir = config.out_dir.join("Atraxa");
    assert_eq!(
        fs::read_to_string(deck_dir.join(OWNED_FILE)).unwrap(),
        "Bulk | 1 Opt [XLN]\nBulk | 3 Sol Ring [C15]\n"
    );
    assert_eq!(
        fs::read_to_string(deck_dir.join(MISSING_FILE)).unwrap(),
        "1 Counterspell\n"
    );
    assert!(!config.out_dir.join("Burn").exists());
    assert!(dir.path().join("decks/Burn.txt").exists());
}

#[test]
fn test_run_twice_gives_same_output() {
    let dir = TempDir::new().unwrap();
    let config = sample_config(dir.path());

    let first = run(&config).unwrap();
    let first_owned = fs::read_to_string(config.out_dir.join("Atraxa").join(OWNED_FILE)).unwrap();
    let second = run(&config).unwrap();
    let second_owned = fs::read_to_string(config.out_dir.join("Atraxa").join(OWNED_FILE)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_owned, second_owned);
}

#[test]
fn test_run_with_empty_list_directories() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("my_collection.csv"), &create_sample_collection_content());
    let config = Config {
        collection_path: dir.path().join("my_collection.csv"),
        deck_dir: dir.path().join("decks"),
        available_dir: dir.path().join("available"),
        out_dir: dir.path().join("out"),
        ..Config::default()
    };

    let summary = run(&config).unwrap();

    assert_eq!(summary.entries, 0);
    assert_eq!(summary.collection_only, 4);
    assert_eq!(summary.aggregate_only, 0);
    assert_eq!(summary.decks_reconciled, 0);
}

#[test]
fn test_run_reconciles_same_name_decks_as_one() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("my_collection.csv"), &create_sample_collection_content());
    write_file(&dir.path().join("decks/a/Atraxa.txt"), "1 Sol Ring\n");
    write_file(&dir.path().join("decks/b/Deck - Atraxa.txt"), "1 Opt\n");
    let config = Config {
        collection_path: dir.path().join("my_collection.csv"),
        deck_dir: dir.path().join("decks"),
        available_dir: dir.path().join("available"),
        out_dir: dir.path().join("out"),
        ..Config::default()
    };

    let summary = run(&config).unwrap();

    assert_eq!(summary.deck_lists, 2);
    assert_eq!(summary.decks_reconciled, 1);
    assert_eq!(summary.decks_skipped, 0);
    assert_eq!(
        fs::read_to_string(config.out_dir.join("Atraxa").join(MISSING_FILE)).unwrap(),
        "1 Opt\n1 Sol Ring\n"
    );
}

#[test]
fn test_run_exact_mode_flags_quantity_mismatch() {
    let dir = TempDir::new().unwrap();
    let mut config = sample_config(dir.path());
    config.diff_mode = DiffMode::Exact;

    let summary = run(&config).unwrap();

    // Lightning Bolt: 2 owned vs 4 needed now shows on both sides
    assert_eq!(summary.collection_only, 3);
    assert_eq!(summary.aggregate_only, 5);
}

#[test]
fn test_run_aborts_on_unparsed_line() {
    let dir = TempDir::new().unwrap();
    let config = sample_config(dir.path());
    write_file(&config.deck_dir.join("Broken.txt"), "1 Sol Ring\nDeck\n");

    let err = run(&config).unwrap_err();

    assert!(matches!(err, ReconcileError::UnparsedLine { line_number: 2, .. }));
    assert!(!config.out_dir.join(DIFF_REPORT_FILE).exists());
}
