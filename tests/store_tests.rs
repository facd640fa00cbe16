//! Tests for RecordStore
//!
//! These tests verify:
//! - Id allocation starting at 1 and incrementing per save
//! - Counter durability across a simulated restart
//! - Gap-tolerant listing after deletions
//! - Idempotent delete
//! - Lazy counter-file creation
//! - Stable on-disk JSON field names

use corkboard::model::{Article, Board};
use corkboard::store::RecordStore;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_store() -> (TempDir, RecordStore<Board>) {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::open(temp_dir.path(), "board").unwrap();
    (temp_dir, store)
}

fn save_board(store: &RecordStore<Board>, name: &str, code: &str) -> u64 {
    let mut board = Board::new(name, code);
    store.save(&mut board).unwrap()
}

// =============================================================================
// Id Allocation Tests
// =============================================================================

#[test]
fn test_first_save_returns_id_one() {
    let (_temp, store) = setup_store();

    let id = save_board(&store, "Notice", "notice");

    assert_eq!(id, 1);
}

#[test]
fn test_nth_save_returns_n() {
    let (_temp, store) = setup_store();

    for n in 1..=5u64 {
        let id = save_board(&store, "Board", &format!("code{}", n));
        assert_eq!(id, n);
    }
}

#[test]
fn test_counter_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store: RecordStore<Board> = RecordStore::open(temp_dir.path(), "board").unwrap();
        save_board(&store, "One", "one");
        save_board(&store, "Two", "two");
    }

    // A fresh store over the same directory picks up the persisted counter
    let store: RecordStore<Board> = RecordStore::open(temp_dir.path(), "board").unwrap();
    let id = save_board(&store, "Three", "three");

    assert_eq!(id, 3);
}

#[test]
fn test_ids_never_reused_after_delete() {
    let (_temp, store) = setup_store();

    save_board(&store, "One", "one");
    let id2 = save_board(&store, "Two", "two");

    store.delete(id2).unwrap();
    let id3 = save_board(&store, "Three", "three");

    assert_eq!(id3, 3);
    assert_eq!(store.last_id().unwrap(), 3);
}

#[test]
fn test_counter_file_created_lazily() {
    let (temp_dir, store) = setup_store();
    let counter_path = temp_dir.path().join("board").join("lastId.txt");

    // Opening alone does not touch the counter
    assert!(!counter_path.exists());

    // First access creates it holding 0
    assert_eq!(store.last_id().unwrap(), 0);
    assert_eq!(std::fs::read_to_string(&counter_path).unwrap(), "0");
}

// =============================================================================
// Get Tests
// =============================================================================

#[test]
fn test_get_returns_saved_record() {
    let (_temp, store) = setup_store();

    let id = save_board(&store, "Notice", "notice");
    let board = store.get(id).unwrap().unwrap();

    assert_eq!(board.id, id);
    assert_eq!(board.name, "Notice");
    assert_eq!(board.code, "notice");
    assert!(!board.reg_date.is_empty());
}

#[test]
fn test_save_stamps_reg_date_once() {
    let (_temp, store) = setup_store();

    let id = save_board(&store, "Notice", "notice");
    let board = store.get(id).unwrap().unwrap();

    // yyyy-MM-dd HH:mm:ss
    assert_eq!(board.reg_date.len(), 19);
    assert_eq!(&board.reg_date[4..5], "-");
    assert_eq!(&board.reg_date[10..11], " ");
}

#[test]
fn test_get_never_existing_returns_none() {
    let (_temp, store) = setup_store();

    assert!(store.get(42).unwrap().is_none());
}

#[test]
fn test_get_after_delete_returns_none() {
    let (_temp, store) = setup_store();

    let id = save_board(&store, "Notice", "notice");
    store.delete(id).unwrap();

    assert!(store.get(id).unwrap().is_none());
}

// =============================================================================
// List Tests
// =============================================================================

#[test]
fn test_list_ascending_by_id() {
    let (_temp, store) = setup_store();

    save_board(&store, "One", "one");
    save_board(&store, "Two", "two");
    save_board(&store, "Three", "three");

    let ids: Vec<u64> = store.list().unwrap().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_list_tolerates_gap_after_middle_delete() {
    let (_temp, store) = setup_store();

    save_board(&store, "One", "one");
    save_board(&store, "Two", "two");
    save_board(&store, "Three", "three");

    store.delete(2).unwrap();

    let boards = store.list().unwrap();
    let ids: Vec<u64> = boards.iter().map(|b| b.id).collect();

    assert_eq!(ids, vec![1, 3]);
    assert_eq!(boards.len(), 2);
}

#[test]
fn test_list_empty_store() {
    let (_temp, store) = setup_store();

    assert!(store.list().unwrap().is_empty());
}

// =============================================================================
// Delete / Modify Tests
// =============================================================================

#[test]
fn test_delete_missing_is_noop() {
    let (_temp, store) = setup_store();

    // No record, no error
    store.delete(42).unwrap();
}

#[test]
fn test_modify_overwrites_under_same_id() {
    let (_temp, store) = setup_store();

    let id = save_board(&store, "Before", "code");

    let mut changed = store.get(id).unwrap().unwrap();
    changed.name = "After".to_string();
    let returned = store.modify(&mut changed, id).unwrap();

    assert_eq!(returned, id);
    assert_eq!(store.get(id).unwrap().unwrap().name, "After");

    // Overwrites never consume ids
    assert_eq!(store.last_id().unwrap(), 1);
}

// =============================================================================
// On-Disk Format Tests
// =============================================================================

#[test]
fn test_record_files_use_stable_field_names() {
    let temp_dir = TempDir::new().unwrap();
    let store: RecordStore<Article> = RecordStore::open(temp_dir.path(), "article").unwrap();

    let mut article = Article::new(2, 1, "hi", "x");
    let id = store.save(&mut article).unwrap();

    let raw = std::fs::read_to_string(temp_dir.path().join("article").join(format!("{}.json", id)))
        .unwrap();

    assert!(raw.contains("\"id\""));
    assert!(raw.contains("\"regDate\""));
    assert!(raw.contains("\"boardId\""));
    assert!(raw.contains("\"memberId\""));
    assert!(raw.contains("\"title\""));
    assert!(raw.contains("\"body\""));
}
