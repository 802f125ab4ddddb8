use std::fs;

use tempfile::TempDir;
use watch_engine::{ensure_dir, AtomicFileWriter};

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("state");
    assert!(!new_dir.exists());
    ensure_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested").join("links.json");
    let writer = AtomicFileWriter::new(target.clone());

    writer.write("hello").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "hello");

    writer.write("world").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "world");

    let leftovers = fs::read_dir(target.parent().unwrap()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let writer = AtomicFileWriter::new(blocker.join("links.json"));
    assert!(writer.write("data").is_err());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}
