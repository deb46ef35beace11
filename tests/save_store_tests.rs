// Save listing and download-name resolution

use std::fs::File;
use std::time::{Duration, SystemTime};

use ficsit_control::save_store::{SaveLookupError, list_saves, resolve_save_path};
use tempfile::TempDir;

fn set_mtime(path: &std::path::Path, when: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(when)
        .unwrap();
}

#[test]
fn test_list_saves_filters_flags_and_sorts() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join("file1.sav");
    let ignored = dir.path().join("file2.txt");
    let settings = dir.path().join("ServerSettings.7777.sav");
    std::fs::write(&old, b"0123456789").unwrap();
    std::fs::write(&ignored, b"nope").unwrap();
    std::fs::write(&settings, b"cfg").unwrap();
    set_mtime(&old, SystemTime::now() - Duration::from_secs(3600));

    let saves = list_saves(dir.path());
    assert_eq!(saves.len(), 2);
    // Newest-modified first.
    assert_eq!(saves[0].name, "ServerSettings.7777.sav");
    assert!(saves[0].is_active);
    assert_eq!(saves[1].name, "file1.sav");
    assert!(!saves[1].is_active);
    assert_eq!(saves[1].size, 10);
}

#[test]
fn test_list_saves_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("not-mounted");
    assert!(list_saves(&missing).is_empty());
}

#[test]
fn test_list_saves_skips_directories_with_save_extension() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("fake.sav")).unwrap();
    std::fs::write(dir.path().join("real.sav"), b"x").unwrap();

    let saves = list_saves(dir.path());
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].name, "real.sav");
}

#[test]
fn test_resolve_rejects_traversal_before_io() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        resolve_save_path(dir.path(), "../../etc/passwd"),
        Err(SaveLookupError::InvalidName)
    );
    assert_eq!(
        resolve_save_path(dir.path(), "..\\evil.sav"),
        Err(SaveLookupError::InvalidName)
    );
    assert_eq!(
        resolve_save_path(dir.path(), "nested/inner.sav"),
        Err(SaveLookupError::InvalidName)
    );
    assert_eq!(
        resolve_save_path(dir.path(), ""),
        Err(SaveLookupError::InvalidName)
    );
}

#[test]
fn test_resolve_rejects_wrong_extension() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"hi").unwrap();
    assert_eq!(
        resolve_save_path(dir.path(), "notes.txt"),
        Err(SaveLookupError::WrongExtension)
    );
}

#[test]
fn test_resolve_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        resolve_save_path(dir.path(), "ghost.sav"),
        Err(SaveLookupError::NotFound)
    );
}

#[test]
fn test_resolve_returns_contained_path() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("world.sav"), b"data").unwrap();
    let path = resolve_save_path(dir.path(), "world.sav").unwrap();
    assert!(path.starts_with(dir.path()));
    assert_eq!(path.file_name().unwrap(), "world.sav");
}
