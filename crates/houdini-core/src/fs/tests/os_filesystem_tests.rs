use crate::fs::Filesystem;
use crate::fs::OsFilesystem;
use std::fs;

#[test]
fn write_atomic_creates_and_replaces() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = dir.path().join("$houdini").join("artifacts");
    OsFilesystem.mkdir_all(&artifacts).unwrap();

    let path = artifacts.join("Query.js");
    OsFilesystem.write_atomic(&path, b"first").unwrap();
    OsFilesystem.write_atomic(&path, b"second").unwrap();
    assert_eq!(OsFilesystem.read_to_string(&path).unwrap(), "second");

    let names: Vec<String> = fs::read_dir(&artifacts)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Query.js"]);
}

#[test]
fn write_atomic_into_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("Query.js");
    assert!(OsFilesystem.write_atomic(&path, b"data").is_err());
    assert!(!path.exists());
}

#[test]
fn mkdir_all_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    OsFilesystem.mkdir_all(&nested).unwrap();
    OsFilesystem.mkdir_all(&nested).unwrap();
    assert!(nested.is_dir());
}
