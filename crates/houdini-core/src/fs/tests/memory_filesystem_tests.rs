use crate::fs::Filesystem;
use crate::fs::MemoryFilesystem;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

#[test]
fn mkdir_all_records_every_ancestor() {
    let fs = MemoryFilesystem::new();
    fs.mkdir_all(Path::new("/project/$houdini/artifacts")).unwrap();
    assert!(fs.is_dir("/project"));
    assert!(fs.is_dir("/project/$houdini"));
    assert!(fs.is_dir("/project/$houdini/artifacts"));
    fs.mkdir_all(Path::new("/project/$houdini")).unwrap();
}

#[test]
fn create_needs_an_existing_parent() {
    let fs = MemoryFilesystem::new();
    let err = fs.create(Path::new("/missing/file.js")).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn mkdir_over_a_file_fails() {
    let fs = MemoryFilesystem::new();
    fs.mkdir_all(Path::new("/out")).unwrap();
    fs.write_atomic(Path::new("/out/a.js"), b"a").unwrap();
    let err = fs.mkdir_all(Path::new("/out/a.js")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[test]
fn write_atomic_replaces_the_file_and_leaves_no_temp() {
    let fs = MemoryFilesystem::new();
    let path = Path::new("/out/Query.js");
    fs.mkdir_all(Path::new("/out")).unwrap();
    fs.write_atomic(path, b"first").unwrap();
    fs.write_atomic(path, b"second").unwrap();

    assert_eq!(fs.read_to_string(path).unwrap(), "second");
    assert_eq!(fs.files(), vec![PathBuf::from("/out/Query.js")]);
}

#[test]
fn failed_rename_keeps_the_previous_contents() {
    let fs = MemoryFilesystem::new();
    let path = Path::new("/out/Query.js");
    fs.mkdir_all(Path::new("/out")).unwrap();
    fs.write_atomic(path, b"old").unwrap();

    fs.set_fail_renames(true);
    assert!(fs.write_atomic(path, b"new").is_err());
    assert_eq!(fs.contents_string(path).as_deref(), Some("old"));
    assert_eq!(fs.contents_string("/out/.Query.js.tmp").as_deref(), Some("new"));
}

#[test]
fn clones_share_state() {
    let fs = MemoryFilesystem::new();
    let clone = fs.clone();
    clone.mkdir_all(Path::new("/shared")).unwrap();
    clone.write_atomic(Path::new("/shared/x.js"), b"x").unwrap();
    assert_eq!(fs.contents("/shared/x.js"), Some(b"x".to_vec()));
}

#[test]
fn open_missing_file_is_not_found() {
    let fs = MemoryFilesystem::new();
    let err = fs.read_to_string(Path::new("/nope.js")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
