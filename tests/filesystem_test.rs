//! Tests for RealFileSystem

use std::fs;
use std::io;

use tempfile::TempDir;

use zettl::infrastructure::traits::{FileSystem, RealFileSystem};

// ============================================================
// write_new tests
// ============================================================

#[test]
fn given_missing_file_when_write_new_then_creates_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a.md");
    let fs = RealFileSystem;

    // Act
    fs.write_new(&path, "first line\n").unwrap();

    // Assert
    assert_eq!(fs::read_to_string(&path).unwrap(), "first line\n");
}

#[test]
fn given_existing_file_when_write_new_then_already_exists_and_untouched() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a.md");
    fs::write(&path, "original").unwrap();
    let fs = RealFileSystem;

    // Act
    let err = fs.write_new(&path, "clobber").unwrap_err();

    // Assert
    assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
}

// ============================================================
// list_files tests
// ============================================================

#[test]
fn given_nested_directories_when_list_files_then_returns_only_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("archive/old")).unwrap();
    fs::write(temp.path().join("a.md"), "").unwrap();
    fs::write(temp.path().join("archive/old/b.md"), "").unwrap();
    let fs = RealFileSystem;

    // Act
    let mut files = fs.list_files(temp.path()).unwrap();
    files.sort();

    // Assert
    assert_eq!(files.len(), 2);
    assert!(files.iter().any(|p| p.ends_with("a.md")));
    assert!(files.iter().any(|p| p.ends_with("archive/old/b.md")));
}

#[test]
fn given_hidden_directory_when_list_files_then_skipped() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let root = temp.path().join(".notes");
    fs::create_dir_all(root.join(".git/objects")).unwrap();
    fs::write(root.join(".git/objects/x.md"), "").unwrap();
    fs::write(root.join(".draft.md"), "").unwrap();
    fs::write(root.join("a.md"), "").unwrap();
    let fs = RealFileSystem;

    // Act
    let files = fs.list_files(&root).unwrap();

    // Assert
    assert_eq!(files, vec![root.join("a.md")]);
}

#[test]
fn given_existing_file_when_remove_file_then_gone() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a.md");
    fs::write(&path, "").unwrap();
    let fs = RealFileSystem;

    fs.remove_file(&path).unwrap();

    assert!(!fs.exists(&path));
}

#[test]
fn given_missing_directory_when_list_files_then_error() {
    let temp = TempDir::new().unwrap();
    let fs = RealFileSystem;

    assert!(fs.list_files(&temp.path().join("nope")).is_err());
}

#[test]
fn given_nested_path_when_ensure_parent_then_creates_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("x/y/z.md");
    let fs = RealFileSystem;

    fs.ensure_parent(&path).unwrap();

    assert!(fs.is_dir(&temp.path().join("x/y")));
    assert!(!fs.exists(&path));
}
