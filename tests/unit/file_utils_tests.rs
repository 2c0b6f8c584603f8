/*!
 * Tests for file input and output helpers
 */

use std::fs;
use std::path::Path;

use chunkwise::file_utils::FileManager;

use crate::common;

/// Test reading an input file
#[test]
fn test_read_input_withFile_shouldReturnContents() {
    let dir = common::create_temp_dir();
    let path = common::create_test_file(dir.path(), "in.txt", "Hello there. General Kenobi!");

    let text = FileManager::read_input(Some(&path)).unwrap();
    assert_eq!(text, "Hello there. General Kenobi!");
}

/// Test that a missing input file is an error naming the path
#[test]
fn test_read_input_withMissingFile_shouldFail() {
    let dir = common::create_temp_dir();
    let path = dir.path().join("missing.txt");

    let error = FileManager::read_input(Some(&path)).unwrap_err();
    assert!(error.to_string().contains("missing.txt"));
}

/// Test writing output creates missing directories
#[test]
fn test_write_output_withNestedPath_shouldCreateParents() {
    let dir = common::create_temp_dir();
    let path = dir.path().join("nested").join("deeper").join("out.txt");

    FileManager::write_output(Some(&path), "नमस्ते").unwrap();

    assert!(path.is_file());
    assert_eq!(fs::read_to_string(&path).unwrap(), "नमस्ते");
}

/// Test stdio detection
#[test]
fn test_is_stdio_shouldRecognizeDashAndNone() {
    assert!(FileManager::is_stdio(None));
    assert!(FileManager::is_stdio(Some(Path::new("-"))));
    assert!(!FileManager::is_stdio(Some(Path::new("out.txt"))));
}

/// Test output path generation
#[test]
fn test_generate_output_path_shouldTagWithLanguage() {
    assert_eq!(
        FileManager::generate_output_path("/tmp/letter.txt", "hi"),
        Path::new("/tmp/letter.hi.txt")
    );
    assert_eq!(
        FileManager::generate_output_path("notes", "gu"),
        Path::new("notes.gu")
    );
}
