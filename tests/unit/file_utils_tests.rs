/*!
 * Tests for file utility functions
 */

use std::io::{Read, Write};
use std::path::Path;
use anyhow::Result;
use subsync::errors::AppError;
use subsync::file_utils::FileManager;
use crate::common;

#[test]
fn test_is_stdio_withDash_shouldReturnTrue() {
    assert!(FileManager::is_stdio("-"));
    assert!(!FileManager::is_stdio("./-"));
    assert!(!FileManager::is_stdio("subs.srt"));
}

#[test]
fn test_open_input_withMissingFile_shouldReportPath() {
    let result = FileManager::open_input(Path::new("non_existent_file_12345.srt"));

    match result {
        Err(AppError::File(message)) => {
            assert!(message.starts_with("open: "));
            assert!(message.contains("non_existent_file_12345.srt"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("opening a missing file should fail"),
    }
}

#[test]
fn test_create_output_withMissingParent_shouldCreateDirsWhenAllowed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("out.srt");

    let mut writer = FileManager::create_output(&nested, true)?;
    writer.write_all(b"data")?;
    drop(writer);

    let mut content = String::new();
    FileManager::open_input(&nested)?.read_to_string(&mut content)?;
    assert_eq!(content, "data");

    Ok(())
}

#[test]
fn test_create_output_withMissingParent_shouldFailWhenDirsDisabled() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("missing").join("out.srt");

    assert!(matches!(FileManager::create_output(&nested, false), Err(AppError::File(_))));

    Ok(())
}
