/*!
 * Integration tests for the subsync binary
 */

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use anyhow::Result;
use crate::common;

fn subsync() -> Command {
    Command::new(env!("CARGO_BIN_EXE_subsync"))
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Result<Output> {
    let mut child = subsync()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut pipe) = child.stdin.take() {
        pipe.write_all(stdin.as_bytes())?;
    }
    Ok(child.wait_with_output()?)
}

/// Test that help exits successfully and shows the example
#[test]
fn test_help_shouldExitZero() -> Result<()> {
    let output = subsync().arg("--help").output()?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--first-sub"));
    assert!(stdout.contains("subsync -f 00:01:33,492 -l 01:39:23,561 -i file.srt"));

    Ok(())
}

/// Test that version exits successfully
#[test]
fn test_version_shouldExitZero() -> Result<()> {
    let output = subsync().arg("--version").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

/// Test that flag errors exit with status 1
#[test]
fn test_flagErrors_shouldExitOne() -> Result<()> {
    assert_eq!(subsync().output()?.status.code(), Some(1));
    assert_eq!(subsync().args(["-f", "00:00:01,000"]).output()?.status.code(), Some(1));
    assert_eq!(subsync().args(["-i", "x.srt", "--bogus"]).output()?.status.code(), Some(1));

    let output = subsync().args(["-i", "x.srt", "-f", "1:2"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed timestamp"));

    Ok(())
}

/// Test the full file round trip through the binary
#[test]
fn test_run_withFiles_shouldRewriteOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", common::DRIFTED_SRT)?;
    let output_path = temp_dir.path().join("movie.synced.srt");

    let output = subsync()
        .arg("-f").arg("00:00:00,000")
        .arg("-l").arg("00:01:00.000")
        .arg("-i").arg(&input)
        .arg("-o").arg(&output_path)
        .output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let written = fs::read_to_string(&output_path)?;
    assert!(written.starts_with("1\r\n00:00:00,000 --> 00:00:01,333\r\n"));
    assert!(written.contains("2\r\n00:01:00,000 --> 00:01:01,333\r\nWorld\r\n"));

    Ok(())
}

/// Test piping through standard input and output
#[test]
fn test_run_withStdio_shouldWriteToStdout() -> Result<()> {
    let output = run_with_stdin(&["-i", "-", "-f", "00:00:05,000", "--log-level", "error"], common::DRIFTED_SRT)?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("1\r\n00:00:05,000 --> 00:00:07,111\r\nHello\r\n\r\n"));
    assert!(stdout.contains("2\r\n00:01:40,000 --> 00:01:42,111\r\nWorld\r\n\r\n"));

    Ok(())
}

/// Test that first after last is a distinct fatal error
#[test]
fn test_run_withFirstAfterLast_shouldExitOneWithMessage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", common::DRIFTED_SRT)?;

    let output = subsync()
        .args(["-f", "00:02:00,000", "-l", "00:01:00,000", "-i"])
        .arg(&input)
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("first subtitle can not be after last subtitle"));
    assert_eq!(fs::read_to_string(&input)?, common::DRIFTED_SRT);

    Ok(())
}

/// Test that parse errors are reported on stderr with status 1
#[test]
fn test_run_withMalformedIndex_shouldExitOne() -> Result<()> {
    let output = run_with_stdin(&["-i", "-"], "1 2\n00:00:01,000 --> 00:00:02,000\nText\n")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("wrong index line"));
    assert!(output.stdout.is_empty());

    Ok(())
}

/// Test that a missing input file is reported
#[test]
fn test_run_withMissingInput_shouldExitOne() -> Result<()> {
    let output = subsync().args(["-i", "definitely_missing_file.srt"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("definitely_missing_file.srt"));

    Ok(())
}

/// Test completions generation
#[test]
fn test_completions_shouldPrintScript() -> Result<()> {
    let output = subsync().args(["--completions", "bash"]).output()?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("subsync"));

    Ok(())
}
