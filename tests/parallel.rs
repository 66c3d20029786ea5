//! Tests for parallel CLI processing of multiple files.

use std::{fs::File, io::Write};

use docletfix::{LengthOptions, ParseOptions, fix_text};
use tempfile::tempdir;

#[macro_use]
mod prelude;
use prelude::*;

/// Tests that files processed in parallel are printed in argument order.
#[rstest]
fn test_cli_parallel_multiple_files() {
    let dir = tempdir().expect("failed to create temporary directory");
    let options = LengthOptions {
        max_length: 24,
        ..LengthOptions::default()
    };
    let mut files = Vec::new();
    let mut expected = String::new();
    for i in 0..6 {
        let path = dir.path().join(format!("file{i}.ts"));
        let text = source!(
            format!("export const value{i} = compute(first{i}, second{i});"),
            format!("/** Describes value number {i} in a few more words than fit. */"),
            String::new(),
        );
        let mut f = File::create(&path).expect("failed to create temporary file");
        f.write_all(text.as_bytes()).expect("failed to write file");
        f.flush().expect("failed to flush file");
        drop(f);
        expected.push_str(
            &fix_text("unused", &text, ParseOptions::default(), &options).expect("fixture parses"),
        );
        files.push(path);
    }

    let mut cmd = Command::cargo_bin("docletfix").expect("failed to create command");
    cmd.args(["--max-length", "24"]);
    for path in &files {
        cmd.arg(path);
    }
    let output = cmd.output().expect("failed to run command");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

/// Verifies that a missing file among several fails the run and names the file.
#[rstest]
fn test_cli_parallel_missing_file_error() {
    let dir = tempdir().expect("failed to create temporary directory");
    let good = dir.path().join("good.ts");
    std::fs::write(&good, "good();\n").expect("failed to write file");
    let missing = dir.path().join("missing.ts");

    let output = Command::cargo_bin("docletfix")
        .expect("failed to create command")
        .arg(&good)
        .arg(&missing)
        .output()
        .expect("failed to run command");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.ts"));
}
