//! End-to-end tests that drive the built `rocplot` binary.

use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const USAGE: &str = "Usage: rocplot <input_file> <output_image>";

/// Run the binary with `home` as its HOME and XDG config root.
fn rocplot(home: &Path, args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rocplot"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .output()
        .expect("failed to run rocplot")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn fixture(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_no_arguments_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = rocplot(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output).trim(), USAGE);
}

#[test]
fn test_one_argument_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir, "scores.csv", "y,p\n1,0.9\n0,0.1\n");
    let output = rocplot(dir.path(), &[&input]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains(USAGE));
}

#[test]
fn test_extra_argument_prints_usage_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir, "scores.csv", "y,p\n1,0.9\n0,0.1\n");
    let image = dir.path().join("roc.png");
    let extra = dir.path().join("extra");
    let output = rocplot(dir.path(), &[&input, &image, &extra]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains(USAGE));
    assert!(!image.exists());
}

#[test]
fn test_help_and_version_count_as_one_argument() {
    let dir = tempfile::tempdir().unwrap();
    for flag in ["--help", "-h", "--version", "-V"] {
        let output = rocplot(dir.path(), &[Path::new(flag)]);
        assert_eq!(output.status.code(), Some(1), "{flag}");
        assert_eq!(stdout(&output).trim(), USAGE, "{flag}");
    }
}

#[test]
fn test_user_config_file_is_not_read() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join(".config").join("rocplot");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[plot]\nwidth = \"wide\"\n",
    )
    .unwrap();

    let input = fixture(
        &dir,
        "scores.csv",
        "label,score\n1,0.9\n1,0.8\n0,0.3\n0,0.1\n",
    );
    let image = dir.path().join("roc.png");
    let output = rocplot(dir.path(), &[&input, &image]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(std::fs::metadata(&image).unwrap().len() > 0);
}

#[test]
fn test_xlsx_input_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scores.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "label").unwrap();
    sheet.write_string(0, 1, "score").unwrap();
    let rows = [(0.0, 0.1), (0.0, 0.4), (1.0, 0.35), (1.0, 0.8)];
    for (row, (label, score)) in (1u32..).zip(rows) {
        sheet.write_number(row, 0, label).unwrap();
        sheet.write_number(row, 1, score).unwrap();
    }
    workbook.save(&input).unwrap();

    let image = dir.path().join("roc.svg");
    let output = rocplot(dir.path(), &[&input, &image]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        format!("ROC curve saved as {}", image.display())
    );
    let svg = std::fs::read_to_string(&image).unwrap();
    assert!(svg.contains("ROC curve (area = 0.75)"));
}

#[test]
fn test_successful_run_writes_image() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(
        &dir,
        "scores.csv",
        "label,score\n1,0.9\n1,0.8\n0,0.3\n0,0.1\n",
    );
    let image = dir.path().join("roc.png");
    let output = rocplot(dir.path(), &[&input, &image]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        format!("ROC curve saved as {}", image.display())
    );
    assert!(std::fs::metadata(&image).unwrap().len() > 0);
}

#[test]
fn test_svg_output_carries_auc_legend() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(
        &dir,
        "scores.tsv",
        "label\tscore\n0\t0.1\n0\t0.4\n1\t0.35\n1\t0.8\n",
    );
    let image = dir.path().join("roc.svg");
    let output = rocplot(dir.path(), &[&input, &image]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let svg = std::fs::read_to_string(&image).unwrap();
    assert!(svg.contains("ROC curve (area = 0.75)"));
}

#[test]
fn test_degenerate_labels_fail_distinctly() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir, "scores.csv", "y,p\n1,0.9\n1,0.2\n");
    let image = dir.path().join("roc.png");
    let output = rocplot(dir.path(), &[&input, &image]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Degenerate labels"));
    assert!(!image.exists());
}

#[test]
fn test_non_binary_labels_fail() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir, "scores.csv", "y,p\n0,0.9\n1,0.2\n2,0.5\n");
    let image = dir.path().join("roc.png");
    let output = rocplot(dir.path(), &[&input, &image]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("not binary"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.xlsx");
    let image = dir.path().join("roc.png");
    let output = rocplot(dir.path(), &[&input, &image]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Input error"));
    assert!(!image.exists());
}

#[test]
fn test_unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir, "scores.csv", "y,p\n1,0.9\n0,0.1\n");
    let image = dir.path().join("no-such-dir").join("roc.png");
    let output = rocplot(dir.path(), &[&input, &image]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("IO error"));
}
