//! Integration tests for the pdfweb CLI
//!
//! Runs the compiled binary against image and PDF fixtures written to a
//! temporary directory.

use anyhow::Result;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Test helper to get the CLI binary path
fn get_cli_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    if path.ends_with("deps") {
        path.pop(); // Remove "deps" directory
    }
    path.push("pdfweb");
    #[cfg(windows)]
    path.set_extension("exe");
    path
}

fn setup_temp_dir() -> TempDir {
    tempdir().expect("Failed to create temp directory")
}

fn run_cli_command(args: &[&str]) -> Result<std::process::Output> {
    let output = Command::new(get_cli_path()).args(args).output()?;
    Ok(output)
}

fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let format = ImageFormat::from_path(&path).expect("known image extension");
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 120, 200])))
        .save_with_format(&path, format)
        .expect("Failed to write image fixture");
    path
}

fn assert_pdf_exists_and_valid(path: &Path) {
    assert!(path.exists(), "PDF file should exist: {}", path.display());
    let content = fs::read(path).expect("Failed to read PDF file");
    assert!(
        content.starts_with(b"%PDF-"),
        "File should start with PDF header"
    );
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_images_merged() {
    let temp_dir = setup_temp_dir();
    let a = write_image(temp_dir.path(), "a.png", 30, 20);
    let b = write_image(temp_dir.path(), "b.jpg", 20, 30);
    let output_path = temp_dir.path().join("album.pdf");

    let output = run_cli_command(&[
        "images",
        path_str(&b),
        path_str(&a),
        "-o",
        path_str(&output_path),
        "--style",
        "a4-margins",
    ])
    .expect("CLI command should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_pdf_exists_and_valid(&output_path);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote 2 page(s)"), "stdout: {stdout}");
}

#[test]
fn test_cli_images_per_file_zip() {
    let temp_dir = setup_temp_dir();
    let files: Vec<PathBuf> = ["one.png", "two.png", "three.png"]
        .iter()
        .map(|name| write_image(temp_dir.path(), name, 12, 12))
        .collect();
    let output_path = temp_dir.path().join("pages.zip");

    let mut args = vec!["images"];
    args.extend(files.iter().map(|p| path_str(p)));
    args.extend(["-o", path_str(&output_path), "--per-file", "--order", "as-is"]);

    let output = run_cli_command(&args).expect("CLI command should run");
    assert!(output.status.success());

    let archive = fs::File::open(&output_path).unwrap();
    let archive = zip::ZipArchive::new(archive).unwrap();
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort();
    assert_eq!(names, ["one.pdf", "three.pdf", "two.pdf"]);
}

#[test]
fn test_cli_images_rejects_non_image() {
    let temp_dir = setup_temp_dir();
    let image = write_image(temp_dir.path(), "a.png", 10, 10);
    let notes = temp_dir.path().join("notes.txt");
    fs::write(&notes, "hello").unwrap();
    let output_path = temp_dir.path().join("out.pdf");

    let output = run_cli_command(&[
        "images",
        path_str(&image),
        path_str(&notes),
        "-o",
        path_str(&output_path),
    ])
    .expect("CLI command should run");

    assert!(!output.status.success());
    assert!(!output_path.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("notes.txt is not an image"), "stderr: {stderr}");
}

#[test]
fn test_cli_invalid_order() {
    let temp_dir = setup_temp_dir();
    let image = write_image(temp_dir.path(), "a.png", 10, 10);

    let output = run_cli_command(&[
        "images",
        path_str(&image),
        "-o",
        "out.pdf",
        "--order",
        "random",
    ])
    .expect("CLI command should run");

    assert!(!output.status.success());
}

#[test]
fn test_cli_merge() {
    let temp_dir = setup_temp_dir();
    let image = write_image(temp_dir.path(), "page.png", 16, 16);

    let first = temp_dir.path().join("first.pdf");
    let second = temp_dir.path().join("second.pdf");
    for target in [&first, &second] {
        let output = run_cli_command(&["images", path_str(&image), "-o", path_str(target)])
            .expect("CLI command should run");
        assert!(output.status.success());
    }

    let merged = temp_dir.path().join("merged.pdf");
    let output = run_cli_command(&[
        "merge",
        path_str(&first),
        path_str(&second),
        "-o",
        path_str(&merged),
    ])
    .expect("CLI command should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_pdf_exists_and_valid(&merged);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Merged 2 file(s), 2 page(s)"), "stdout: {stdout}");
}

#[test]
fn test_cli_merge_nothing_valid() {
    let temp_dir = setup_temp_dir();
    let notes = temp_dir.path().join("notes.txt");
    fs::write(&notes, "not a pdf").unwrap();

    let output = run_cli_command(&["merge", path_str(&notes), "-o", "merged.pdf"])
        .expect("CLI command should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Skipped notes.txt: not a PDF"), "stderr: {stderr}");
}

#[test]
fn test_cli_word_missing_converter() {
    let temp_dir = setup_temp_dir();
    let doc = temp_dir.path().join("letter.docx");
    fs::write(&doc, "PK fake").unwrap();

    let output = run_cli_command(&[
        "word",
        path_str(&doc),
        "--soffice",
        "/nonexistent/pdfweb/soffice",
    ])
    .expect("CLI command should run");

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("letter.pdf").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("LibreOffice not found"), "stderr: {stderr}");
}

#[test]
fn test_cli_help() {
    let output = run_cli_command(&["--help"]).expect("CLI command should run");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["images", "merge", "word"] {
        assert!(stdout.contains(command), "help should list {command}");
    }
}
