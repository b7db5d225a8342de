//! End-to-end conversion tests: delta JSON file in, PDF file out

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use quill_pdf_rust::{convert_file, RenderError};

fn write_input(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("input.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn converts_full_document() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        r##"{
            "title": "Weekly Talk",
            "presenter": "A. Speaker",
            "summary": "Notes on endurance",
            "content": [
                {"insert": "Opening thought", "attributes": {"bold": true, "size": 14}},
                {"insert": "\n"},
                {"insert": "Body text with "},
                {"insert": "emphasis", "attributes": {"italic": true, "underline": true}},
                {"insert": " and more.\n", "attributes": {"align": "justify"}},
                {"insert": {"highlights": {
                    "publication": {"code": "JW"},
                    "entity": {"range": {"range": "12-15"}, "selected": "hello"}
                }}},
                {"insert": {"verse": {"id": "3:16"}}},
                {"insert": "Closing.\n", "attributes": {"align": "center", "background": "#FFEE88"}}
            ]
        }"##,
    );
    let output = dir.path().join("out.pdf");

    let stats = convert_file(&input, &output, None).unwrap();

    assert!(stats.paragraphs >= 5);
    assert_eq!(stats.skipped, 0);
    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn empty_content_produces_header_only_document() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, r#"{"title": "T", "content": []}"#);
    let output = dir.path().join("out.pdf");

    let stats = convert_file(&input, &output, None).unwrap();

    assert_eq!(stats.paragraphs, 0);
    assert!(output.is_file());
}

#[test]
fn missing_content_array_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, r#"{"title": "T"}"#);
    let output = dir.path().join("out.pdf");

    let err = convert_file(&input, &output, None).unwrap_err();

    assert!(matches!(err, RenderError::InputParse(_)));
    assert!(!output.exists());
}

#[test]
fn unreadable_input_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.pdf");

    let err = convert_file(&dir.path().join("missing.json"), &output, None).unwrap_err();

    assert!(matches!(err, RenderError::InputRead { .. }));
}

#[test]
fn malformed_background_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        r#"{"content": [{"insert": "x\n", "attributes": {"background": "chartreuse"}}]}"#,
    );
    let output = dir.path().join("out.pdf");

    let err = convert_file(&input, &output, None).unwrap_err();

    assert!(matches!(err, RenderError::InvalidColor(_)));
    // failed conversions leave no half-written file behind
    assert!(!output.exists());
}

#[test]
fn unknown_entities_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        r#"{"content": [
            {"insert": {"mystery": {"x": 1}}},
            {"insert": "kept\n"}
        ]}"#,
    );
    let output = dir.path().join("out.pdf");

    let stats = convert_file(&input, &output, None).unwrap();

    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.paragraphs, 1);
    assert!(output.is_file());
}

#[test]
fn verse_icon_is_embedded_when_asset_exists() {
    let dir = TempDir::new().unwrap();
    let icon_dir = dir.path().join("icons");
    fs::create_dir(&icon_dir).unwrap();
    let icon = image::RgbaImage::from_pixel(8, 8, image::Rgba([40, 90, 180, 255]));
    icon.save(icon_dir.join("verse.png")).unwrap();

    let input = write_input(
        &dir,
        r#"{"content": [{"insert": {"verse": {"id": "3:16"}}}]}"#,
    );
    let output = dir.path().join("out.pdf");

    let stats = convert_file(&input, &output, Some(&icon_dir)).unwrap();

    assert_eq!(stats.paragraphs, 1);
    assert!(fs::read(&output).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn missing_verse_icon_degrades_gracefully() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        r#"{"content": [{"insert": {"verse": {"id": "3:16"}}}]}"#,
    );
    let output = dir.path().join("out.pdf");

    // no icon directory configured: the verse paragraph still renders
    let stats = convert_file(&input, &output, None).unwrap();

    assert_eq!(stats.paragraphs, 1);
    assert!(output.is_file());
}
