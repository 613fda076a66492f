//! End-to-end helper coverage against a real filesystem.

use std::fs;

use sidekick::import::{csv, csv_from_reader, Column, CsvOptions};
use sidekick::rest::{array_errors, first_errors, FieldError};
use sidekick::{archive, files, json, strings};

#[test]
fn csv_import_from_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.csv");
    fs::write(&path, "firstname,lastname\nJohn,Doe\nJane,Doe\n").unwrap();

    let options = CsvOptions {
        remove_header: true,
        fields: Some(vec![Column::Name("firstname".to_string())]),
        ..Default::default()
    };

    let result = csv(path.to_str().unwrap(), &options).unwrap();
    assert_eq!(result, vec![vec!["John".to_string()], vec!["Jane".to_string()]]);
}

#[test]
fn csv_import_from_reader() {
    let result = csv_from_reader("foobarcontent".as_bytes(), &CsvOptions::default()).unwrap();
    assert_eq!(result, vec![vec!["foobarcontent".to_string()]]);
}

#[test]
fn zip_dir_round_trip() {
    let source = tempfile::tempdir().unwrap();
    let dir_name = source
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();

    fs::write(source.path().join("a.txt"), "alpha").unwrap();
    fs::create_dir(source.path().join("sub")).unwrap();
    fs::write(source.path().join("sub/b.txt"), "beta").unwrap();

    let out = tempfile::tempdir().unwrap();
    let zip_path = out.path().join("test.zip");
    archive::zip_dir(source.path(), &zip_path).unwrap();
    assert!(zip_path.is_file());

    let file = fs::File::open(&zip_path).unwrap();
    let mut opened = zip::ZipArchive::new(file).unwrap();

    let mut content = String::new();
    std::io::Read::read_to_string(
        &mut opened.by_name(&format!("{}/sub/b.txt", dir_name)).unwrap(),
        &mut content,
    )
    .unwrap();
    assert_eq!(content, "beta");
}

#[test]
fn zipped_archive_digest_is_stable_content() {
    // two archives of the same tree hold the same entries
    let source = tempfile::tempdir().unwrap();
    fs::write(source.path().join("z.txt"), "zz").unwrap();
    fs::write(source.path().join("a.txt"), "aa").unwrap();

    let out = tempfile::tempdir().unwrap();
    let first = out.path().join("first.zip");
    let second = out.path().join("second.zip");
    archive::zip_dir(source.path(), &first).unwrap();
    archive::zip_dir(source.path(), &second).unwrap();

    let names = |path: &std::path::Path| -> Vec<String> {
        let mut opened = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
        (0..opened.len())
            .map(|i| opened.by_index(i).unwrap().name().to_string())
            .collect()
    };

    assert_eq!(names(&first), names(&second));
}

#[test]
fn json_probe_matches_original_cases() {
    assert!(!json::is_json("12312312"));
    assert!(!json::is_json(r#"text{"123":123}"#));
    assert!(json::is_json(r#"{"123":"456"}"#));
    assert!(json::is_json(r#"{"123":456}"#));
    assert!(json::is_json(r#"[{"123":"456"}]"#));
}

#[test]
fn rest_error_shapes() {
    assert_eq!(
        first_errors([("foo", "error!")]),
        vec![FieldError::new("foo", "error!")]
    );

    let errors = serde_json::json!({"foo": "error!"});
    assert_eq!(
        array_errors(errors.as_object().unwrap()),
        vec![FieldError::new("foo", "error!")]
    );
}

#[test]
fn file_helpers_work_together() {
    let dir = tempfile::tempdir().unwrap();
    let name = files::ensure_extension("report", "txt");
    assert_eq!(name, "report.txt");

    let path = dir.path().join(&name);
    files::write_file_atomic(&path, "hello world").unwrap();
    assert_eq!(files::read_file(&path).unwrap(), "hello world");
    assert_eq!(
        files::sha256sum(&path).unwrap(),
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );

    assert!(files::unlink(&path));
    assert!(!path.exists());
}

#[test]
fn string_helpers_compose() {
    let rendered = strings::template(
        "Hello {{ name }}, you have {{ count }} results",
        &[("name", "John"), ("count", "3")],
        false,
    );
    assert_eq!(rendered, "Hello John, you have 3 results");

    let highlighted = strings::highlight_word(&rendered, &["john"], "<b>%s</b>");
    assert_eq!(highlighted, "Hello <b>John</b>, you have 3 results");

    assert!(strings::filter_match_list("cms_nav_item", "cms_*,!admin_*", false));
}
