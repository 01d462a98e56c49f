use aupdump_core::hasher::content_hash_bytes;
use aupdump_core::{Introspector, PluginCategory, Stage, ValidationError, validate_input};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn unloadable_plugin_still_gets_a_record() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("plugins/broken.auf");
    write_file(&path, b"not a portable executable");

    let record = Introspector::native().introspect(&path).expect("record");

    assert_eq!(record.category, PluginCategory::Filter);
    assert_eq!(record.filename, "broken.auf");
    assert_eq!(record.content_hash, content_hash_bytes(b"not a portable executable"));
    assert!(record.entries.is_empty());
    assert_eq!(record.diagnostics.len(), 1);
    assert_eq!(record.diagnostics[0].stage, Stage::Load);
}

#[test]
fn every_table_category_reports_load_failures() {
    let tmp = tempdir().unwrap();
    let introspector = Introspector::native();

    for (name, category) in [
        ("a.auf", PluginCategory::Filter),
        ("a.aui", PluginCategory::Input),
        ("a.auo", PluginCategory::Output),
        ("a.auc", PluginCategory::Color),
        ("a.aul", PluginCategory::Language),
    ] {
        let path = tmp.path().join(name);
        write_file(&path, b"garbage");
        let record = introspector.introspect(&path).expect("record");
        assert_eq!(record.category, category);
        assert!(record.entries.is_empty());
        assert_eq!(record.diagnostics[0].stage, Stage::Load, "{name}");
    }
}

#[test]
fn unknown_file_is_hashed_but_not_loaded() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("notes.txt");
    write_file(&path, b"abc");

    let record = Introspector::native().introspect(&path).expect("record");

    assert_eq!(record.category, PluginCategory::Unknown);
    assert_eq!(
        record.content_hash,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert!(record.entries.is_empty());
    assert!(record.is_clean());
}

#[test]
fn nonexistent_path_is_rejected_by_validation() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("missing.auf");

    match validate_input(&path) {
        Err(ValidationError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}
