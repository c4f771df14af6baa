use super::*;
use tempfile::tempdir;

#[test]
fn settings_path_lives_under_cache_dir() {
    let Some(path) = get_settings_path() else {
        return;
    };
    assert!(path.ends_with(".codeplay/setting.json"));
}

#[test]
fn default_file_is_written_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cfg/setting.json");

    write_default_settings(&path).unwrap();
    assert_eq!(load_settings_from(&path), Some(Settings::default()));

    std::fs::write(&path, r#"{"default_language_id": 71}"#).unwrap();
    write_default_settings(&path).unwrap();
    assert_eq!(load_settings_from(&path).unwrap().default_language_id, 71);
}

#[test]
fn malformed_or_missing_file_yields_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("setting.json");
    assert_eq!(load_settings_from(&path), None);

    std::fs::write(&path, "{ nope").unwrap();
    assert_eq!(load_settings_from(&path), None);
}
