//! Tests for settings loading, creation, and path resolution.

use super::*;
use crate::schema::ViewerSettings;
use cfgview_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let err = load_from_path(Path::new("/tmp/nonexistent_cfgview_settings.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "flat_switch = true\ncolor_scheme = \"dark\"\n").unwrap();

    let settings = load_from_path(&path).unwrap();
    assert!(settings.flat_switch);
    assert_eq!(settings.color_scheme, "dark");
    // Defaults preserved
    assert!(settings.simplify);
    assert!(settings.highlight);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn load_wrong_type_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "simplify = \"yes\"").unwrap();
    assert!(matches!(
        load_from_path(&path).unwrap_err(),
        ConfigError::ParseError(_)
    ));
}

#[test]
fn invalid_color_scheme_is_loaded_anyway() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "color_scheme = \"not a scheme\"").unwrap();

    let settings = load_from_path(&path).unwrap();
    assert_eq!(settings.color_scheme, "not a scheme");
}

#[test]
fn custom_scheme_in_literal_string() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r##"color_scheme = '{"version":1,"scheme":[{"name":"graph.background","hex":"#202020"}]}'"##,
    )
    .unwrap();

    let settings = load_from_path(&path).unwrap();
    assert!(settings.color_scheme.starts_with("{\"version\":1"));
    assert!(crate::validation::validate(&settings).is_ok());
}

#[test]
fn load_or_create_writes_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfgview").join("settings.toml");

    let settings = load_or_create(&path).unwrap();
    assert_eq!(settings, ViewerSettings::default());
    assert!(path.exists());

    let reloaded = load_from_path(&path).unwrap();
    assert_eq!(reloaded, ViewerSettings::default());
}

#[test]
fn load_or_create_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "highlight = false").unwrap();

    let settings = load_or_create(&path).unwrap();
    assert!(!settings.highlight);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "highlight = false");
}

#[test]
fn default_settings_toml_is_default() {
    use super::template::default_settings_toml;

    let settings: ViewerSettings = toml::from_str(default_settings_toml()).unwrap();
    assert_eq!(settings, ViewerSettings::default());
}

#[test]
fn default_settings_path_is_reasonable() {
    // No config dir in some CI sandboxes.
    if let Ok(path) = default_settings_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("cfgview"));
        assert!(path_str.ends_with("settings.toml"));
    }
}
