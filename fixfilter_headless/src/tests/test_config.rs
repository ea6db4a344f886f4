use crate::config::resolve_filter_config;
use chrono::TimeDelta;
use common::filter_config::FilterConfig;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

fn write_config(name: &str, content: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("fixfilter_{}_{}.json", name, std::process::id()));
    let mut file = std::fs::File::create(&path)
        .unwrap_or_else(|e| panic!("Failed to create {}. Error: {e}", path.display()));
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn defaults_without_any_file() {
    let missing = PathBuf::from("/does/not/exist/filter.json");
    let config = resolve_filter_config(None, Some(missing.as_path()), None, None).unwrap();
    assert_eq!(config, FilterConfig::default());

    let config = resolve_filter_config(None, None, None, None).unwrap();
    assert_eq!(config, FilterConfig::default());
}

#[test]
fn explicit_file_must_exist() {
    let missing = PathBuf::from("/does/not/exist/filter.json");
    let err = resolve_filter_config(Some(missing.as_path()), None, None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn explicit_file_wins_over_default_file() {
    let explicit = write_config("explicit", r#"{ "significantly_newer_ms": 5000 }"#);
    let default = write_config("default", r#"{ "significantly_newer_ms": 9000 }"#);
    let config = resolve_filter_config(Some(explicit.as_path()), Some(default.as_path()), None, None).unwrap();
    assert_eq!(config.significantly_newer, TimeDelta::seconds(5));

    let config = resolve_filter_config(None, Some(default.as_path()), None, None).unwrap();
    assert_eq!(config.significantly_newer, TimeDelta::seconds(9));
}

#[test]
fn overrides_are_applied_last() {
    let file = write_config("overrides", r#"{ "significantly_newer_ms": 5000, "significantly_less_accurate": 10.0 }"#);
    let config = resolve_filter_config(Some(file.as_path()), None, Some(30_000), Some(75.0)).unwrap();
    assert_eq!(config, FilterConfig::new(TimeDelta::seconds(30), 75.0));
}

#[test]
fn invalid_override_is_rejected() {
    let err = resolve_filter_config(None, None, Some(-1), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    let err = resolve_filter_config(None, None, None, Some(f64::INFINITY)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
