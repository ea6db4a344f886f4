use crate::filter_config::FilterConfig;
use chrono::TimeDelta;
use std::io::ErrorKind;

#[test]
fn default_thresholds() {
    let config = FilterConfig::default();
    assert_eq!(config.significantly_newer, TimeDelta::minutes(2));
    assert_eq!(config.significantly_less_accurate, 200.0);
}

#[test]
fn missing_keys_use_defaults() {
    let config = FilterConfig::from_json(r#"{ "significantly_less_accurate": 50.0 }"#).unwrap();
    assert_eq!(config.significantly_newer, TimeDelta::milliseconds(120_000));
    assert_eq!(config.significantly_less_accurate, 50.0);

    let config = FilterConfig::from_json("{}").unwrap();
    assert_eq!(config, FilterConfig::default());
}

#[test]
fn negative_threshold_is_rejected() {
    let err = FilterConfig::from_json(r#"{ "significantly_newer_ms": -1 }"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);

    let err = FilterConfig::from_json(r#"{ "significantly_less_accurate": -0.5 }"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = FilterConfig::from_json("{ significantly_newer_ms: }").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn serialize_as_milliseconds() {
    let config = FilterConfig::new(TimeDelta::seconds(30), 75.0);
    let json = serde_json::to_value(config).unwrap();
    assert_eq!(json["significantly_newer_ms"], 30_000);
    assert_eq!(json["significantly_less_accurate"], 75.0);
}
