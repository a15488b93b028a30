// toregex-core/tests/options_config_tests.rs
use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tempfile::{Builder, NamedTempFile};

use toregex_core::{cache_key, OptionValue, Options, PatternCache};

#[test]
fn test_load_yaml_options_from_file() -> Result<()> {
    let yaml_content = r#"
contains: true
negate: true
flags: "i"
endChar: "+"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let options = Options::load_from_file(file.path())?;
    assert_eq!(options.len(), 4);
    assert!(options.is_true("contains"));
    assert_eq!(options.get("flags"), Some(&OptionValue::from("i")));
    assert_eq!(options.get("endChar"), Some(&OptionValue::from("+")));
    Ok(())
}

#[test]
fn test_load_json_options_from_file() -> Result<()> {
    let mut file = Builder::new().suffix(".json").tempfile()?;
    file.write_all(br#"{"strictOpen": false, "depth": 3, "ratio": 0.5}"#)?;

    let options = Options::load_from_file(file.path())?;
    assert!(options.is_false("strictOpen"));
    assert_eq!(options.get("depth"), Some(&OptionValue::Int(3)));
    assert_eq!(options.get("ratio"), Some(&OptionValue::Float(0.5)));
    Ok(())
}

#[test]
fn test_missing_file_reports_path() {
    let err = Options::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.yaml"));
}

#[test]
fn test_loaded_options_match_builder_key() -> Result<()> {
    let loaded = Options::from_yaml_str("contains: true\nflags: ig\n")?;
    let built = Options::new().contains(true).flags("ig");
    assert_eq!(loaded, built);
    assert_eq!(cache_key("foo", Some(&loaded)), cache_key("foo", Some(&built)));

    let cache = PatternCache::new();
    let a = cache.compile("foo", Some(&loaded))?;
    let b = cache.compile("foo", Some(&built))?;
    assert!(Arc::ptr_eq(&a, &b));
    assert!(a.is_match("xFOOx"));
    Ok(())
}

#[test]
fn test_options_round_trip_through_json() -> Result<()> {
    let options = Options::new().negate(true).flags("g").with("depth", 2);
    let text = serde_json::to_string(&options)?;
    assert_eq!(text, r#"{"negate":true,"flags":"g","depth":2}"#);
    Ok(())
}

#[test]
fn test_invalid_yaml_is_rejected() {
    assert!(Options::from_yaml_str("- just\n- a list\n").is_err());
}
