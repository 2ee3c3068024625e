use super::*;
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.port, 3000);
    assert!(!config.cookie_secure);
    assert!(config.session_ttl.is_none());
}

#[test]
fn reads_all_values() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("COOKIE_SECURE", "yes"),
        ("SESSION_MAX_AGE_SECS", "3600"),
    ]))
    .unwrap();
    assert_eq!(config.port, 8080);
    assert!(config.cookie_secure);
    assert_eq!(config.session_ttl, Some(Duration::hours(1)));
}

#[test]
fn zero_max_age_disables_expiry() {
    let config = ServerConfig::from_lookup(lookup(&[("SESSION_MAX_AGE_SECS", "0")])).unwrap();
    assert!(config.session_ttl.is_none());
}

#[test]
fn rejects_bad_values() {
    for (key, value) in [("PORT", "eighty"), ("PORT", "70000"), ("COOKIE_SECURE", "maybe"), ("SESSION_MAX_AGE_SECS", "-5")] {
        let err = ServerConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
        let ConfigError::Invalid { key: bad_key, value: bad_value } = err;
        assert_eq!(bad_key, key);
        assert_eq!(bad_value, value);
    }
}

#[test]
fn parse_bool_variants() {
    for raw in ["1", "true", "YES", " On "] {
        assert_eq!(parse_bool(raw), Some(true), "{raw:?}");
    }
    for raw in ["0", "False", "no", "off"] {
        assert_eq!(parse_bool(raw), Some(false), "{raw:?}");
    }
    assert_eq!(parse_bool(""), None);
    assert_eq!(parse_bool("maybe"), None);
}
