use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn from_lookup_defaults_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(
        cfg,
        ServerConfig { port: DEFAULT_PORT, site_root: None, api_base_url: DEFAULT_API_BASE_URL.to_owned() }
    );
}

#[test]
fn from_lookup_reads_all_values() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[
        ("PORT", " 8080 "),
        ("SITE_ROOT", "target/site"),
        ("SHOP_API_BASE_URL", "http://localhost:4000/"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.site_root, Some(PathBuf::from("target/site")));
    assert_eq!(cfg.api_base_url, "http://localhost:4000");
}

#[test]
fn from_lookup_rejects_bad_port() {
    let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { ref value } if value == "eighty"));
    assert_eq!(err.to_string(), "invalid PORT: \"eighty\"");
}

#[test]
fn from_lookup_rejects_non_http_api_url() {
    let err = ServerConfig::from_lookup(lookup_from(&[("SHOP_API_BASE_URL", "ftp://files")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidApiBaseUrl { .. }));
}

#[test]
fn from_lookup_treats_blank_values_as_unset() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[("SITE_ROOT", "  "), ("SHOP_API_BASE_URL", " ")])).unwrap();
    assert_eq!(cfg.site_root, None);
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn bundle_mismatch_reports_only_a_differing_url() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[("SHOP_API_BASE_URL", "http://localhost:4000/")])).unwrap();
    assert_eq!(cfg.bundle_mismatch("http://localhost:4000"), None);
    assert_eq!(cfg.bundle_mismatch(DEFAULT_API_BASE_URL), Some(DEFAULT_API_BASE_URL));
}
