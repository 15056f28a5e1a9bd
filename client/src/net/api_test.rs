use super::*;

#[test]
fn base_url_is_normalized() {
    let url = api_base_url();
    assert!(url.starts_with("http"));
    assert!(!url.ends_with('/'));
}

#[test]
fn client_uses_configured_base_url() {
    assert_eq!(shop_client().base_url(), api_base_url());
}

#[test]
fn token_is_absent_outside_the_browser() {
    assert_eq!(shop_client().token(), None);
}
