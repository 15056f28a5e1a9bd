use super::*;

fn response(status: u16, authorization: Option<&str>) -> HttpResponse {
    HttpResponse { status, authorization: authorization.map(str::to_owned), body: String::new() }
}

#[test]
fn success_range_is_2xx() {
    assert!(response(200, None).is_success());
    assert!(response(204, None).is_success());
    assert!(!response(199, None).is_success());
    assert!(!response(301, None).is_success());
    assert!(!response(422, None).is_success());
}

#[test]
fn refreshed_token_requires_bearer_prefix() {
    assert_eq!(response(200, Some("Bearer abc.def")).refreshed_token(), Some("abc.def"));
    assert_eq!(response(401, Some("Bearer xyz")).refreshed_token(), Some("xyz"));
    assert_eq!(response(200, Some("Basic abc")).refreshed_token(), None);
    assert_eq!(response(200, Some("Bearer ")).refreshed_token(), None);
    assert_eq!(response(200, None).refreshed_token(), None);
}

#[test]
fn method_names_are_uppercase() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Patch.as_str(), "PATCH");
    assert_eq!(Method::Delete.as_str(), "DELETE");
}
