use std::time::Duration;

use questify::transport::FilePart;
use reqwest::header::CONTENT_TYPE;

use super::*;

fn transport() -> ReqwestTransport {
    ReqwestTransport::new().expect("client")
}

#[test]
fn bearer_token_becomes_authorization_header() {
    let mut request = ApiRequest::new(Method::Get, "http://localhost:5000/api/documents");
    request.bearer = Some("abc".to_owned());
    let built = transport().build(request).expect("build");
    assert_eq!(built.method(), reqwest::Method::GET);
    assert_eq!(built.url().as_str(), "http://localhost:5000/api/documents");
    assert_eq!(built.headers().get(AUTHORIZATION).expect("auth header"), "Bearer abc");
}

#[test]
fn public_request_has_no_authorization_header() {
    let request = ApiRequest::new(Method::Post, "http://localhost:5000/api/auth/login")
        .json(serde_json::json!({ "email": "a@b.co", "password": "secret123" }));
    let built = transport().build(request).expect("build");
    assert!(built.headers().get(AUTHORIZATION).is_none());
    assert_eq!(built.headers().get(CONTENT_TYPE).expect("content type"), "application/json");
}

#[test]
fn timeout_is_carried_onto_the_request() {
    let request = ApiRequest::new(Method::Post, "http://localhost:5000/api/auth/login")
        .timeout(Some(Duration::from_secs(10)));
    let built = transport().build(request).expect("build");
    assert_eq!(built.timeout(), Some(&Duration::from_secs(10)));
}

#[test]
fn multipart_upload_sets_form_content_type() {
    let part = FilePart {
        field: "file".to_owned(),
        file_name: "notes.txt".to_owned(),
        content_type: "text/plain".to_owned(),
        bytes: b"hello".to_vec(),
    };
    let request = ApiRequest::new(Method::Post, "http://localhost:5000/api/upload").multipart(part);
    let built = transport().build(request).expect("build");
    let content_type = built.headers().get(CONTENT_TYPE).expect("content type");
    assert!(content_type.to_str().expect("ascii").starts_with("multipart/form-data; boundary="));
}

#[test]
fn malformed_url_is_a_network_error() {
    let request = ApiRequest::new(Method::Get, "not a url");
    assert!(matches!(transport().build(request), Err(TransportError::Network(_))));
}
