//! Integration tests for the HTTP transport.

use editable_grid_core::{DocumentTransport, TransportError};
use editable_grid_net::HttpTransport;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/grid.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<table/>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let body = transport
        .fetch(&format!("{}/grid.xml", server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "<table/>");
}

#[tokio::test]
async fn test_missing_document_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let location = format!("{}/missing.xml", server.uri());
    let transport = HttpTransport::new().unwrap();
    let err = transport.fetch(&location).await.unwrap_err();
    assert_eq!(err, TransportError::NotFound { location });
}

#[tokio::test]
async fn test_server_error_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let err = transport
        .fetch(&format!("{}/grid.xml", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_invalid_url_is_reported() {
    let transport = HttpTransport::new().unwrap();
    let err = transport.fetch("http://").await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidLocation { .. }));
}
