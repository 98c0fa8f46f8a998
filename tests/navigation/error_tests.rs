//! Failure reporting over real HTTP.

use hapi_client::request::{Follow, Method, Request};
use hapi_client::{CustomRel, ErrorKind, HapiClient};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{client, mount_entry_point};

#[tokio::test]
async fn test_client_error_carries_request_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "code": 205, "message": "reference already used" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .send(Request::new("/orders").with_method(Method::Post))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ClientError);
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.reason(), Some("Unprocessable Entity"));
    assert_eq!(err.request().unwrap().url, format!("{}/orders", server.uri()));
    assert_eq!(err.response_resource().unwrap().state()["code"], 205);
}

#[tokio::test]
async fn test_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).entry_point().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(err.response_body(), Some("maintenance"));
    assert!(err.response_resource().is_none());
}

#[tokio::test]
async fn test_redirect_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/new"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).send(Request::new("/old")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Redirection);
    assert_eq!(err.status(), Some(302));
}

#[tokio::test]
async fn test_unparsable_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let err = client(&server).entry_point().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnparsableDocument);
}

#[tokio::test]
async fn test_missing_relation_lists_alternatives() {
    let server = MockServer::start().await;
    mount_entry_point(&server, 1).await;

    let err = client(&server)
        .follow(Follow::new(CustomRel::curie("acme", "invoices").unwrap()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RelationNotFound);
    assert_eq!(err.missing_relation().unwrap().name(), "acme:invoices");
    let mut available: Vec<_> = err.available_relations().iter().map(|rel| rel.name().to_string()).collect();
    available.sort();
    assert_eq!(available, ["acme:create-order", "acme:creditor", "acme:orders", "curies", "self"]);
}

#[tokio::test]
async fn test_connection_refused() {
    let client = HapiClient::builder()
        .api_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let err = client.entry_point().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Connection);
}
