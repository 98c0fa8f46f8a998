//! OAuth 2.0 client credentials over real HTTP.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hapi_client::request::Request;
use hapi_client::ErrorKind;
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{entry_point, oauth2_client, PASSWORD, USERID};

fn token(value: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": value,
        "token_type": "bearer",
        "expires_in": 3600,
        "scope": "api"
    }))
}

fn basic_credentials() -> String {
    format!("Basic {}", BASE64.encode(format!("{USERID}:{PASSWORD}")))
}

#[tokio::test]
async fn test_token_exchanged_once_and_reused() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("Authorization", basic_credentials().as_str()))
        .and(header("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8"))
        .and(body_string("grant_type=client_credentials&scope=api"))
        .respond_with(token("t-1"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("Authorization", "Bearer t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry_point()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/creditors/1"))
        .and(header("Authorization", "Bearer t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "ACME" })))
        .expect(2)
        .mount(&server)
        .await;

    let client = oauth2_client(&server);
    client.entry_point().await.unwrap();
    client.send(Request::new("/creditors/1")).await.unwrap();
    client.send(Request::new("/creditors/1")).await.unwrap();
}

#[tokio::test]
async fn test_unauthorized_renews_token_and_retries_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(token("revoked"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(token("t-2"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/1"))
        .and(header("Authorization", "Bearer revoked"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/1"))
        .and(header("Authorization", "Bearer t-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reference": "ORD-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let order = oauth2_client(&server).send(Request::new("/orders/1")).await.unwrap();

    assert_eq!(order.state()["reference"], "ORD-1");
}

#[tokio::test]
async fn test_persistent_unauthorized_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(token("t-1"))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "nope" })))
        .expect(2)
        .mount(&server)
        .await;

    let err = oauth2_client(&server).send(Request::new("/orders/1")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ClientError);
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.response_resource().unwrap().state()["message"], "nope");
}

#[tokio::test]
async fn test_caller_credentials_skip_the_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(token("unused"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "Bearer personal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "me": true })))
        .expect(1)
        .mount(&server)
        .await;

    let me = oauth2_client(&server)
        .send(Request::new("/me").with_header("Authorization", "Bearer personal"))
        .await
        .unwrap();

    assert_eq!(me.state()["me"], true);
}

#[tokio::test]
async fn test_malformed_token_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token_type": "bearer" })))
        .mount(&server)
        .await;

    let err = oauth2_client(&server).entry_point().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedTokenResponse);
}
