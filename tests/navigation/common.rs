//! Common test harness for the navigation integration tests.

use hapi_client::auth::{Oauth2BasicAuthentication, Oauth2Config};
use hapi_client::HapiClient;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Profile advertised by the test clients.
pub const PROFILE: &str = "https://api.example.com/alps/v1";

/// Credentials used by the OAuth 2.0 test clients.
pub const USERID: &str = "democlient";
pub const PASSWORD: &str = "demosecret";

/// Installs a test log writer honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A client for `server`, without authentication.
pub fn client(server: &MockServer) -> HapiClient {
    init_tracing();
    HapiClient::builder()
        .api_url(server.uri())
        .profile(PROFILE)
        .build()
        .unwrap()
}

/// A client for `server` exchanging client credentials at `/oauth/token`.
pub fn oauth2_client(server: &MockServer) -> HapiClient {
    init_tracing();
    HapiClient::builder()
        .api_url(server.uri())
        .profile(PROFILE)
        .authentication(Oauth2BasicAuthentication::new(
            Oauth2Config::builder()
                .token_endpoint_url("/oauth/token")
                .userid(USERID)
                .password(PASSWORD)
                .build(),
        ))
        .build()
        .unwrap()
}

/// The entry point served at `/`.
pub fn entry_point() -> Value {
    json!({
        "_links": {
            "self": { "href": "/" },
            "curies": [{ "name": "acme", "href": "https://api.example.com/alps/{rel}", "templated": true }],
            "acme:orders": { "href": "/orders{?page,size}", "templated": true },
            "acme:creditor": { "href": "/creditors/1" },
            "acme:create-order": { "href": "/orders" }
        },
        "_embedded": {
            "acme:profile": { "name": "demo creditor" }
        }
    })
}

/// Mounts the entry point, expected to be fetched exactly `times` times.
pub async fn mount_entry_point(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry_point()))
        .expect(times)
        .mount(server)
        .await;
}
