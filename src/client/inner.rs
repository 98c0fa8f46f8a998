//! Internal client implementation.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::auth::AuthenticationMethod;
use crate::error::Error;
use crate::request::{template, Request};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::Resource;

pub(crate) struct ClientInner {
    /// Prefix of every URL starting with `/`.
    pub api_url: Option<String>,

    /// Where the entry point is fetched from.
    pub entry_point_url: String,

    /// Profile advertised in the `Accept` header.
    pub profile: Option<String>,

    pub authentication: Option<Arc<dyn AuthenticationMethod>>,

    pub transport: Arc<dyn HttpTransport>,

    /// The entry point, fetched at most once.
    pub entry_point: OnceCell<Resource>,
}

impl ClientInner {
    /// The `Accept` header value.
    pub fn accept(&self) -> String {
        match self.profile.as_deref() {
            Some(profile) => format!("application/hal+json; profile=\"{profile}\""),
            None => "application/json".to_string(),
        }
    }

    /// Resolves the URL of `request`: API URL prefix, then template expansion.
    fn resolve_url(&self, request: &Request) -> Result<String, Error> {
        let url = request.url();
        if url.is_empty() {
            return Err(Error::invalid_request("the request URL is mandatory"));
        }

        let mut resolved = if url.starts_with('/') {
            let api_url = self.api_url.as_deref().ok_or_else(|| {
                Error::invalid_request(format!("relative URL {url} needs an API URL to resolve against"))
            })?;
            format!("{api_url}{url}")
        } else {
            url.to_string()
        };

        if !request.url_variables().is_empty() {
            resolved = template::expand(&resolved, request.url_variables());
        }

        url::Url::parse(&resolved).map_err(|e| {
            Error::invalid_request(format!("invalid request URL {resolved}: {e}")).with_source(e)
        })?;

        Ok(resolved)
    }

    /// Builds the HTTP request for `request`.
    ///
    /// Headers are sent in this order: `Accept`, the caller's headers, then
    /// `Content-Type` unless the caller set one.
    pub fn build_request(&self, request: &Request) -> Result<HttpRequest, Error> {
        let mut http_request = HttpRequest::new(request.method(), self.resolve_url(request)?);
        http_request.headers.add("Accept", self.accept());
        http_request.headers.extend(request.headers());

        if let Some(body) = request.body().filter(|_| request.method().allows_body()) {
            http_request.body = Some(body.encode()?);
            if !http_request.headers.contains("Content-Type") {
                http_request.headers.add("Content-Type", body.content_type());
            }
        }

        Ok(http_request)
    }
}

/// Turns a response into a resource, or into the error matching its status.
pub(crate) fn classify(request: HttpRequest, response: HttpResponse) -> Result<Resource, Error> {
    if (200..300).contains(&response.status) {
        let body = response
            .body
            .ok_or_else(|| Error::unparsable("couldn't read the response body"))?;
        let text = std::str::from_utf8(&body).map_err(|e| {
            Error::unparsable(format!("the response body is not UTF-8: {e}")).with_source(e)
        })?;
        return Resource::from_json(text);
    }

    let body = response.text();
    Err(Error::http_status(request, response.status, response.reason, body))
}

impl std::fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner")
            .field("api_url", &self.api_url)
            .field("entry_point_url", &self.entry_point_url)
            .field("profile", &self.profile)
            .field("authenticated", &self.authentication.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use bytes::Bytes;
    use serde_json::json;
    use test_case::test_case;

    use super::*;
    use crate::error::ErrorKind;
    use crate::request::{MessageBody, Method};
    use crate::testing::MockTransport;

    fn inner(api_url: Option<&str>, profile: Option<&str>) -> ClientInner {
        ClientInner {
            api_url: api_url.map(str::to_string),
            entry_point_url: "/".to_string(),
            profile: profile.map(str::to_string),
            authentication: None,
            transport: Arc::new(MockTransport::new()),
            entry_point: OnceCell::new(),
        }
    }

    #[test_case("/orders", "https://api.example.com/orders" ; "relative")]
    #[test_case("https://other.example.com/x", "https://other.example.com/x" ; "absolute")]
    #[test_case("  /orders  ", "https://api.example.com/orders" ; "trimmed")]
    fn test_resolve_url(url: &str, expected: &str) {
        let inner = inner(Some("https://api.example.com"), None);
        assert_eq!(inner.build_request(&Request::new(url)).unwrap().url, expected);
    }

    #[test]
    fn test_url_variables_expanded_after_prefix() {
        let inner = inner(Some("https://api.example.com"), None);
        let request = Request::new("/orders/{id}{?page}").with_url_variable("id", "a/b");
        let http_request = inner.build_request(&request).unwrap();
        assert_eq!(http_request.url, "https://api.example.com/orders/a%2Fb{?page}");
    }

    #[test]
    fn test_template_untouched_without_variables() {
        let inner = inner(Some("https://api.example.com"), None);
        let http_request = inner.build_request(&Request::new("/orders{?page}")).unwrap();
        assert_eq!(http_request.url, "https://api.example.com/orders{?page}");
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "blank")]
    #[test_case("not a url" ; "unparsable")]
    fn test_invalid_urls(url: &str) {
        let inner = inner(Some("https://api.example.com"), None);
        let err = inner.build_request(&Request::new(url)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_relative_url_without_api_url() {
        let err = inner(None, None).build_request(&Request::new("/orders")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_accept_then_caller_headers() {
        let inner = inner(Some("https://api.example.com"), Some("https://api.example.com/alps/v1"));
        let request = Request::new("/").with_header("Accept", "text/plain").with_header("X-Id", "7");
        let http_request = inner.build_request(&request).unwrap();

        let headers: Vec<_> = http_request.headers.iter().collect();
        assert_eq!(
            headers,
            [
                ("Accept", "application/hal+json; profile=\"https://api.example.com/alps/v1\""),
                ("Accept", "text/plain"),
                ("X-Id", "7"),
            ]
        );
    }

    #[test]
    fn test_accept_without_profile() {
        assert_eq!(inner(None, None).accept(), "application/json");
    }

    #[test_case(Method::Post, true)]
    #[test_case(Method::Put, true)]
    #[test_case(Method::Patch, true)]
    #[test_case(Method::Get, false)]
    #[test_case(Method::Delete, false)]
    fn test_body_only_for_methods_that_allow_it(method: Method, sent: bool) {
        let inner = inner(Some("https://api.example.com"), None);
        let request = Request::new("/orders")
            .with_method(method)
            .with_body(MessageBody::Json(json!({ "a": 1 })));
        let http_request = inner.build_request(&request).unwrap();

        assert_eq!(http_request.body.is_some(), sent);
        assert_eq!(http_request.headers.contains("Content-Type"), sent);
    }

    #[test]
    fn test_caller_content_type_wins() {
        let inner = inner(Some("https://api.example.com"), None);
        let request = Request::new("/orders")
            .with_method(Method::Post)
            .with_header("content-type", "application/hal+json")
            .with_body(MessageBody::Json(json!({})));
        let http_request = inner.build_request(&request).unwrap();

        let content_types: Vec<_> = http_request.headers.get_all("Content-Type").collect();
        assert_eq!(content_types, ["application/hal+json"]);
    }

    fn request() -> HttpRequest {
        HttpRequest::new(Method::Get, "https://api.example.com/")
    }

    #[test]
    fn test_classify_success() {
        let response = HttpResponse::new(201).with_body(r#"{"id":1}"#);
        let resource = classify(request(), response).unwrap();
        assert_eq!(resource.state()["id"], 1);
    }

    #[test]
    fn test_classify_success_empty_body() {
        let resource = classify(request(), HttpResponse::new(204)).unwrap();
        assert_eq!(resource, Resource::default());
    }

    #[test]
    fn test_classify_success_unreadable_body() {
        let mut response = HttpResponse::new(200);
        response.body = None;
        let err = classify(request(), response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnparsableDocument);

        let response = HttpResponse::new(200).with_body(Bytes::from_static(&[0xc3, 0x28]));
        let err = classify(request(), response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnparsableDocument);
    }

    #[test_case(301, ErrorKind::Redirection)]
    #[test_case(304, ErrorKind::Redirection)]
    #[test_case(400, ErrorKind::ClientError)]
    #[test_case(404, ErrorKind::ClientError)]
    #[test_case(500, ErrorKind::ServerError)]
    #[test_case(503, ErrorKind::ServerError)]
    #[test_case(100, ErrorKind::HttpFailure)]
    #[test_case(600, ErrorKind::HttpFailure)]
    fn test_classify_failures(status: u16, kind: ErrorKind) {
        let response = HttpResponse::new(status).with_body(r#"{"message":"nope"}"#);
        let err = classify(request(), response).unwrap_err();

        assert_eq!(err.kind(), kind);
        assert_eq!(err.status(), Some(status));
        assert_eq!(err.response_body(), Some(r#"{"message":"nope"}"#));
        assert_eq!(err.request().unwrap().url, "https://api.example.com/");
    }

    #[test]
    fn test_classify_failure_unreadable_body_is_absent() {
        let response = HttpResponse::new(502).with_body(Bytes::from_static(&[0xff]));
        let err = classify(request(), response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert!(err.response_body().is_none());
    }
}
