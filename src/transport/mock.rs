//! Mock transport for testing.
//!
//! Responses are scripted per method and URL, and every request is recorded,
//! so tests can assert exactly what reached the network.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use serde_json::Value;

use super::traits::{HttpRequest, HttpResponse, HttpTransport, TransportFuture};
use crate::request::Method;
use crate::Error;

/// Mock transport for testing.
///
/// Each `(method, url)` route holds a queue of responses: they are returned
/// in order and the last one keeps being returned once the queue is down to
/// it. Requests to an unscripted route get an empty `404`.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use hapi_client::request::Method;
/// use hapi_client::testing::MockTransport;
/// use hapi_client::HapiClient;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), hapi_client::Error> {
/// let transport = Arc::new(MockTransport::new());
/// transport.respond_json(Method::Get, "https://api.example.com/", json!({ "name": "root" }));
///
/// let client = HapiClient::builder()
///     .api_url("https://api.example.com")
///     .transport(Arc::clone(&transport))
///     .build()?;
///
/// let root = client.entry_point().await?;
/// assert_eq!(root.state()["name"], "root");
/// assert_eq!(transport.request_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: RwLock<HashMap<(Method, String), VecDeque<HttpResponse>>>,
    requests: RwLock<Vec<HttpRequest>>,
    request_count: AtomicU64,
    latency: Option<Duration>,
    simulate_failure: RwLock<Option<Error>>,
}

impl MockTransport {
    /// Creates a mock transport with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every response by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queues a response for `method` and `url`.
    pub fn respond(&self, method: Method, url: impl Into<String>, response: HttpResponse) {
        self.routes
            .write()
            .entry((method, url.into()))
            .or_default()
            .push_back(response);
    }

    /// Queues a `200` HAL response for `method` and `url`.
    pub fn respond_json(&self, method: Method, url: impl Into<String>, document: Value) {
        self.respond(method, url, HttpResponse::new(200).with_json(&document));
    }

    /// Makes the next request fail with `error`, without recording a response.
    pub fn set_failure(&self, error: Error) {
        *self.simulate_failure.write() = Some(error);
    }

    /// Clears any simulated failure.
    pub fn clear_failure(&self) {
        *self.simulate_failure.write() = None;
    }

    /// Returns the number of requests received.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Returns every request received, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.read().clone()
    }

    /// Returns the requests received for `url`, in order.
    pub fn requests_to(&self, url: &str) -> Vec<HttpRequest> {
        self.requests
            .read()
            .iter()
            .filter(|request| request.url == url)
            .cloned()
            .collect()
    }

    fn next_response(&self, method: Method, url: &str) -> HttpResponse {
        let mut routes = self.routes.write();
        match routes.get_mut(&(method, url.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(not_found),
            Some(queue) => queue.front().cloned().unwrap_or_else(not_found),
            None => not_found(),
        }
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::new(404).with_reason("Not Found")
}

impl HttpTransport for MockTransport {
    fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            self.request_count.fetch_add(1, Ordering::SeqCst);
            self.requests.write().push(request.clone());

            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }

            let failure = self.simulate_failure.write().take();
            if let Some(error) = failure {
                return Err(error);
            }

            Ok(self.next_response(request.method, &request.url))
        })
    }
}
