//! The HAL navigation client.
//!
//! [`HapiClient`] sends [`Request`]s and [`Follow`]s and returns the
//! [`Resource`]s they lead to:
//!
//! - an explicit URL is requested as-is (relative URLs are resolved against the API URL)
//! - a follow first looks for an embedded resource under its relation and
//!   only goes to the network when there is none
//! - a `401 Unauthorized` is retried exactly once with fresh credentials
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hapi_client::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let client = HapiClient::builder()
//!     .api_url("https://api.example.com")
//!     .profile("https://api.example.com/alps/v1")
//!     .build()?;
//!
//! let rel = |name: &str| CustomRel::curie("acme", name);
//! let order = client
//!     .follow_chain([
//!         Follow::new(rel("search-orders")?).with_url_variable("reference", "ORD-1"),
//!         Follow::new(rel("get-creditor")?),
//!     ])
//!     .await?;
//! println!("{order}");
//! # Ok(())
//! # }
//! ```

mod builder;
mod inner;

use std::sync::Arc;

pub use builder::HapiClientBuilder;

use crate::error::ErrorKind;
use crate::request::{Follow, Request};
use crate::transport::HttpRequest;
use crate::types::{RegisteredRel, Resource};
use crate::Error;

/// The HAL navigation client.
///
/// ## Thread Safety
///
/// `HapiClient` is `Clone` and thread-safe. Clones share the connection
/// pool, the memoized entry point and the authentication state; separately
/// built clients share nothing. The client never spawns tasks: every call runs
/// in the caller's task.
#[derive(Clone)]
pub struct HapiClient {
    inner: Arc<inner::ClientInner>,
}

impl HapiClient {
    /// Creates a new client builder.
    pub fn builder() -> HapiClientBuilder {
        HapiClientBuilder::new()
    }

    /// The URL prefixed to every URL starting with `/`.
    pub fn api_url(&self) -> Option<&str> {
        self.inner.api_url.as_deref()
    }

    /// The URL the entry point is fetched from. Defaults to `/`.
    pub fn entry_point_url(&self) -> &str {
        &self.inner.entry_point_url
    }

    /// The profile sent in the `Accept` header, if any.
    pub fn profile(&self) -> Option<&str> {
        self.inner.profile.as_deref()
    }

    /// Sends a request and parses the response as a HAL resource.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidRequest`] for a blank or invalid URL.
    /// - [`ErrorKind::Redirection`], [`ErrorKind::ClientError`],
    ///   [`ErrorKind::ServerError`] or [`ErrorKind::HttpFailure`] for a
    ///   non-2xx response, carrying the request, status and body.
    /// - [`ErrorKind::UnparsableDocument`] when a 2xx body isn't JSON.
    /// - Transport errors ([`ErrorKind::Connection`], [`ErrorKind::Timeout`],
    ///   [`ErrorKind::Transport`]) as returned by the transport.
    /// - Any error of the authentication method.
    pub async fn send(&self, request: Request) -> Result<Resource, Error> {
        let http_request = self.inner.build_request(&request)?;
        self.dispatch(http_request).await
    }

    /// Follows `follow` from the entry point.
    ///
    /// See [`follow_from`](Self::follow_from).
    pub async fn follow(&self, follow: Follow) -> Result<Resource, Error> {
        let entry_point = self.entry_point().await?;
        self.follow_from(follow, &entry_point).await
    }

    /// Follows `follow` from `resource`.
    ///
    /// When `resource` embeds a single resource under the relation, that
    /// resource is returned without any request; it may be a partial
    /// representation. Otherwise the relation's link is requested with the
    /// follow's options.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::RelationNotFound`] when the relation is neither
    ///   embedded nor linked.
    /// - [`ErrorKind::RelationNotUnique`] when it holds a list of embedded
    ///   resources or links.
    /// - Any error of [`send`](Self::send).
    pub async fn follow_from(&self, follow: Follow, resource: &Resource) -> Result<Resource, Error> {
        match resource.embedded_resource(follow.rel()) {
            Ok(embedded) => {
                tracing::debug!(rel = %follow.rel(), "relation served from the embedded resources");
                return Ok(embedded.clone());
            },
            Err(e) if e.kind() == ErrorKind::RelationNotFound => {},
            Err(e) => return Err(e),
        }

        let href = resource.link(follow.rel())?.href().to_string();
        self.send(follow.into_request(&href)).await
    }

    /// Applies `follows` left to right, starting from the entry point.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::EmptyFollowChain`] when `follows` is empty, before the
    /// entry point is fetched. Otherwise the first error of any hop.
    pub async fn follow_chain(&self, follows: impl IntoIterator<Item = Follow>) -> Result<Resource, Error> {
        let follows: Vec<Follow> = follows.into_iter().collect();
        if follows.is_empty() {
            return Err(Error::empty_follow_chain());
        }
        let entry_point = self.entry_point().await?;
        self.follow_chain_from(follows, &entry_point).await
    }

    /// Applies `follows` left to right, starting from `resource`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::EmptyFollowChain`] when `follows` is empty. Otherwise the
    /// first error of any hop.
    pub async fn follow_chain_from(
        &self,
        follows: impl IntoIterator<Item = Follow>,
        resource: &Resource,
    ) -> Result<Resource, Error> {
        let mut follows = follows.into_iter();
        let first = follows.next().ok_or_else(Error::empty_follow_chain)?;

        let mut current = self.follow_from(first, resource).await?;
        for hop in follows {
            current = self.follow_from(hop, &current).await?;
        }
        Ok(current)
    }

    /// Returns the entry point resource.
    ///
    /// The entry point is fetched on first use and memoized for the lifetime
    /// of the client. Concurrent first calls share a single request; a failed
    /// fetch is not memoized.
    pub async fn entry_point(&self) -> Result<Resource, Error> {
        self.inner
            .entry_point
            .get_or_try_init(|| async {
                tracing::debug!(url = %self.inner.entry_point_url, "fetching the entry point");
                self.send(Request::new(&self.inner.entry_point_url)).await
            })
            .await
            .cloned()
    }

    /// Fetches `resource` again from its `self` link.
    ///
    /// Never fails: without a `self` link, or when the request fails, the
    /// given resource is returned unchanged.
    pub async fn refresh(&self, resource: &Resource) -> Resource {
        let href = match resource.link(RegisteredRel::SelfRel) {
            Ok(link) => link.href().to_string(),
            Err(e) => {
                tracing::debug!(error = %e, "resource not refreshed");
                return resource.clone();
            },
        };

        match self.send(Request::new(href)).await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                tracing::debug!(error = %e, "resource not refreshed");
                resource.clone()
            },
        }
    }

    /// Authorizes and sends `request`, retrying once on `401`.
    async fn dispatch(&self, request: HttpRequest) -> Result<Resource, Error> {
        let Some(authentication) = self.inner.authentication.as_ref() else {
            tracing::debug!(method = %request.method, url = %request.url, "sending request");
            let response = self.inner.transport.execute(request.clone()).await?;
            return inner::classify(request, response);
        };

        let mut authorized = request.clone();
        authentication.authorize(self, &mut authorized).await?;
        tracing::debug!(method = %authorized.method, url = %authorized.url, "sending request");
        let response = self.inner.transport.execute(authorized.clone()).await?;

        if response.status != 401 {
            return inner::classify(authorized, response);
        }

        tracing::info!(url = %authorized.url, "401 Unauthorized, authorizing again and retrying once");
        drop(response);
        authentication.invalidate(&authorized).await?;

        let mut retried = request;
        authentication.authorize(self, &mut retried).await?;
        let response = self.inner.transport.execute(retried.clone()).await?;
        inner::classify(retried, response)
    }
}

impl std::fmt::Debug for HapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HapiClient")
            .field("api_url", &self.inner.api_url)
            .field("entry_point_url", &self.inner.entry_point_url)
            .field("profile", &self.inner.profile)
            .finish_non_exhaustive()
    }
}
