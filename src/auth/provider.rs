//! The authentication method trait.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::client::HapiClient;
use crate::transport::HttpRequest;
use crate::Error;

/// A type alias for the boxed future returned by authentication methods.
pub type AuthorizeFuture<'a> = BoxFuture<'a, Result<(), Error>>;

/// Adds credentials to outgoing requests.
///
/// The client calls [`authorize`](AuthenticationMethod::authorize) before
/// every dispatch, and once more when a response comes back `401
/// Unauthorized`. Implementations should leave a request untouched when it
/// already carries credentials, so callers can override them per request.
///
/// The client is passed in so a method can call the API itself, typically to
/// obtain a token. Requests sent that way must carry their own
/// `Authorization` header, or authorization would recurse.
///
/// ## Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn AuthenticationMethod>`.
///
/// ## Example: Static API Key
///
/// ```rust
/// use hapi_client::auth::{AuthenticationMethod, AuthorizeFuture};
/// use hapi_client::transport::HttpRequest;
/// use hapi_client::HapiClient;
///
/// #[derive(Debug)]
/// struct ApiKey(String);
///
/// impl AuthenticationMethod for ApiKey {
///     fn authorize<'a>(
///         &'a self,
///         _client: &'a HapiClient,
///         request: &'a mut HttpRequest,
///     ) -> AuthorizeFuture<'a> {
///         Box::pin(async move {
///             if !request.headers.contains("X-Api-Key") {
///                 request.headers.add("X-Api-Key", self.0.clone());
///             }
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait AuthenticationMethod: Send + Sync {
    /// Adds credentials to `request`.
    ///
    /// # Errors
    ///
    /// Any error aborts the navigation call that triggered it.
    fn authorize<'a>(
        &'a self,
        client: &'a HapiClient,
        request: &'a mut HttpRequest,
    ) -> AuthorizeFuture<'a>;

    /// Called when `rejected` came back `401 Unauthorized`, before the
    /// request is authorized again and retried once.
    ///
    /// The default implementation does nothing. Methods caching credentials
    /// should drop the ones `rejected` carried so the retry obtains fresh
    /// ones.
    fn invalidate<'a>(&'a self, rejected: &'a HttpRequest) -> AuthorizeFuture<'a> {
        let _ = rejected;
        Box::pin(async { Ok(()) })
    }
}

impl<T: AuthenticationMethod + ?Sized> AuthenticationMethod for Arc<T> {
    fn authorize<'a>(
        &'a self,
        client: &'a HapiClient,
        request: &'a mut HttpRequest,
    ) -> AuthorizeFuture<'a> {
        (**self).authorize(client, request)
    }

    fn invalidate<'a>(&'a self, rejected: &'a HttpRequest) -> AuthorizeFuture<'a> {
        (**self).invalidate(rejected)
    }
}

impl<T: AuthenticationMethod + ?Sized> AuthenticationMethod for Box<T> {
    fn authorize<'a>(
        &'a self,
        client: &'a HapiClient,
        request: &'a mut HttpRequest,
    ) -> AuthorizeFuture<'a> {
        (**self).authorize(client, request)
    }

    fn invalidate<'a>(&'a self, rejected: &'a HttpRequest) -> AuthorizeFuture<'a> {
        (**self).invalidate(rejected)
    }
}
