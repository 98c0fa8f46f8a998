//! Error types for the HAL client.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`].
//! Relation lookup failures carry the missing relation and the relations that
//! were available; HTTP status failures carry the request, the status and the
//! best-effort response body.
//!
//! ```rust,ignore
//! match client.follow(Follow::new(CustomRel::new("orders")?)).await {
//!     Ok(orders) => println!("{orders}"),
//!     Err(err) if err.kind() == ErrorKind::RelationNotFound => {
//!         eprintln!("try one of: {:?}", err.available_relations());
//!     }
//!     Err(err) if err.kind().is_http_status() => {
//!         eprintln!("{} -> {:?}", err.status().unwrap_or_default(), err.response_body());
//!     }
//!     Err(err) => return Err(err),
//! }
//! ```

mod hapi_error;
mod kind;

pub use hapi_error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
