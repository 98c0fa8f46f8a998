//! Configuration types for the built-in HTTP transport.
//!
//! - [`TlsConfig`]: trusted CAs and certificate verification
//! - [`PoolConfig`]: connection pooling

mod pool;
mod tls;

pub use pool::PoolConfig;
pub use tls::TlsConfig;
