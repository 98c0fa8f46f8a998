//! Integration tests for hapi-client.
//!
//! These tests drive the built-in HTTP transport against a local wiremock
//! server, so they exercise real HTTP: headers, bodies, status codes and
//! redirects as they go over the wire.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test navigation
//!
//! # With client logs
//! RUST_LOG=hapi_client=debug cargo test --test navigation -- --nocapture
//! ```

mod auth_tests;
mod common;
mod error_tests;
mod follow_tests;
