//! Testing utilities.
//!
//! - [`MockTransport`]: scripted responses and recorded requests, no network
//! - [`ManualClock`]: a clock that only moves when told to, for token expiry
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::{TimeDelta, Utc};
//! use hapi_client::auth::{Oauth2BasicAuthentication, Oauth2Config};
//! use hapi_client::testing::{ManualClock, MockTransport};
//! use hapi_client::HapiClient;
//!
//! let clock = ManualClock::new(Utc::now());
//! let authentication = Oauth2BasicAuthentication::new(
//!     Oauth2Config::builder()
//!         .token_endpoint_url("/oauth/token")
//!         .userid("client")
//!         .password("secret")
//!         .build(),
//! )
//! .with_clock(clock.clone());
//!
//! let client = HapiClient::builder()
//!     .api_url("https://api.example.com")
//!     .transport(MockTransport::new())
//!     .authentication(authentication)
//!     .build()
//!     .unwrap();
//!
//! // Tokens issued from now on expire relative to the manual clock.
//! clock.advance(TimeDelta::hours(1));
//! ```

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

use crate::auth::Clock;
pub use crate::transport::mock::MockTransport;

/// A clock under test control.
///
/// Clones share the same time, so a test can keep one clone and hand the
/// other to the code under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Arc::new(Mutex::new(now)) }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
