//! Expirable access tokens and the clock used to check them.

use std::fmt;

use chrono::{DateTime, Utc};

/// An access token with its expiry instant.
#[derive(Clone, PartialEq, Eq)]
pub struct ExpirableToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl ExpirableToken {
    /// Creates a token.
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// The token value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// When the token stops being valid.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` if the token is non-empty and expires strictly after
    /// `instant`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::{TimeDelta, Utc};
    /// use hapi_client::auth::ExpirableToken;
    ///
    /// let now = Utc::now();
    /// let token = ExpirableToken::new("abc", now + TimeDelta::seconds(60));
    /// assert!(token.is_valid_until(now));
    /// assert!(!token.is_valid_until(token.expires_at()));
    /// ```
    pub fn is_valid_until(&self, instant: DateTime<Utc>) -> bool {
        !self.value.is_empty() && self.expires_at > instant
    }
}

impl fmt::Debug for ExpirableToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpirableToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// The time source for token expiry.
///
/// Issuance and validation read the same clock.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn test_validity_is_strict() {
        let now = Utc::now();
        let token = ExpirableToken::new("abc", now);
        assert!(!token.is_valid_until(now));
        assert!(token.is_valid_until(now - TimeDelta::milliseconds(1)));
    }

    #[test]
    fn test_empty_token_is_never_valid() {
        let now = Utc::now();
        let token = ExpirableToken::new("", now + TimeDelta::hours(1));
        assert!(!token.is_valid_until(now));
    }

    #[test]
    fn test_debug_redacts_value() {
        let token = ExpirableToken::new("super-secret", Utc::now());
        assert!(!format!("{token:?}").contains("super-secret"));
    }
}
