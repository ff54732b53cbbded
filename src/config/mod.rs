//! Configuration types for the SharePoint REST client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: holds the settings shared by every request a client makes
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`AccessToken`]: a validated bearer token with masked debug output
//! - [`SiteUrl`]: a validated absolute site URL
//!
//! # Example
//!
//! ```rust
//! use sharepoint_rest::{AccessToken, ClientConfig};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .access_token(AccessToken::new("token").unwrap())
//!     .tries(3)
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.tries(), 3);
//! ```

mod newtypes;

pub use newtypes::{AccessToken, SiteUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for a [`RestClient`](crate::RestClient).
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    access_token: AccessToken,
    user_agent_prefix: Option<String>,
    tries: u32,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the User-Agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times a request is attempted on 429/503 responses.
    ///
    /// The default of `1` disables retries.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bearer token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets a prefix prepended to the User-Agent header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the number of attempts for throttled requests.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no access token was set,
    /// or [`ConfigError::InvalidTries`] if `tries` is zero.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        Ok(ClientConfig {
            access_token,
            user_agent_prefix: self.user_agent_prefix,
            tries,
            timeout: self.timeout,
        })
    }
}
