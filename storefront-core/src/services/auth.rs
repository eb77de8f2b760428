//! Auth service - mock login against a configured credential pair
//!
//! There is no identity provider. `MockAuthenticator` sleeps for a
//! configurable round trip, compares the credentials, and mints a token.

use std::time::Duration;

use crate::config::{Config, Credentials};
use crate::domain::result::Result;
use crate::domain::User;
use crate::services::session::SessionStore;
use crate::services::token;

/// User id handed out to the demo account
pub const DEMO_USER_ID: u64 = 1;

/// Simulated remote login
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    credentials: Credentials,
    token_ttl: Duration,
    delay: Duration,
}

impl MockAuthenticator {
    pub fn new(credentials: Credentials, token_ttl: Duration, delay: Duration) -> Self {
        Self {
            credentials,
            token_ttl,
            delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.credentials.clone(), config.token_ttl, config.login_delay)
    }

    /// Resolve to a user on an exact credential match, `None` otherwise
    ///
    /// Always waits for the configured delay first, whatever the outcome.
    pub async fn login(&self, username: &str, password: &str) -> Option<User> {
        tokio::time::sleep(self.delay).await;

        if username != self.credentials.username || password != self.credentials.password {
            return None;
        }

        let token = token::encode(username, DEMO_USER_ID, self.token_ttl);
        Some(User::new(DEMO_USER_ID, username, token))
    }
}

/// Login/logout flow: authenticator plus the persisted session
#[derive(Clone)]
pub struct AuthService {
    authenticator: MockAuthenticator,
    session: SessionStore,
}

impl AuthService {
    pub fn new(authenticator: MockAuthenticator, session: SessionStore) -> Self {
        Self {
            authenticator,
            session,
        }
    }

    /// Log in and persist the session token on success
    ///
    /// Wrong credentials are `Ok(None)`. Only a storage failure is an error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.authenticator.login(username, password).await else {
            tracing::info!(username, "login rejected");
            return Ok(None);
        };

        self.session.save(&user.token)?;
        tracing::info!(username, "logged in");
        Ok(Some(user))
    }

    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }

    /// The user restored from a previous run, if the token is still valid
    pub fn restore(&self) -> Option<User> {
        self.session.current_user()
    }
}
