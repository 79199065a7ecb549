//! Credential verification and bearer token issuance.
//!
//! The auth gate is orthogonal to the catalog: it only guards the scrape
//! trigger and the token refresh endpoint. Token issue/verify is pure
//! computation; the user store serializes access internally.

mod sqlite;
mod store;
mod token;
mod types;

pub use sqlite::SqliteUserStore;
pub use store::{UserStore, UserStoreError};
pub use token::TokenService;
pub use types::{Claims, Identity, User};

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Deliberately covers both unknown user and wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Token missing, invalid or expired")]
    Unauthorized,

    #[error("Credential store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<UserStoreError> for AuthError {
    fn from(err: UserStoreError) -> Self {
        AuthError::Store(err.to_string())
    }
}

/// Verifies credentials and issues/validates bearer tokens.
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Token lifetime in seconds, for login responses.
    pub fn token_ttl_secs(&self) -> i64 {
        self.tokens.ttl().num_seconds()
    }

    /// Verify a password and issue a signed, time-limited token bound to
    /// the username.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .users
            .get(username)?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        self.tokens.issue(&user.username)
    }

    /// Verify signature and expiry, then resolve the bound user.
    pub fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.tokens.verify(token)?;
        let user = self.users.get(&claims.sub)?.ok_or(AuthError::Unauthorized)?;
        Ok(Identity {
            username: user.username,
            is_admin: user.is_admin,
        })
    }

    /// Exchange a currently valid token for a fresh one, same subject.
    pub fn refresh(&self, token: &str) -> Result<String, AuthError> {
        let identity = self.authenticate(token)?;
        self.tokens.issue(&identity.username)
    }
}

/// Hash a password and store a new user.
pub fn create_user(
    store: &dyn UserStore,
    username: &str,
    password: &str,
    is_admin: bool,
) -> Result<(), AuthError> {
    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AuthError::Configuration(e.to_string()))?;
    store.insert(&User {
        username: username.to_string(),
        password_hash,
        is_admin,
    })?;
    Ok(())
}

/// Create the bootstrap admin account if it does not exist yet.
/// Returns true when the account was created.
pub fn seed_bootstrap_admin(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<bool, AuthError> {
    if store.get(username)?.is_some() {
        return Ok(false);
    }

    create_user(store, username, password, true)?;
    info!(username, "bootstrap admin created");
    Ok(true)
}
