use serde::{Deserialize, Serialize};

/// A row in the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// bcrypt hash, never the plaintext password.
    pub password_hash: String,
    pub is_admin: bool,
}

/// Resolved identity of an authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub is_admin: bool,
}

/// Claims carried by issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Bound username.
    pub sub: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}
