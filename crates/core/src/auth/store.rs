use thiserror::Error;

use super::User;

/// Errors for credential store operations.
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("User already exists: {0}")]
    AlreadyExists(String),
}

/// Credential storage: one row per user.
pub trait UserStore: Send + Sync {
    /// Look up a user by username.
    fn get(&self, username: &str) -> Result<Option<User>, UserStoreError>;

    /// Insert a new user. Fails if the username is taken.
    fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// Number of stored users.
    fn count(&self) -> Result<u64, UserStoreError>;
}
