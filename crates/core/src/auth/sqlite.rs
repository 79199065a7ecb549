//! SQLite-backed credential store implementation.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use super::{User, UserStore, UserStoreError};

/// SQLite-backed user store.
pub struct SqliteUserStore {
    conn: Mutex<Connection>,
}

impl SqliteUserStore {
    /// Create a new SQLite user store, creating the database file and
    /// tables if needed.
    pub fn new(path: &Path) -> Result<Self, UserStoreError> {
        let conn = Connection::open(path).map_err(|e| UserStoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite user store (useful for testing).
    pub fn in_memory() -> Result<Self, UserStoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| UserStoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), UserStoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                password_hash TEXT NOT NULL,
                is_admin INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )
        .map_err(|e| UserStoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        Ok(User {
            username: row.get(0)?,
            password_hash: row.get(1)?,
            is_admin: row.get::<_, i64>(2)? != 0,
        })
    }
}

impl UserStore for SqliteUserStore {
    fn get(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let conn = self.conn.lock().expect("user store mutex poisoned");
        conn.query_row(
            "SELECT username, password_hash, is_admin FROM users WHERE username = ?1",
            params![username],
            Self::row_to_user,
        )
        .optional()
        .map_err(|e| UserStoreError::Database(e.to_string()))
    }

    fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let conn = self.conn.lock().expect("user store mutex poisoned");
        let result = conn.execute(
            "INSERT INTO users (username, password_hash, is_admin) VALUES (?1, ?2, ?3)",
            params![user.username, user.password_hash, user.is_admin as i64],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(UserStoreError::AlreadyExists(user.username.clone()))
            }
            Err(e) => Err(UserStoreError::Database(e.to_string())),
        }
    }

    fn count(&self) -> Result<u64, UserStoreError> {
        let conn = self.conn.lock().expect("user store mutex poisoned");
        conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get::<_, i64>(0))
            .map(|n| n as u64)
            .map_err(|e| UserStoreError::Database(e.to_string()))
    }
}
