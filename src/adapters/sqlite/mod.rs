//! SQLite adapter: Implementation of CredentialStore.
//!
//! Provides durable persistence for the username/password-hash table.
//!
//! # Security
//!
//! Passwords are stored only as salted Argon2id PHC strings
//! (`domain::password`); the plaintext never touches the database.
//!
//! # Mutex Behavior
//!
//! Database connection is protected by `Mutex`. A poisoned mutex (from panic
//! in another thread) will cause panic. This fail-fast behavior is intentional
//! for data integrity in healthcare applications.
//!
//! # Concurrency
//!
//! The mutex plus the `PRIMARY KEY` constraint serialize registration, so
//! two concurrent signups of the same username cannot both succeed.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::domain::password::{self, PasswordError};
use crate::ports::CredentialStore;

/// Error type for credential store operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Username already exists")]
    AlreadyExists,

    #[error("Credential table corrupt: {0}")]
    Corrupt(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

impl From<PasswordError> for CredentialError {
    fn from(e: PasswordError) -> Self {
        match e {
            PasswordError::Hash(msg) => Self::Hash(msg),
            PasswordError::MalformedHash(msg) => Self::Corrupt(msg),
        }
    }
}

/// SQLite credential store adapter.
pub struct SqliteCredentialStore {
    conn: Mutex<Connection>,
}

impl SqliteCredentialStore {
    /// Open the credential store at the given database path.
    ///
    /// A missing file is the empty store and is created on open. An
    /// existing file that is not a readable database is an error; stored
    /// credentials are never silently discarded.
    ///
    /// # Errors
    /// Returns error if the database cannot be opened or initialized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CredentialError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        tracing::info!("Opened credential store");
        Ok(store)
    }

    /// Create an in-memory credential store (for testing).
    ///
    /// # Errors
    /// Returns error if the database cannot be created.
    pub fn in_memory() -> Result<Self, CredentialError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    ///
    /// Usernames are matched with SQLite's default BINARY collation, so
    /// the uniqueness constraint is case-sensitive.
    fn init_schema(&self) -> Result<(), CredentialError> {
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }
}

impl CredentialStore for SqliteCredentialStore {
    type Error = CredentialError;

    fn register(&self, username: &str, password: &str) -> Result<(), Self::Error> {
        let hash = password::hash_password(password)?;
        let now = chrono::Utc::now().to_rfc3339();

        let conn = self.conn.lock().expect("Lock failed");
        let result = conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![username, hash, now],
        );

        match result {
            Ok(_) => {
                tracing::info!("Registered new credential record");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(CredentialError::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn verify(&self, username: &str, password: &str) -> Result<bool, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let result = conn.query_row(
            "SELECT password_hash FROM users WHERE username = ?1",
            params![username],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(hash) => {
                drop(conn);
                Ok(password::verify_password(password, &hash)?)
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn user_count(&self) -> Result<usize, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}
