//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external systems:
//! - `sqlite`: SQLite for the durable credential table
//! - `logistic`: logistic-regression risk classifier (artifact + fallback)

pub mod logistic;
pub mod sqlite;

// Re-export the credential error for lib.rs
pub use sqlite::CredentialError;
