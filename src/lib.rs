//! # Renoguard
//!
//! Clinician-facing chronic kidney disease risk assessment.
//!
//! This crate provides:
//! - A durable credential store with salted password hashing
//! - A session-based authentication gate
//! - Deterministic feature encoding of typed patient records
//! - A binary risk classifier with explicit artifact provenance
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (patient records, assessments, password hashing)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (SQLite, logistic classifier)
//! - `application`: Use cases orchestrating domain and ports
//!
//! The UI-rendering collaborator links this library and drives the two
//! boundary operations: [`AuthService::authenticate`] and
//! [`PredictionService::assess`].
//!
//! [`AuthService::authenticate`]: application::AuthService::authenticate
//! [`PredictionService::assess`]: application::PredictionService::assess

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{AuthMode, AuthResult, AuthService, PredictionService, Session};
pub use config::AppConfig;
pub use domain::{Assessment, PatientRecord, RiskCategory};
pub use ports::ModelSource;

/// Result type for Renoguard operations
pub type Result<T> = std::result::Result<T, RenoguardError>;

/// Main error type for Renoguard
#[derive(Debug, thiserror::Error)]
pub enum RenoguardError {
    #[error("Credential store failure: {0}")]
    Credential(#[from] adapters::CredentialError),

    #[error("Invalid patient record: {0}")]
    Encoding(#[from] domain::EncodeError),

    #[error("Risk model failure: {0}")]
    Model(#[from] ports::ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
