//! File-path configuration for the credential table and model artifact.
//!
//! These two paths are the crate's entire environment surface; everything
//! else is owned by the embedding process.

use std::path::PathBuf;

/// Environment variable naming the credential database location.
pub const CREDENTIAL_DB_ENV: &str = "RENOGUARD_CREDENTIAL_DB";

/// Environment variable naming the model artifact location.
pub const MODEL_ARTIFACT_ENV: &str = "RENOGUARD_MODEL_ARTIFACT";

const DEFAULT_CREDENTIAL_DB: &str = "data/credentials.db";
const DEFAULT_MODEL_ARTIFACT: &str = "data/risk_model.json";

/// Locations of the two durable artifacts the core depends on.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Credential table (SQLite database file).
    pub credential_db: PathBuf,

    /// Serialized classifier, loaded read-only at startup.
    pub model_artifact: PathBuf,
}

impl AppConfig {
    /// Build a configuration from explicit paths.
    #[must_use]
    pub fn new(credential_db: impl Into<PathBuf>, model_artifact: impl Into<PathBuf>) -> Self {
        Self {
            credential_db: credential_db.into(),
            model_artifact: model_artifact.into(),
        }
    }

    /// Build a configuration from the environment, falling back to the
    /// defaults under `data/`.
    #[must_use]
    pub fn from_env() -> Self {
        let credential_db = std::env::var(CREDENTIAL_DB_ENV)
            .unwrap_or_else(|_| DEFAULT_CREDENTIAL_DB.to_string());
        let model_artifact = std::env::var(MODEL_ARTIFACT_ENV)
            .unwrap_or_else(|_| DEFAULT_MODEL_ARTIFACT.to_string());
        Self::new(credential_db, model_artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths() {
        let config = AppConfig::new("/tmp/users.db", "/tmp/model.json");
        assert_eq!(config.credential_db, PathBuf::from("/tmp/users.db"));
        assert_eq!(config.model_artifact, PathBuf::from("/tmp/model.json"));
    }

    #[test]
    fn env_overrides_and_defaults() {
        std::env::set_var(CREDENTIAL_DB_ENV, "/var/lib/renoguard/users.db");
        std::env::remove_var(MODEL_ARTIFACT_ENV);

        let config = AppConfig::from_env();
        assert_eq!(
            config.credential_db,
            PathBuf::from("/var/lib/renoguard/users.db")
        );
        assert_eq!(config.model_artifact, PathBuf::from(DEFAULT_MODEL_ARTIFACT));

        std::env::remove_var(CREDENTIAL_DB_ENV);
    }
}
