//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (storage, the classifier).

mod classifier;
mod credential_store;

pub use classifier::{ModelError, ModelSource, RiskClassifier};
pub use credential_store::CredentialStore;
