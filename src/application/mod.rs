//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the two boundary operations: authentication and risk assessment.

mod auth;
mod prediction;

pub use auth::{AuthMode, AuthResult, AuthService, Session};
pub use prediction::PredictionService;
