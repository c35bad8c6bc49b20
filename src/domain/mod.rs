//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external system access.
//! All types are serializable and implement strict validation.

mod assessment;
mod patient;
pub mod password;

pub use assessment::{Assessment, Prediction, RiskCategory};
pub use patient::{
    Appetite, CellMorphology, EncodeError, FeatureVector, Finding, Gender, PatientRecord,
    FEATURE_COUNT, FEATURE_NAMES, SPECIFIC_GRAVITY_LEVELS,
};
