//! Classifier port: trait for binary risk inference.
//!
//! This trait abstracts the model implementation from the prediction
//! service.

use std::path::PathBuf;

use crate::domain::{FeatureVector, Prediction};

/// Provenance of the active model.
///
/// Synthesized models are randomly trained stand-ins with no accuracy
/// expectations; operators and tests must always be able to tell them
/// apart from a real artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Deserialized from a persisted artifact.
    Loaded {
        path: PathBuf,
        /// SHA-256 digest of the artifact bytes
        fingerprint: String,
    },

    /// Fallback trained on a synthetic dataset.
    Synthesized { seed: u64 },
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded { path, fingerprint } => {
                write!(f, "loaded from {} ({})", path.display(), fingerprint)
            }
            Self::Synthesized { seed } => write!(f, "synthesized fallback (seed {seed})"),
        }
    }
}

/// Error type for model loading and inference.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model artifact unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model artifact malformed: {0}")]
    Malformed(String),

    #[error("Feature count mismatch: got {got}, expected {expected}")]
    Dimension { got: usize, expected: usize },

    #[error("Inference produced a non-finite probability")]
    NonFinite,
}

/// Trait for binary risk classification.
///
/// Implementations are immutable once constructed and safe to share across
/// evaluators without locking.
pub trait RiskClassifier: Send + Sync {
    /// Classify a feature vector.
    ///
    /// The returned probabilities sum to 1 and the label is their argmax.
    ///
    /// # Errors
    /// Returns error if inference fails; a prediction is never substituted
    /// with a default.
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError>;

    /// Where this model came from.
    fn source(&self) -> &ModelSource;
}
