//! Prediction service: feature encoding, risk inference, decision policy.
//!
//! Orchestrates the feature encoder and the risk classifier. Encoding
//! failures block inference; a placeholder prediction is never produced.

use std::sync::Arc;

use crate::domain::{Assessment, PatientRecord};
use crate::ports::{ModelSource, RiskClassifier};
use crate::RenoguardError;

/// Service for assessing patient records.
///
/// The classifier is loaded once and shared read-only for the lifetime of
/// the process.
pub struct PredictionService<C: RiskClassifier> {
    classifier: Arc<C>,
}

impl<C: RiskClassifier> PredictionService<C> {
    /// Create a new prediction service.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Run one assessment.
    ///
    /// Pipeline:
    /// 1. Encode the record into the fixed-order feature vector
    /// 2. Classify
    /// 3. Apply the decision-boundary policy (label 0 is high risk)
    ///
    /// # Errors
    /// Returns error if the record violates a clinical bound or inference
    /// fails.
    pub fn assess(&self, record: &PatientRecord) -> Result<Assessment, RenoguardError> {
        tracing::debug!("Encoding patient record...");
        let features = record.encode()?;

        tracing::debug!("Running risk inference...");
        let prediction = self.classifier.predict(&features)?;

        let assessment = Assessment::new(record.name.clone(), prediction);

        // Patient name stays out of the logs.
        tracing::info!(
            "Assessment complete: category={}, probability_of_high_risk={:.4}",
            assessment.risk_category,
            assessment.probability_of_high_risk
        );

        Ok(assessment)
    }

    /// Provenance of the active model, for operator surfaces.
    #[must_use]
    pub fn model_source(&self) -> &ModelSource {
        self.classifier.source()
    }
}
