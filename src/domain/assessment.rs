//! Risk assessment result types.
//!
//! Represents the output of the binary renal-risk classifier and the
//! decision-boundary policy that interprets it.

use serde::{Deserialize, Serialize};

/// Risk classification surfaced to the clinician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Disease indicators dominate; follow-up required
    HighRisk,
    /// No significant disease indicators
    LowRisk,
}

impl RiskCategory {
    /// Map a model label to a risk category.
    ///
    /// Label 0 is the positive (disease) class in the model's training
    /// convention. This polarity is a fixed contract of the supplied
    /// artifact, not a numeric coincidence.
    #[must_use]
    pub fn from_label(label: u8) -> Self {
        if label == 0 {
            Self::HighRisk
        } else {
            Self::LowRisk
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::HighRisk => "High risk - Nephrology consultation advised",
            Self::LowRisk => "Low risk - No significant indicators",
        }
    }

    /// Get the associated color for UI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::HighRisk => (244, 63, 94), // Rose (#F43F5E)
            Self::LowRisk => (16, 185, 129), // Emerald (#10B981)
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighRisk => write!(f, "HIGH RISK"),
            Self::LowRisk => write!(f, "LOW RISK"),
        }
    }
}

/// Raw output of the risk model (before interpretation).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Prediction {
    /// Binary class label (0 = disease present, 1 = disease absent)
    pub label: u8,

    /// Class probabilities `[p0, p1]`, summing to 1
    pub probabilities: [f64; 2],
}

impl Prediction {
    /// Build a prediction from the probability of class 1.
    ///
    /// The label is the argmax of the class probabilities.
    #[must_use]
    pub fn new(p_class_one: f64) -> Self {
        let probabilities = [1.0 - p_class_one, p_class_one];
        let label = u8::from(probabilities[1] >= probabilities[0]);
        Self {
            label,
            probabilities,
        }
    }

    /// Probability of the positive (disease) class.
    #[must_use]
    pub fn high_risk_probability(&self) -> f64 {
        self.probabilities[0]
    }
}

/// Completed assessment for one patient record.
///
/// Transient: returned to the boundary for rendering, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub patient_name: String,

    /// Risk classification per the decision-boundary policy
    pub risk_category: RiskCategory,

    /// Probability of the high-risk class (0.0 to 1.0)
    pub probability_of_high_risk: f64,

    /// Timestamp of the assessment
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Interpret a model prediction for the named patient.
    #[must_use]
    pub fn new(patient_name: impl Into<String>, prediction: Prediction) -> Self {
        Self {
            patient_name: patient_name.into(),
            risk_category: RiskCategory::from_label(prediction.label),
            probability_of_high_risk: prediction.high_risk_probability(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Probability of the high-risk class as a percentage string with two
    /// decimals, for boundary rendering.
    #[must_use]
    pub fn probability_percent(&self) -> String {
        format!("{:.2}", self.probability_of_high_risk * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_polarity_is_fixed() {
        assert_eq!(RiskCategory::from_label(0), RiskCategory::HighRisk);
        assert_eq!(RiskCategory::from_label(1), RiskCategory::LowRisk);
    }

    #[test]
    fn probabilities_sum_to_one_and_label_is_argmax() {
        for &p in &[0.0, 0.2, 0.5, 0.73, 1.0] {
            let prediction = Prediction::new(p);
            let [p0, p1] = prediction.probabilities;
            assert!((p0 + p1 - 1.0).abs() < 1e-6);

            let argmax = u8::from(p1 >= p0);
            assert_eq!(prediction.label, argmax);
        }
    }

    #[test]
    fn assessment_applies_decision_policy() {
        let high = Assessment::new("A. Patient", Prediction::new(0.1));
        assert_eq!(high.risk_category, RiskCategory::HighRisk);
        assert!((high.probability_of_high_risk - 0.9).abs() < 1e-9);

        let low = Assessment::new("A. Patient", Prediction::new(0.8));
        assert_eq!(low.risk_category, RiskCategory::LowRisk);
        assert!((low.probability_of_high_risk - 0.2).abs() < 1e-9);
    }

    #[test]
    fn probability_formats_to_two_decimals() {
        let assessment = Assessment::new("A. Patient", Prediction::new(0.578766));
        assert_eq!(assessment.probability_percent(), "42.12");
    }

    #[test]
    fn category_surface() {
        assert_eq!(RiskCategory::HighRisk.to_string(), "HIGH RISK");
        assert_eq!(RiskCategory::HighRisk.color(), (244, 63, 94));
        assert_eq!(RiskCategory::LowRisk.color(), (16, 185, 129));
        assert!(RiskCategory::LowRisk.description().contains("Low risk"));
    }
}
