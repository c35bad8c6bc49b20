//! Logistic adapter: Implementation of RiskClassifier.
//!
//! The model is a standardizing logistic regression: per-feature scaler,
//! linear combination, sigmoid. Artifacts are JSON and loaded read-only at
//! startup; once constructed the model is immutable and safe to share
//! without locking.
//!
//! # Fallback Synthesis
//!
//! When no artifact is present, a structurally-valid fallback is trained on
//! a synthetic two-class dataset (400 samples, 24 features) so the system
//! stays runnable. The fallback is randomly trained and carries no accuracy
//! expectations; its seed is recorded in [`ModelSource::Synthesized`] and
//! its construction logs a warning so the degraded state is never silent.
//! A present-but-malformed artifact is an error, not a fallback.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureVector, Prediction, FEATURE_COUNT, FEATURE_NAMES};
use crate::ports::{ModelError, ModelSource, RiskClassifier};

/// Supported artifact format version.
const ARTIFACT_VERSION: u32 = 1;

/// Samples in the synthetic fallback dataset (200 per class).
const SYNTH_SAMPLES: usize = 400;

/// Separation between the synthetic class centroids along the discriminant
/// direction, in units of the per-axis standard deviation.
const CLASS_SEPARATION: f64 = 3.0;

/// Batch gradient-descent epochs for fallback training.
const TRAIN_EPOCHS: usize = 300;

/// Gradient-descent learning rate.
const LEARNING_RATE: f64 = 0.5;

/// Serialized classifier parameters.
///
/// The feature names are stored alongside the coefficients so an artifact
/// trained against a different encoding order is rejected at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    pub feature_names: Vec<String>,
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl ModelArtifact {
    fn validate(&self) -> Result<(), ModelError> {
        if self.version != ARTIFACT_VERSION {
            return Err(ModelError::Malformed(format!(
                "Unsupported artifact version: {}",
                self.version
            )));
        }

        for len in [
            self.feature_names.len(),
            self.means.len(),
            self.stds.len(),
            self.weights.len(),
        ] {
            if len != FEATURE_COUNT {
                return Err(ModelError::Dimension {
                    got: len,
                    expected: FEATURE_COUNT,
                });
            }
        }

        for (expected, actual) in FEATURE_NAMES.iter().zip(self.feature_names.iter()) {
            if actual.as_str() != *expected {
                return Err(ModelError::Malformed(format!(
                    "Artifact feature order mismatch: expected {expected}, got {actual}"
                )));
            }
        }

        let finite = self
            .means
            .iter()
            .chain(self.stds.iter())
            .chain(self.weights.iter())
            .chain(std::iter::once(&self.intercept))
            .all(|x| x.is_finite());
        if !finite {
            return Err(ModelError::Malformed(
                "Artifact contains non-finite parameters".into(),
            ));
        }

        if self.stds.iter().any(|&s| s <= 0.0) {
            return Err(ModelError::Malformed(
                "Artifact scaler stds must be strictly positive".into(),
            ));
        }

        Ok(())
    }
}

/// Standardizing logistic-regression classifier.
#[derive(Debug)]
pub struct LogisticModel {
    means: [f64; FEATURE_COUNT],
    stds: [f64; FEATURE_COUNT],
    weights: [f64; FEATURE_COUNT],
    intercept: f64,
    source: ModelSource,
}

impl LogisticModel {
    /// Load a persisted artifact.
    ///
    /// The artifact is validated (version, dimensionality, feature order,
    /// finite parameters) and its SHA-256 fingerprint is logged.
    ///
    /// # Errors
    /// Returns error if the file is unreadable or the artifact malformed.
    pub fn from_artifact(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path)?;
        let artifact: ModelArtifact =
            serde_json::from_slice(&bytes).map_err(|e| ModelError::Malformed(e.to_string()))?;
        artifact.validate()?;

        let fingerprint = sha256_hex(&bytes);
        tracing::info!(
            "Loaded risk model from {} (fingerprint: {})",
            path.display(),
            fingerprint
        );

        Ok(Self::from_parts(
            &artifact,
            ModelSource::Loaded {
                path: path.to_path_buf(),
                fingerprint,
            },
        ))
    }

    /// Load the artifact at `path`, or synthesize a fallback if the file
    /// does not exist.
    ///
    /// Only a missing file triggers synthesis; an unreadable or malformed
    /// artifact is an error, so degraded accuracy is never silent.
    ///
    /// # Errors
    /// Returns error if a present artifact cannot be loaded.
    pub fn load_or_synthesize(path: &Path) -> Result<Self, ModelError> {
        if path.exists() {
            return Self::from_artifact(path);
        }

        let seed = ChaCha20Rng::from_entropy().gen::<u64>();
        tracing::warn!(
            "No model artifact at {}; synthesizing randomly-trained fallback (seed: {})",
            path.display(),
            seed
        );
        Ok(Self::synthesize(seed))
    }

    /// Train a fallback classifier on a synthetic two-class dataset.
    ///
    /// Deterministic for a given seed.
    #[must_use]
    pub fn synthesize(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let (samples, labels) = synth_dataset(&mut rng);

        // Per-feature scaler fitted on the synthetic data.
        let n = samples.len() as f64;
        let mut means = [0.0; FEATURE_COUNT];
        for sample in &samples {
            for (m, x) in means.iter_mut().zip(sample.iter()) {
                *m += x / n;
            }
        }
        let mut stds = [0.0; FEATURE_COUNT];
        for sample in &samples {
            for ((s, m), x) in stds.iter_mut().zip(means.iter()).zip(sample.iter()) {
                *s += (x - m) * (x - m) / n;
            }
        }
        for s in &mut stds {
            *s = s.sqrt().max(1e-6);
        }

        let standardized: Vec<[f64; FEATURE_COUNT]> = samples
            .iter()
            .map(|sample| {
                let mut z = [0.0; FEATURE_COUNT];
                for i in 0..FEATURE_COUNT {
                    z[i] = (sample[i] - means[i]) / stds[i];
                }
                z
            })
            .collect();

        // Batch gradient descent on the logistic loss.
        let mut weights = [0.0; FEATURE_COUNT];
        let mut intercept = 0.0;
        for _ in 0..TRAIN_EPOCHS {
            let mut grad_w = [0.0; FEATURE_COUNT];
            let mut grad_b = 0.0;
            for (x, &y) in standardized.iter().zip(labels.iter()) {
                let mut z = intercept;
                for i in 0..FEATURE_COUNT {
                    z += weights[i] * x[i];
                }
                let residual = sigmoid(z) - f64::from(y);
                for i in 0..FEATURE_COUNT {
                    grad_w[i] += residual * x[i];
                }
                grad_b += residual;
            }
            for i in 0..FEATURE_COUNT {
                weights[i] -= LEARNING_RATE * grad_w[i] / n;
            }
            intercept -= LEARNING_RATE * grad_b / n;
        }

        Self {
            means,
            stds,
            weights,
            intercept,
            source: ModelSource::Synthesized { seed },
        }
    }

    /// Export the model parameters as an artifact.
    #[must_use]
    pub fn to_artifact(&self) -> ModelArtifact {
        ModelArtifact {
            version: ARTIFACT_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
            means: self.means.to_vec(),
            stds: self.stds.to_vec(),
            weights: self.weights.to_vec(),
            intercept: self.intercept,
        }
    }

    fn from_parts(artifact: &ModelArtifact, source: ModelSource) -> Self {
        let mut means = [0.0; FEATURE_COUNT];
        let mut stds = [0.0; FEATURE_COUNT];
        let mut weights = [0.0; FEATURE_COUNT];
        means.copy_from_slice(&artifact.means);
        stds.copy_from_slice(&artifact.stds);
        weights.copy_from_slice(&artifact.weights);

        Self {
            means,
            stds,
            weights,
            intercept: artifact.intercept,
            source,
        }
    }
}

impl RiskClassifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        let x = features.as_slice();

        let mut z = self.intercept;
        for i in 0..FEATURE_COUNT {
            z += self.weights[i] * (x[i] - self.means[i]) / self.stds[i];
        }

        let p_class_one = sigmoid(z);
        if !p_class_one.is_finite() {
            return Err(ModelError::NonFinite);
        }

        Ok(Prediction::new(p_class_one))
    }

    fn source(&self) -> &ModelSource {
        &self.source
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Draw a standard normal via Box-Muller.
fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Generate a balanced two-class Gaussian dataset.
///
/// Class centroids sit at `±CLASS_SEPARATION / 2` along a random unit
/// direction, with unit-variance noise on every axis.
fn synth_dataset(rng: &mut ChaCha20Rng) -> (Vec<[f64; FEATURE_COUNT]>, Vec<u8>) {
    let mut direction = [0.0; FEATURE_COUNT];
    for d in &mut direction {
        *d = standard_normal(rng);
    }
    let norm = direction.iter().map(|d| d * d).sum::<f64>().sqrt().max(1e-12);
    for d in &mut direction {
        *d /= norm;
    }

    let mut samples = Vec::with_capacity(SYNTH_SAMPLES);
    let mut labels = Vec::with_capacity(SYNTH_SAMPLES);
    for i in 0..SYNTH_SAMPLES {
        let label = (i % 2) as u8;
        let shift = if label == 0 {
            -CLASS_SEPARATION / 2.0
        } else {
            CLASS_SEPARATION / 2.0
        };

        let mut sample = [0.0; FEATURE_COUNT];
        for (x, d) in sample.iter_mut().zip(direction.iter()) {
            *x = shift * d + standard_normal(rng);
        }
        samples.push(sample);
        labels.push(label);
    }

    (samples, labels)
}
