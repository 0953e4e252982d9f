//! Persisted linear hiring model

use crate::error::{AnalyzerError, Result};
use crate::model::FeatureVector;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

const MODEL_MAGIC: [u8; 4] = *b"ATSM";
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Logistic regression over raw features: `p = sigmoid(coef · x + intercept)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiringModel {
    magic: [u8; 4],
    pub format_version: u32,
    /// Weights for match score, JD coverage and word count, in that order
    pub coefficients: [f64; 3],
    pub intercept: f64,
    /// Probability above which a candidate is recommended
    pub threshold: f64,
    pub metadata: ModelMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub seed: u64,
    pub n_samples: usize,
    pub test_accuracy: f64,
}

impl HiringModel {
    pub fn new(coefficients: [f64; 3], intercept: f64, metadata: ModelMetadata) -> Self {
        Self {
            magic: MODEL_MAGIC,
            format_version: MODEL_FORMAT_VERSION,
            coefficients,
            intercept,
            threshold: 0.5,
            metadata,
        }
    }

    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_array())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    pub fn probability(&self, features: &FeatureVector) -> f64 {
        sigmoid(self.decision_function(features))
    }

    /// 1 for hire, 0 for reject
    pub fn predict_class(&self, features: &FeatureVector) -> u8 {
        u8::from(self.probability(features) > self.threshold)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let model: HiringModel = bincode::deserialize(bytes)?;
        model.validate()?;
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_bytes()?)?;
        info!("Hiring model saved to {}", path.display());
        Ok(())
    }

    /// Read an artifact; any missing, unreadable or malformed file is `ModelUnavailable`
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AnalyzerError::ModelUnavailable(format!(
                "no model artifact at {} (run `ats-analyzer train` first)",
                path.display()
            )));
        }

        let bytes = std::fs::read(path).map_err(|e| {
            AnalyzerError::ModelUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;

        let model = Self::from_bytes(&bytes).map_err(|e| {
            AnalyzerError::ModelUnavailable(format!(
                "corrupt model artifact {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!(
            "Loaded hiring model v{} (seed {}, test accuracy {:.2}%)",
            model.format_version,
            model.metadata.seed,
            model.metadata.test_accuracy * 100.0
        );
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.magic != MODEL_MAGIC {
            return Err(AnalyzerError::ModelFormat("not a hiring model artifact".to_string()));
        }
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(AnalyzerError::ModelFormat(format!(
                "unsupported model format version {} (expected {})",
                self.format_version, MODEL_FORMAT_VERSION
            )));
        }
        let finite = self.coefficients.iter().all(|c| c.is_finite())
            && self.intercept.is_finite()
            && self.threshold.is_finite();
        if !finite {
            return Err(AnalyzerError::ModelFormat("model parameters are not finite".to_string()));
        }
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(AnalyzerError::ModelFormat(format!(
                "threshold {} outside [0, 1)",
                self.threshold
            )));
        }
        Ok(())
    }
}

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
