//! Hiring predictor over a loaded model

use crate::error::Result;
use crate::model::hiring_model::HiringModel;
use crate::model::FeatureVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiringDecision {
    Recommend,
    Reject,
}

impl fmt::Display for HiringDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HiringDecision::Recommend => write!(f, "RECOMMEND"),
            HiringDecision::Reject => write!(f, "REJECT"),
        }
    }
}

/// Read-only handle on a trained model. Cloning shares the same parameters.
#[derive(Debug, Clone)]
pub struct HiringPredictor {
    model: Arc<HiringModel>,
}

impl HiringPredictor {
    pub fn new(model: HiringModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Load the artifact once; fails with `ModelUnavailable`
    pub fn load(path: &Path) -> Result<Self> {
        HiringModel::load(path).map(Self::new)
    }

    pub fn model(&self) -> &HiringModel {
        &self.model
    }

    pub fn predict(&self, match_score: f64, jd_coverage: f64, word_count: usize) -> HiringDecision {
        self.predict_features(&FeatureVector::new(match_score, jd_coverage, word_count))
    }

    pub fn predict_features(&self, features: &FeatureVector) -> HiringDecision {
        if self.model.predict_class(features) == 1 {
            HiringDecision::Recommend
        } else {
            HiringDecision::Reject
        }
    }

    pub fn probability(&self, features: &FeatureVector) -> f64 {
        self.model.probability(features)
    }
}
