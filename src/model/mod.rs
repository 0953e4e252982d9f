//! Hiring classifier: artifact, inference and offline training

pub mod hiring_model;
pub mod predictor;
pub mod synthetic;
pub mod trainer;

use serde::{Deserialize, Serialize};

/// The three inputs of the hiring classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Resume / job description similarity, 0-100
    pub match_score: f64,
    /// Share of job description skills found in the resume, 0-100
    pub jd_coverage: f64,
    pub word_count: usize,
}

impl FeatureVector {
    pub fn new(match_score: f64, jd_coverage: f64, word_count: usize) -> Self {
        Self {
            match_score,
            jd_coverage,
            word_count,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.match_score, self.jd_coverage, self.word_count as f64]
    }
}

pub use hiring_model::HiringModel;
pub use predictor::{HiringDecision, HiringPredictor};
pub use trainer::{HiringTrainer, TrainingReport};
