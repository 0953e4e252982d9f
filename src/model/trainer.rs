//! Offline training of the hiring classifier

use crate::config::TrainingConfig;
use crate::error::{AnalyzerError, Result};
use crate::model::hiring_model::{sigmoid, HiringModel, ModelMetadata};
use crate::model::predictor::{HiringDecision, HiringPredictor};
use crate::model::synthetic::{self, SyntheticDataset, SyntheticSample};
use crate::model::FeatureVector;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Feature rows probed after every training run as a sanity check
pub const REFERENCE_CASES: [FeatureVector; 2] = [
    FeatureVector {
        match_score: 85.0,
        jd_coverage: 90.0,
        word_count: 800,
    },
    FeatureVector {
        match_score: 50.0,
        jd_coverage: 71.0,
        word_count: 600,
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub n_samples: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub positive_rate: f64,
    pub flipped_labels: usize,
    pub reference_predictions: Vec<(FeatureVector, HiringDecision)>,
}

/// Full-batch gradient descent logistic regression with L2 penalty.
///
/// Fits on standardized features, then folds the scaling back so the returned
/// weights apply to raw feature values.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    pub learning_rate: f64,
    pub epochs: usize,
    /// Inverse regularization strength
    pub c: f64,
}

impl LogisticRegression {
    pub fn fit(&self, xs: &[[f64; 3]], ys: &[u8]) -> Result<([f64; 3], f64)> {
        if xs.is_empty() || xs.len() != ys.len() {
            return Err(AnalyzerError::Training(format!(
                "cannot fit on {} rows with {} labels",
                xs.len(),
                ys.len()
            )));
        }

        let n = xs.len() as f64;
        let (mean, scale) = Self::standardization(xs);
        let standardized: Vec<[f64; 3]> = xs
            .iter()
            .map(|x| [0usize, 1, 2].map(|j| (x[j] - mean[j]) / scale[j]))
            .collect();

        let penalty = 1.0 / (self.c * n);
        let mut weights = [0.0f64; 3];
        let mut bias = 0.0f64;

        for epoch in 0..self.epochs {
            let mut grad = [0.0f64; 3];
            let mut grad_bias = 0.0f64;
            let mut loss = 0.0f64;

            for (x, &y) in standardized.iter().zip(ys) {
                let z = weights.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + bias;
                let p = sigmoid(z);
                let error = p - f64::from(y);
                for j in 0..3 {
                    grad[j] += error * x[j];
                }
                grad_bias += error;
                loss -= if y == 1 { p.max(1e-12).ln() } else { (1.0 - p).max(1e-12).ln() };
            }

            for j in 0..3 {
                weights[j] -= self.learning_rate * (grad[j] / n + penalty * weights[j]);
            }
            bias -= self.learning_rate * grad_bias / n;

            if epoch % 200 == 0 {
                debug!("epoch {}: mean log loss {:.4}", epoch, loss / n);
            }
        }

        let coefficients = [0usize, 1, 2].map(|j| weights[j] / scale[j]);
        let intercept = bias - (0..3usize).map(|j| weights[j] * mean[j] / scale[j]).sum::<f64>();

        if !coefficients.iter().all(|c| c.is_finite()) || !intercept.is_finite() {
            return Err(AnalyzerError::Training("gradient descent diverged".to_string()));
        }

        Ok((coefficients, intercept))
    }

    fn standardization(xs: &[[f64; 3]]) -> ([f64; 3], [f64; 3]) {
        let n = xs.len() as f64;
        let mean = [0usize, 1, 2].map(|j| xs.iter().map(|x| x[j]).sum::<f64>() / n);
        let scale = [0usize, 1, 2].map(|j| {
            let variance = xs.iter().map(|x| (x[j] - mean[j]).powi(2)).sum::<f64>() / n;
            // Constant columns keep unit scale
            if variance > 0.0 {
                variance.sqrt()
            } else {
                1.0
            }
        });
        (mean, scale)
    }
}

/// Shuffle row indices with a seeded generator and cut off the test share.
///
/// The test split is `ceil(n * test_fraction)` rows.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_size = ((n as f64) * test_fraction).ceil() as usize;
    let test_size = test_size.min(n);
    let train = indices.split_off(test_size);

    debug!("Dataset split: {} training, {} test", train.len(), indices.len());
    (train, indices)
}

pub fn accuracy(model: &HiringModel, samples: &[&SyntheticSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let correct = samples
        .iter()
        .filter(|s| model.predict_class(&s.features) == s.label)
        .count();
    correct as f64 / samples.len() as f64
}

pub struct HiringTrainer {
    config: TrainingConfig,
}

impl HiringTrainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Generate the configured synthetic dataset and fit on it
    pub fn train(&self) -> Result<(HiringModel, TrainingReport)> {
        info!(
            "Generating {} synthetic samples (seed {}, noise {:.0}%)",
            self.config.n_samples,
            self.config.seed,
            self.config.noise_rate * 100.0
        );
        let dataset = synthetic::generate(
            self.config.n_samples,
            self.config.seed,
            self.config.noise_rate,
        );
        self.train_on(&dataset)
    }

    pub fn train_on(&self, dataset: &SyntheticDataset) -> Result<(HiringModel, TrainingReport)> {
        if dataset.len() < 2 {
            return Err(AnalyzerError::Training(format!(
                "need at least 2 samples, got {}",
                dataset.len()
            )));
        }

        let (train_idx, test_idx) =
            train_test_split(dataset.len(), self.config.test_fraction, self.config.split_seed);
        if train_idx.is_empty() || test_idx.is_empty() {
            return Err(AnalyzerError::Training(
                "train/test split left one side empty".to_string(),
            ));
        }

        let train: Vec<&SyntheticSample> = train_idx.iter().map(|&i| &dataset.samples[i]).collect();
        let test: Vec<&SyntheticSample> = test_idx.iter().map(|&i| &dataset.samples[i]).collect();

        let xs: Vec<[f64; 3]> = train.iter().map(|s| s.features.as_array()).collect();
        let ys: Vec<u8> = train.iter().map(|s| s.label).collect();

        let regression = LogisticRegression {
            learning_rate: self.config.learning_rate,
            epochs: self.config.epochs,
            c: self.config.regularization_c,
        };
        let (coefficients, intercept) = regression.fit(&xs, &ys)?;

        let mut model = HiringModel::new(
            coefficients,
            intercept,
            ModelMetadata {
                seed: self.config.seed,
                n_samples: dataset.len(),
                test_accuracy: 0.0,
            },
        );
        let train_accuracy = accuracy(&model, &train);
        let test_accuracy = accuracy(&model, &test);
        model.metadata.test_accuracy = test_accuracy;

        let predictor = HiringPredictor::new(model.clone());
        let reference_predictions = REFERENCE_CASES
            .iter()
            .map(|features| (*features, predictor.predict_features(features)))
            .collect();

        info!(
            "Model trained: test accuracy {:.2}% on {} held-out samples",
            test_accuracy * 100.0,
            test.len()
        );

        let report = TrainingReport {
            n_samples: dataset.len(),
            train_size: train.len(),
            test_size: test.len(),
            train_accuracy,
            test_accuracy,
            positive_rate: dataset.positive_rate(),
            flipped_labels: dataset.flipped_count(),
            reference_predictions,
        };

        Ok((model, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained() -> (HiringModel, TrainingReport) {
        HiringTrainer::new(TrainingConfig::default()).train().unwrap()
    }

    #[test]
    fn test_split_sizes_and_coverage() {
        let (train, test) = train_test_split(1000, 0.2, 42);
        assert_eq!(train.len(), 800);
        assert_eq!(test.len(), 200);

        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_seeded() {
        assert_eq!(train_test_split(100, 0.2, 7), train_test_split(100, 0.2, 7));
        assert_ne!(train_test_split(100, 0.2, 7), train_test_split(100, 0.2, 8));
    }

    #[test]
    fn test_training_is_reproducible() {
        let (model_a, report_a) = trained();
        let (model_b, report_b) = trained();

        assert_eq!(model_a, model_b);
        assert_eq!(report_a.test_accuracy, report_b.test_accuracy);
        assert_eq!(report_a.flipped_labels, report_b.flipped_labels);
    }

    #[test]
    fn test_model_learns_the_rule() {
        let (model, report) = trained();

        assert_eq!(report.train_size, 800);
        assert_eq!(report.test_size, 200);
        assert!(report.test_accuracy > 0.8, "accuracy {}", report.test_accuracy);
        assert!(model.coefficients[0] > 0.0);
        assert!(model.coefficients[1] > 0.0);
    }

    #[test]
    fn test_reference_cases() {
        let (model, report) = trained();
        let predictor = HiringPredictor::new(model);

        // Clear hire under the first rule
        assert_eq!(predictor.predict(85.0, 90.0, 800), HiringDecision::Recommend);
        // Misses both hire rules; a linear boundary lands it on reject
        assert_eq!(predictor.predict(50.0, 71.0, 600), HiringDecision::Reject);

        assert_eq!(report.reference_predictions[0].1, HiringDecision::Recommend);
        assert_eq!(report.reference_predictions[1].1, HiringDecision::Reject);
    }

    #[test]
    fn test_fit_rejects_empty_input() {
        let regression = LogisticRegression {
            learning_rate: 0.5,
            epochs: 10,
            c: 1.0,
        };
        assert!(matches!(regression.fit(&[], &[]), Err(AnalyzerError::Training(_))));
    }

    #[test]
    fn test_fit_separable_data() {
        let xs = [
            [10.0, 10.0, 500.0],
            [20.0, 15.0, 700.0],
            [80.0, 85.0, 600.0],
            [90.0, 95.0, 900.0],
        ];
        let ys = [0, 0, 1, 1];
        let regression = LogisticRegression {
            learning_rate: 0.5,
            epochs: 500,
            c: 1.0,
        };
        let (coefficients, intercept) = regression.fit(&xs, &ys).unwrap();
        let model = HiringModel::new(
            coefficients,
            intercept,
            ModelMetadata {
                seed: 0,
                n_samples: 4,
                test_accuracy: 1.0,
            },
        );

        for (x, &y) in xs.iter().zip(&ys) {
            let features = FeatureVector::new(x[0], x[1], x[2] as usize);
            assert_eq!(model.predict_class(&features), y);
        }
    }
}
