//! Seeded synthetic hiring data.
//!
//! The labels come from a hand-written rule, not real hiring outcomes; the model
//! trained on them can only ever learn that rule plus noise.

use crate::model::FeatureVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSample {
    pub features: FeatureVector,
    /// 1 = hire, 0 = reject, after noise
    pub label: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDataset {
    pub samples: Vec<SyntheticSample>,
    /// Which labels were flipped away from the rule
    pub noise_mask: Vec<bool>,
}

impl SyntheticDataset {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn flipped_count(&self) -> usize {
        self.noise_mask.iter().filter(|&&flipped| flipped).count()
    }

    pub fn positive_rate(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let positives = self.samples.iter().filter(|s| s.label == 1).count();
        positives as f64 / self.samples.len() as f64
    }
}

/// Ground-truth hiring rule
pub fn hire_rule(features: &FeatureVector) -> u8 {
    // Strong match with reasonable coverage
    if features.match_score > 60.0 && features.jd_coverage > 50.0 {
        return 1;
    }
    // Weaker wording but nearly every required skill
    if features.match_score > 40.0 && features.jd_coverage > 80.0 {
        return 1;
    }
    // Very short resumes
    if features.word_count < 200 {
        return 0;
    }
    0
}

/// Draw `n_samples` rows from a generator seeded with `seed`.
///
/// All match scores are drawn first, then all coverages, then all word counts,
/// then one noise draw per row.
pub fn generate(n_samples: usize, seed: u64, noise_rate: f64) -> SyntheticDataset {
    let mut rng = StdRng::seed_from_u64(seed);

    let match_scores: Vec<f64> = (0..n_samples).map(|_| rng.random_range(0.0..100.0)).collect();
    let coverages: Vec<f64> = (0..n_samples).map(|_| rng.random_range(0.0..100.0)).collect();
    let word_counts: Vec<usize> = (0..n_samples).map(|_| rng.random_range(100..2000)).collect();
    let noise_mask: Vec<bool> = (0..n_samples).map(|_| rng.random::<f64>() < noise_rate).collect();

    let samples = match_scores
        .into_iter()
        .zip(coverages)
        .zip(word_counts)
        .zip(&noise_mask)
        .map(|(((match_score, jd_coverage), word_count), &flipped)| {
            let features = FeatureVector::new(match_score, jd_coverage, word_count);
            let label = hire_rule(&features);
            SyntheticSample {
                features,
                label: if flipped { 1 - label } else { label },
            }
        })
        .collect();

    SyntheticDataset {
        samples,
        noise_mask,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hire_rule() {
        assert_eq!(hire_rule(&FeatureVector::new(61.0, 51.0, 500)), 1);
        assert_eq!(hire_rule(&FeatureVector::new(41.0, 81.0, 150)), 1);
        assert_eq!(hire_rule(&FeatureVector::new(60.0, 90.0, 500)), 1);
        assert_eq!(hire_rule(&FeatureVector::new(60.0, 50.0, 500)), 0);
        assert_eq!(hire_rule(&FeatureVector::new(10.0, 10.0, 150)), 0);
        // Fails both hire rules and is long enough: falls through to reject
        assert_eq!(hire_rule(&FeatureVector::new(50.0, 71.0, 600)), 0);
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = generate(500, 42, 0.05);
        let b = generate(500, 42, 0.05);
        assert_eq!(a, b);

        let c = generate(500, 43, 0.05);
        assert_ne!(a.samples, c.samples);
    }

    #[test]
    fn test_feature_ranges() {
        let dataset = generate(1000, 1, 0.05);
        assert_eq!(dataset.len(), 1000);

        for sample in &dataset.samples {
            let f = sample.features;
            assert!((0.0..100.0).contains(&f.match_score));
            assert!((0.0..100.0).contains(&f.jd_coverage));
            assert!((100..2000).contains(&f.word_count));
            assert!(sample.label <= 1);
        }
    }

    #[test]
    fn test_noise_flips_labels() {
        let dataset = generate(1000, 42, 0.05);
        let flipped = dataset.flipped_count();
        assert!(flipped > 15 && flipped < 100, "flipped {}", flipped);

        for (sample, &was_flipped) in dataset.samples.iter().zip(&dataset.noise_mask) {
            let clean = hire_rule(&sample.features);
            assert_eq!(sample.label != clean, was_flipped);
        }

        let clean = generate(1000, 42, 0.0);
        assert_eq!(clean.flipped_count(), 0);
    }
}
