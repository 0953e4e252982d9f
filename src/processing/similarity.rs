//! Term-vector cosine similarity between two documents

use crate::config::TermWeighting;
use regex::Regex;
use std::collections::BTreeMap;

/// Scores two texts on a 0-100 scale by the cosine of their term-weight vectors.
///
/// Vocabulary is shared across the pair and kept ordered, so the score does not
/// depend on which text comes first.
pub struct SimilarityScorer {
    weighting: TermWeighting,
    token_regex: Regex,
}

/// Term weights for one document over the shared vocabulary
#[derive(Debug, Clone, PartialEq)]
pub struct TermVector {
    pub weights: Vec<f64>,
}

impl TermVector {
    pub fn norm(&self) -> f64 {
        self.weights.iter().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        self.weights
            .iter()
            .zip(other.weights.iter())
            .map(|(a, b)| a * b)
            .sum()
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(TermWeighting::TermFrequency)
    }
}

impl SimilarityScorer {
    pub fn new(weighting: TermWeighting) -> Self {
        // Two or more word characters, the usual count-vectorizer token shape
        let token_regex = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");
        Self {
            weighting,
            token_regex,
        }
    }

    pub fn weighting(&self) -> TermWeighting {
        self.weighting
    }

    /// Lowercased vectorizer tokens of a text
    pub fn terms(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Build weight vectors for both texts over their joint vocabulary
    pub fn vectorize(&self, text_a: &str, text_b: &str) -> (Vec<String>, TermVector, TermVector) {
        let counts_a = Self::count_terms(self.terms(text_a));
        let counts_b = Self::count_terms(self.terms(text_b));

        let vocabulary: Vec<String> = counts_a
            .keys()
            .chain(counts_b.keys())
            .cloned()
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();

        let weigh = |counts: &BTreeMap<String, usize>| TermVector {
            weights: vocabulary
                .iter()
                .map(|term| {
                    let tf = counts.get(term).copied().unwrap_or(0) as f64;
                    match self.weighting {
                        TermWeighting::TermFrequency => tf,
                        TermWeighting::TfIdf => {
                            let df = usize::from(counts_a.contains_key(term))
                                + usize::from(counts_b.contains_key(term));
                            tf * Self::smoothed_idf(2, df)
                        }
                    }
                })
                .collect(),
        };

        let vec_a = weigh(&counts_a);
        let vec_b = weigh(&counts_b);
        (vocabulary, vec_a, vec_b)
    }

    /// Cosine similarity as a percentage rounded to two decimals.
    ///
    /// Empty texts, texts without vocabulary and texts with no shared terms score 0.
    pub fn calculate_similarity(&self, text_a: &str, text_b: &str) -> f64 {
        let (vocabulary, vec_a, vec_b) = self.vectorize(text_a, text_b);
        if vocabulary.is_empty() {
            return 0.0;
        }

        let norm_product = vec_a.norm() * vec_b.norm();
        if norm_product == 0.0 {
            return 0.0;
        }

        let cosine = (vec_a.dot(&vec_b) / norm_product).clamp(0.0, 1.0);
        round_to_hundredths(cosine * 100.0)
    }

    fn count_terms(terms: Vec<String>) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for term in terms {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }

    /// `ln((1 + n) / (1 + df)) + 1`
    fn smoothed_idf(n_documents: usize, document_frequency: usize) -> f64 {
        ((1.0 + n_documents as f64) / (1.0 + document_frequency as f64)).ln() + 1.0
    }
}

pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_score_full() {
        let scorer = SimilarityScorer::default();
        let score = scorer.calculate_similarity("Rust systems engineer", "Rust systems engineer");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let scorer = SimilarityScorer::default();
        assert_eq!(scorer.calculate_similarity("", "anything"), 0.0);
        assert_eq!(scorer.calculate_similarity("anything", ""), 0.0);
        assert_eq!(scorer.calculate_similarity("", ""), 0.0);
    }

    #[test]
    fn test_single_character_tokens_carry_no_vocabulary() {
        let scorer = SimilarityScorer::default();
        assert_eq!(scorer.calculate_similarity("a b c", "a b c"), 0.0);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        let scorer = SimilarityScorer::default();
        assert_eq!(scorer.calculate_similarity("python django", "kotlin android"), 0.0);
    }

    #[test]
    fn test_known_count_vector_score() {
        // [aws, java, python, sql]: (0,1,1,1) vs (1,0,1,1) -> 2 / 3
        let scorer = SimilarityScorer::default();
        let score = scorer.calculate_similarity("Python Java SQL", "Python SQL AWS");
        assert_eq!(score, 66.67);
    }

    #[test]
    fn test_symmetry_and_range() {
        let texts = [
            "",
            "Python",
            "Senior Rust engineer, Rust and Go, distributed systems",
            "We need a Go engineer for distributed systems work",
            "SQL SQL SQL python",
        ];

        for weighting in [TermWeighting::TermFrequency, TermWeighting::TfIdf] {
            let scorer = SimilarityScorer::new(weighting);
            for a in &texts {
                for b in &texts {
                    let ab = scorer.calculate_similarity(a, b);
                    let ba = scorer.calculate_similarity(b, a);
                    assert_eq!(ab, ba, "asymmetric for {:?} / {:?}", a, b);
                    assert!((0.0..=100.0).contains(&ab));
                }
            }
        }
    }

    #[test]
    fn test_tfidf_downweights_shared_terms() {
        let tf = SimilarityScorer::new(TermWeighting::TermFrequency);
        let tfidf = SimilarityScorer::new(TermWeighting::TfIdf);

        let a = "python python java";
        let b = "python sql";
        assert!(tfidf.calculate_similarity(a, b) < 100.0);
        assert!(tfidf.calculate_similarity(a, b) > 0.0);
        assert!(tf.calculate_similarity(a, b) > 0.0);
    }

    #[test]
    fn test_vectorize_shares_vocabulary() {
        let scorer = SimilarityScorer::default();
        let (vocabulary, a, b) = scorer.vectorize("Rust rust go", "Go java");

        assert_eq!(vocabulary, vec!["go", "java", "rust"]);
        assert_eq!(a.weights, vec![1.0, 0.0, 2.0]);
        assert_eq!(b.weights, vec![1.0, 1.0, 0.0]);
    }
}
