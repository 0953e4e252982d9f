//! Analysis engine: similarity, keyword coverage and hiring verdict for one resume/job pair

use crate::config::{Config, ScoringConfig};
use crate::error::{AnalyzerError, Result};
use crate::model::{FeatureVector, HiringDecision, HiringPredictor};
use crate::processing::document::{Document, DocumentType};
use crate::processing::keywords::KeywordComparison;
use crate::processing::similarity::SimilarityScorer;
use crate::processing::skills::{SkillExtractor, SkillSet};
use crate::processing::tagger::{LexiconTagger, PosTagger};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Characters of extracted text kept in a report
pub const EXCERPT_CHARS: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

impl MatchTier {
    pub fn from_score(score: f64, scoring: &ScoringConfig) -> Self {
        if score > scoring.high_match_threshold {
            MatchTier::High
        } else if score > scoring.medium_match_threshold {
            MatchTier::Medium
        } else {
            MatchTier::Low
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            MatchTier::High => "High match. This candidate looks promising.",
            MatchTier::Medium => "Medium match. Check for missing skills.",
            MatchTier::Low => "Low match. Significant skills missing.",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTier::High => write!(f, "High"),
            MatchTier::Medium => write!(f, "Medium"),
            MatchTier::Low => write!(f, "Low"),
        }
    }
}

/// Outcome of the hiring classifier for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Recommend { probability: f64 },
    Reject { probability: f64 },
    /// The model could not be loaded; every other result is still valid
    ModelUnavailable { reason: String },
}

impl Verdict {
    pub fn decision(&self) -> Option<HiringDecision> {
        match self {
            Verdict::Recommend { .. } => Some(HiringDecision::Recommend),
            Verdict::Reject { .. } => Some(HiringDecision::Reject),
            Verdict::ModelUnavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.decision().is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub generated_at: DateTime<Utc>,
    pub resume_path: String,
    pub job_path: String,
    pub resume_title: Option<String>,
    /// Start of the extracted resume text
    pub resume_excerpt: String,
    pub job_excerpt: String,
    /// Cosine similarity of the two documents, 0-100
    pub similarity_score: f64,
    pub match_tier: MatchTier,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
    /// Share of job description skills found in the resume, 0-100
    pub coverage: f64,
    pub word_count: usize,
    pub resume_skill_count: usize,
    pub jd_skill_count: usize,
    pub features: FeatureVector,
    pub verdict: Verdict,
    pub processing_time_ms: u64,
}

pub struct AnalysisEngine<T: PosTagger = LexiconTagger> {
    extractor: SkillExtractor<T>,
    scorer: SimilarityScorer,
    predictor: std::result::Result<HiringPredictor, String>,
    scoring: ScoringConfig,
}

impl AnalysisEngine<LexiconTagger> {
    /// Build the default engine from configuration, loading the model once.
    ///
    /// A missing model does not fail construction; analyses report it in their verdict.
    pub fn from_config(config: &Config, model_path: Option<&Path>) -> Self {
        let model_path = model_path.unwrap_or_else(|| config.model_path().as_path());
        let predictor = HiringPredictor::load(model_path);
        if let Err(e) = &predictor {
            warn!("{}", e);
        }

        Self::new(
            SkillExtractor::new(LexiconTagger::new()),
            SimilarityScorer::new(config.scoring.weighting),
            predictor,
            config.scoring.clone(),
        )
    }
}

impl<T: PosTagger> AnalysisEngine<T> {
    pub fn new(
        extractor: SkillExtractor<T>,
        scorer: SimilarityScorer,
        predictor: Result<HiringPredictor>,
        scoring: ScoringConfig,
    ) -> Self {
        let predictor = predictor.map_err(|e| match e {
            AnalyzerError::ModelUnavailable(reason) => reason,
            other => other.to_string(),
        });

        Self {
            extractor,
            scorer,
            predictor,
            scoring,
        }
    }

    pub fn has_model(&self) -> bool {
        self.predictor.is_ok()
    }

    /// Roles come from argument position; `document_type` is not consulted
    pub fn analyze(&self, resume: &Document, job: &Document) -> MatchReport {
        let start_time = std::time::Instant::now();

        let similarity_score = self.scorer.calculate_similarity(&resume.content, &job.content);
        debug!("Similarity score: {:.2}", similarity_score);

        let resume_skills = self.extractor.extract_skills(&resume.content);
        let jd_skills = self.extractor.extract_skills(&job.content);
        debug!(
            "Extracted {} resume skills, {} job description skills",
            resume_skills.len(),
            jd_skills.len()
        );

        let comparison = KeywordComparison::compare(&resume_skills, &jd_skills);
        let features =
            FeatureVector::new(similarity_score, comparison.coverage, resume.word_count());
        let verdict = self.verdict(&features);

        info!(
            "Analysis complete: similarity {:.2}%, coverage {:.2}%, verdict {:?}",
            similarity_score,
            comparison.coverage,
            verdict.decision()
        );

        MatchReport {
            generated_at: Utc::now(),
            resume_path: resume.file_path.clone(),
            job_path: job.file_path.clone(),
            resume_title: resume.title().map(str::to_string),
            resume_excerpt: resume.excerpt(EXCERPT_CHARS),
            job_excerpt: job.excerpt(EXCERPT_CHARS),
            similarity_score,
            match_tier: MatchTier::from_score(similarity_score, &self.scoring),
            matched_skills: comparison.matched,
            missing_skills: comparison.missing,
            coverage: comparison.coverage,
            word_count: resume.word_count(),
            resume_skill_count: resume_skills.len(),
            jd_skill_count: jd_skills.len(),
            features,
            verdict,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }

    /// Analyze raw texts with no backing files
    pub fn analyze_text(&self, resume_text: &str, job_text: &str) -> MatchReport {
        self.analyze(
            &Document::from_text(resume_text, DocumentType::Resume),
            &Document::from_text(job_text, DocumentType::JobDescription),
        )
    }

    fn verdict(&self, features: &FeatureVector) -> Verdict {
        match &self.predictor {
            Ok(predictor) => {
                let probability = predictor.probability(features);
                match predictor.predict_features(features) {
                    HiringDecision::Recommend => Verdict::Recommend { probability },
                    HiringDecision::Reject => Verdict::Reject { probability },
                }
            }
            Err(reason) => Verdict::ModelUnavailable {
                reason: reason.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TermWeighting;
    use crate::model::hiring_model::{HiringModel, ModelMetadata};

    fn engine(predictor: Result<HiringPredictor>) -> AnalysisEngine {
        AnalysisEngine::new(
            SkillExtractor::new(LexiconTagger::new()),
            SimilarityScorer::new(TermWeighting::TermFrequency),
            predictor,
            ScoringConfig::default(),
        )
    }

    fn fixed_predictor() -> HiringPredictor {
        HiringPredictor::new(HiringModel::new(
            [0.06, 0.065, 0.0],
            -8.0,
            ModelMetadata {
                seed: 42,
                n_samples: 1000,
                test_accuracy: 0.9,
            },
        ))
    }

    fn set(words: &[&str]) -> SkillSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_partial_skill_match() {
        let report =
            engine(Ok(fixed_predictor())).analyze_text("Python Java SQL", "Python SQL AWS");

        assert_eq!(report.matched_skills, set(&["python", "sql"]));
        assert_eq!(report.missing_skills, set(&["aws"]));
        assert_eq!(report.coverage, 66.67);
        assert_eq!(report.similarity_score, 66.67);
        assert_eq!(report.word_count, 3);
        assert_eq!(report.match_tier, MatchTier::Medium);
    }

    #[test]
    fn test_empty_resume() {
        let report = engine(Ok(fixed_predictor())).analyze_text("", "Python");

        assert_eq!(report.similarity_score, 0.0);
        assert!(report.matched_skills.is_empty());
        assert_eq!(report.missing_skills, set(&["python"]));
        assert_eq!(report.coverage, 0.0);
        assert_eq!(report.match_tier, MatchTier::Low);
        assert_eq!(report.verdict.decision(), Some(HiringDecision::Reject));
    }

    #[test]
    fn test_missing_model_keeps_other_results() {
        let unavailable = Err(AnalyzerError::ModelUnavailable("no artifact".to_string()));
        let engine = engine(unavailable);
        assert!(!engine.has_model());

        let report = engine.analyze_text("Python Java SQL", "Python SQL AWS");
        assert_eq!(
            report.verdict,
            Verdict::ModelUnavailable {
                reason: "no artifact".to_string()
            }
        );
        assert!(!report.verdict.is_available());
        assert_eq!(report.similarity_score, 66.67);
        assert_eq!(report.matched_skills, set(&["python", "sql"]));
        assert_eq!(report.coverage, 66.67);
    }

    #[test]
    fn test_identical_documents_recommended() {
        let text = "Rust Kafka Kubernetes Terraform AWS PostgreSQL";
        let report = engine(Ok(fixed_predictor())).analyze_text(text, text);

        assert_eq!(report.similarity_score, 100.0);
        assert_eq!(report.coverage, 100.0);
        assert_eq!(report.match_tier, MatchTier::High);
        assert_eq!(report.verdict.decision(), Some(HiringDecision::Recommend));
    }

    #[test]
    fn test_swapped_document_roles_do_not_panic() {
        let engine = engine(Ok(fixed_predictor()));
        let resume = Document::from_text("Python Java SQL", DocumentType::JobDescription);
        let job = Document::from_text("Python SQL AWS", DocumentType::Resume);

        let report = engine.analyze(&resume, &job);
        assert_eq!(report.matched_skills, set(&["python", "sql"]));
        assert_eq!(report.missing_skills, set(&["aws"]));
        assert_eq!(report.word_count, 3);
    }

    #[test]
    fn test_report_carries_text_excerpts() {
        let long_job = "Kubernetes ".repeat(100);
        let report = engine(Ok(fixed_predictor()))
            .analyze_text("Senior Rust Engineer\nRust   Kafka", &long_job);

        assert_eq!(report.resume_title.as_deref(), Some("Senior Rust Engineer"));
        assert_eq!(report.resume_excerpt, "Senior Rust Engineer Rust Kafka");
        assert!(report.job_excerpt.ends_with("..."));
        assert_eq!(report.job_excerpt.chars().count(), EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_match_tier_thresholds() {
        let scoring = ScoringConfig::default();
        assert_eq!(MatchTier::from_score(75.01, &scoring), MatchTier::High);
        assert_eq!(MatchTier::from_score(75.0, &scoring), MatchTier::Medium);
        assert_eq!(MatchTier::from_score(50.0, &scoring), MatchTier::Low);
    }

    #[test]
    fn test_report_serializes_verdict_tag() {
        let report = engine(Ok(fixed_predictor())).analyze_text("Go", "Go");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["verdict"]["status"], "reject");
    }
}
