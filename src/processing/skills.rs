//! Skill extraction from nouns and proper nouns

use crate::processing::tagger::PosTagger;
use std::collections::BTreeSet;

/// Lowercase, deduplicated skill terms.
///
/// Ordered only so reports render stably; membership is all that matters.
pub type SkillSet = BTreeSet<String>;

/// Approximates a skill list by keeping the nominal content words of a text
pub struct SkillExtractor<T: PosTagger> {
    tagger: T,
}

impl<T: PosTagger> SkillExtractor<T> {
    pub fn new(tagger: T) -> Self {
        Self { tagger }
    }

    pub fn tagger(&self) -> &T {
        &self.tagger
    }

    /// Keep tokens tagged noun or proper noun that are not stop words.
    ///
    /// The tagger is trusted as-is: a number or symbol it calls a noun is kept.
    pub fn extract_skills(&self, text: &str) -> SkillSet {
        self.tagger
            .tokenize(text)
            .into_iter()
            .filter(|token| token.pos.is_nominal() && !token.is_stop)
            .map(|token| token.text.to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::tagger::{LexiconTagger, PosTag, Token};

    /// Tags every whitespace-separated word with a fixed class
    struct FixedTagger(PosTag);

    impl PosTagger for FixedTagger {
        fn tokenize(&self, text: &str) -> Vec<Token> {
            text.split_whitespace()
                .map(|w| Token {
                    text: w.to_string(),
                    pos: self.0,
                    is_stop: w == "the",
                })
                .collect()
        }
    }

    #[test]
    fn test_extracts_lowercase_unique_skills() {
        let extractor = SkillExtractor::new(LexiconTagger::new());
        let skills = extractor.extract_skills("Python python PYTHON Docker");

        assert_eq!(skills.len(), 2);
        assert!(skills.contains("python"));
        assert!(skills.contains("docker"));
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let extractor = SkillExtractor::new(LexiconTagger::new());
        assert!(extractor.extract_skills("").is_empty());
    }

    #[test]
    fn test_filters_verbs_and_stop_words() {
        let extractor = SkillExtractor::new(LexiconTagger::new());
        let skills =
            extractor.extract_skills("We build scalable APIs with Kubernetes and the team");

        assert!(skills.contains("apis"));
        assert!(skills.contains("kubernetes"));
        assert!(skills.contains("team"));
        assert!(!skills.contains("build"));
        assert!(!skills.contains("scalable"));
        assert!(!skills.contains("the"));
        assert!(!skills.contains("we"));
    }

    #[test]
    fn test_adjectives_and_sentence_final_compounds() {
        let extractor = SkillExtractor::new(LexiconTagger::new());
        let skills =
            extractor.extract_skills("Strong professional and cross-functional skills in C++.");

        let expected: SkillSet = ["c++", "skills"].iter().map(|s| s.to_string()).collect();
        assert_eq!(skills, expected);
    }

    #[test]
    fn test_tagger_judgment_is_trusted() {
        let extractor = SkillExtractor::new(FixedTagger(PosTag::Noun));
        let skills = extractor.extract_skills("2024 !! the Rust");

        assert!(skills.contains("2024"));
        assert!(skills.contains("!!"));
        assert!(skills.contains("rust"));
        assert!(!skills.contains("the"));

        let verbs_only = SkillExtractor::new(FixedTagger(PosTag::Verb));
        assert!(verbs_only.extract_skills("Rust Go").is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = SkillExtractor::new(LexiconTagger::new());
        let text = "Senior engineer with AWS, Terraform and PostgreSQL experience.";
        assert_eq!(extractor.extract_skills(text), extractor.extract_skills(text));
    }
}
