//! Matched / missing keyword comparison between resume and job description skills

use crate::processing::similarity::round_to_hundredths;
use crate::processing::skills::SkillSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordComparison {
    /// Job description skills present in the resume
    pub matched: SkillSet,
    /// Job description skills absent from the resume
    pub missing: SkillSet,
    /// `|matched| / |jd skills|` as a percentage, 0 when the job lists no skills
    pub coverage: f64,
}

impl KeywordComparison {
    pub fn compare(resume_skills: &SkillSet, jd_skills: &SkillSet) -> Self {
        let matched: SkillSet = jd_skills.intersection(resume_skills).cloned().collect();
        let missing: SkillSet = jd_skills.difference(resume_skills).cloned().collect();

        let coverage = if jd_skills.is_empty() {
            0.0
        } else {
            round_to_hundredths(matched.len() as f64 / jd_skills.len() as f64 * 100.0)
        };

        Self {
            matched,
            missing,
            coverage,
        }
    }

    pub fn job_skill_count(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}
