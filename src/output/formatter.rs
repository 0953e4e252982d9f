//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::model::TrainingReport;
use crate::processing::analyzer::{MatchReport, MatchTier, Verdict};
use crate::processing::skills::SkillSet;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured output
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn tier_color(tier: MatchTier) -> Color {
        match tier {
            MatchTier::High => Color::Green,
            MatchTier::Medium => Color::Yellow,
            MatchTier::Low => Color::Red,
        }
    }

    /// Text progress bar for a 0-100 value
    fn format_bar(&self, value: f64, color: Color) -> String {
        const WIDTH: usize = 30;
        let filled = ((value.clamp(0.0, 100.0) / 100.0) * WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(WIDTH - filled));
        self.colorize(&bar, color)
    }

    fn format_skills(&self, skills: &SkillSet, color: Color) -> String {
        if skills.is_empty() {
            return "  (none)\n".to_string();
        }
        let limit = if self.detailed { skills.len() } else { 20 };
        let shown: Vec<String> = skills
            .iter()
            .take(limit)
            .map(|skill| self.colorize(skill, color))
            .collect();

        let mut line = format!("  {}", shown.join(", "));
        if skills.len() > limit {
            line.push_str(&format!(" ... and {} more", skills.len() - limit));
        }
        line.push('\n');
        line
    }

    fn format_verdict(&self, verdict: &Verdict) -> String {
        match verdict {
            Verdict::Recommend { probability } => format!(
                "{} (confidence {:.1}%)\n",
                self.colorize("RECOMMEND", Color::Green),
                probability * 100.0
            ),
            Verdict::Reject { probability } => format!(
                "{} (hire probability {:.1}%)\n",
                self.colorize("REJECT", Color::Red),
                probability * 100.0
            ),
            Verdict::ModelUnavailable { reason } => format!(
                "{}: {}\n",
                self.colorize("AI prediction unavailable", Color::Yellow),
                reason
            ),
        }
    }

    pub fn format_training_report(&self, report: &TrainingReport, model_path: &Path) -> String {
        let mut output = String::new();
        output.push_str(&self.format_header("HIRING MODEL TRAINING", 1));
        output.push_str(&format!(
            "Samples: {} ({} train / {} test)\n",
            report.n_samples, report.train_size, report.test_size
        ));
        output.push_str(&format!("Positive rate: {:.1}%\n", report.positive_rate * 100.0));
        output.push_str(&format!("Labels flipped by noise: {}\n", report.flipped_labels));
        output.push_str(&format!("Train accuracy: {:.2}%\n", report.train_accuracy * 100.0));
        output.push_str(&format!(
            "Test accuracy: {}\n",
            self.colorize(&format!("{:.2}%", report.test_accuracy * 100.0), Color::Cyan)
        ));

        output.push_str(&self.format_header("Reference predictions", 2));
        for (features, decision) in &report.reference_predictions {
            output.push_str(&format!(
                "  score {:.0}, coverage {:.0}, {} words -> {}\n",
                features.match_score, features.jd_coverage, features.word_count, decision
            ));
        }

        output.push_str(&format!("\nModel saved to {}\n", model_path.display()));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📄 ATS MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.processing_time_ms
        ));

        // Match result
        output.push_str(&self.format_header("Match Result", 2));
        let tier_color = Self::tier_color(report.match_tier);
        output.push_str(&format!(
            "{} {:.2}%\n",
            self.format_bar(report.similarity_score, tier_color),
            report.similarity_score
        ));
        output.push_str(&format!("{}\n", self.colorize(report.match_tier.summary(), tier_color)));

        // Keywords
        output.push_str(&self.format_header("Keyword Analysis", 2));
        output.push_str(&format!(
            "JD coverage: {:.2}% ({} of {} job skills)\n",
            report.coverage,
            report.matched_skills.len(),
            report.jd_skill_count
        ));
        output.push_str(&format!("\n✅ Matched Skills ({})\n", report.matched_skills.len()));
        output.push_str(&self.format_skills(&report.matched_skills, Color::Green));
        output.push_str(&format!("\n⚠️  Missing Skills ({})\n", report.missing_skills.len()));
        output.push_str(&self.format_skills(&report.missing_skills, Color::Red));

        // Verdict
        output.push_str(&self.format_header("AI Hiring Prediction", 2));
        output.push_str(&self.format_verdict(&report.verdict));

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            if let Some(title) = &report.resume_title {
                output.push_str(&format!("Resume title: {}\n", title));
            }
            output.push_str(&format!("Resume: {}\n", report.resume_path));
            output.push_str(&format!("Job description: {}\n", report.job_path));
            output.push_str(&format!("Resume word count: {}\n", report.word_count));
            output.push_str(&format!("Resume skills: {}\n", report.resume_skill_count));
            output.push_str(&format!(
                "Features: score={:.2}, coverage={:.2}, words={}\n",
                report.features.match_score, report.features.jd_coverage, report.features.word_count
            ));

            output.push_str(&self.format_header("Text Details", 3));
            output.push_str(&format!("Resume text:\n  {}\n", report.resume_excerpt));
            output.push_str(&format!("Job description text:\n  {}\n", report.job_excerpt));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn skill_list(skills: &SkillSet) -> String {
        if skills.is_empty() {
            "_None_\n".to_string()
        } else {
            skills.iter().map(|s| format!("- `{}`\n", s)).collect()
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# ATS Match Analysis\n\n");
        if self.include_metadata {
            output.push_str(&format!(
                "_Generated {}_\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            if let Some(title) = &report.resume_title {
                output.push_str(&format!("- **Candidate:** {}\n", title));
            }
            output.push_str(&format!("- **Resume:** {}\n", report.resume_path));
            output.push_str(&format!("- **Job description:** {}\n\n", report.job_path));
        }

        output.push_str("## Match Result\n\n");
        output.push_str("| Metric | Value |\n|---|---|\n");
        output.push_str(&format!("| Match confidence | {:.2}% |\n", report.similarity_score));
        output.push_str(&format!("| Match tier | {} |\n", report.match_tier));
        output.push_str(&format!("| JD coverage | {:.2}% |\n", report.coverage));
        output.push_str(&format!("| Resume word count | {} |\n\n", report.word_count));
        output.push_str(&format!("> {}\n\n", report.match_tier.summary()));

        output.push_str(&format!("## Matched Skills ({})\n\n", report.matched_skills.len()));
        output.push_str(&Self::skill_list(&report.matched_skills));
        output.push_str(&format!("\n## Missing Skills ({})\n\n", report.missing_skills.len()));
        output.push_str(&Self::skill_list(&report.missing_skills));

        output.push_str("\n## AI Hiring Prediction\n\n");
        match &report.verdict {
            Verdict::Recommend { probability } => {
                output.push_str(&format!(
                    "**RECOMMEND** (confidence {:.1}%)\n",
                    probability * 100.0
                ))
            }
            Verdict::Reject { probability } => {
                output.push_str(&format!(
                    "**REJECT** (hire probability {:.1}%)\n",
                    probability * 100.0
                ))
            }
            Verdict::ModelUnavailable { reason } => {
                output.push_str(&format!("_Prediction unavailable: {}_\n", reason))
            }
        }

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }

    pub fn console(&self) -> &ConsoleFormatter {
        &self.console_formatter
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Target file for `--save`: a directory gets a generated report name inside it
pub fn resolve_save_path(target: &Path, format: &OutputFormat, resume_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, resume_name, false))
    } else {
        target.to_path_buf()
    }
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_match{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_match{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_match{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::model::FeatureVector;
    use chrono::Utc;

    fn report(verdict: Verdict) -> MatchReport {
        let matched: SkillSet = ["python", "sql"].iter().map(|s| s.to_string()).collect();
        let missing: SkillSet = ["aws"].iter().map(|s| s.to_string()).collect();
        MatchReport {
            generated_at: Utc::now(),
            resume_path: "resume.pdf".to_string(),
            job_path: "job.pdf".to_string(),
            resume_title: Some("Jane Doe".to_string()),
            resume_excerpt: "Jane Doe Python Java SQL".to_string(),
            job_excerpt: "Python SQL AWS".to_string(),
            similarity_score: 66.67,
            match_tier: MatchTier::from_score(66.67, &ScoringConfig::default()),
            matched_skills: matched,
            missing_skills: missing,
            coverage: 66.67,
            word_count: 3,
            resume_skill_count: 3,
            jd_skill_count: 3,
            features: FeatureVector::new(66.67, 66.67, 3),
            verdict,
            processing_time_ms: 1,
        }
    }

    #[test]
    fn test_console_plain_output() {
        let formatter = ConsoleFormatter::new(false, true);
        let text = formatter
            .format_report(&report(Verdict::Reject { probability: 0.2 }))
            .unwrap();

        assert!(text.contains("66.67%"));
        assert!(text.contains("Matched Skills (2)"));
        assert!(text.contains("python, sql"));
        assert!(text.contains("Missing Skills (1)"));
        assert!(text.contains("REJECT"));
        assert!(text.contains("Medium match"));
        assert!(text.contains("Resume title: Jane Doe"));
        assert!(text.contains("Text Details"));
        assert!(text.contains("Jane Doe Python Java SQL"));
        assert!(text.contains("Python SQL AWS"));
    }

    #[test]
    fn test_console_summary_omits_text_details() {
        let formatter = ConsoleFormatter::new(false, false);
        let text = formatter
            .format_report(&report(Verdict::Reject { probability: 0.2 }))
            .unwrap();

        assert!(!text.contains("Text Details"));
        assert!(!text.contains("Jane Doe Python Java SQL"));
    }

    #[test]
    fn test_unavailable_model_notice() {
        let formatter = MarkdownFormatter::new(false);
        let text = formatter
            .format_report(&report(Verdict::ModelUnavailable {
                reason: "no model artifact".to_string(),
            }))
            .unwrap();

        assert!(text.contains("Prediction unavailable: no model artifact"));
        assert!(text.contains("- `aws`"));
    }

    #[test]
    fn test_json_output_parses() {
        let generator = ReportGenerator::with_options(false, false, false, false);
        let json = generator
            .generate_report(&report(Verdict::Recommend { probability: 0.9 }), &OutputFormat::Json)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["coverage"], 66.67);
        assert_eq!(value["verdict"]["status"], "recommend");
        assert_eq!(value["missing_skills"][0], "aws");
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "cv/jane.pdf", false),
            "jane_match.json"
        );
        assert_eq!(
            suggest_filename(&OutputFormat::Markdown, "jane.txt", false),
            "jane_match.md"
        );
    }

    #[test]
    fn test_save_path_for_directory_target() {
        let dir = tempfile::TempDir::new().unwrap();

        let in_dir = resolve_save_path(dir.path(), &OutputFormat::Markdown, "cv/jane.pdf");
        assert_eq!(in_dir, dir.path().join("jane_match.md"));

        let file = dir.path().join("report.json");
        assert_eq!(resolve_save_path(&file, &OutputFormat::Json, "cv/jane.pdf"), file);
    }
}
