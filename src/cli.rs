//! CLI interface for the ATS analyzer

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ats-analyzer")]
#[command(about = "Resume and job description match scoring")]
#[command(
    long_about = "Score a resume against a job description with term-vector similarity, \
                  noun-based keyword coverage and a small trained hiring classifier"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Hiring model artifact (defaults to the configured path)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Weight terms with TF-IDF instead of raw counts
        #[arg(long)]
        tfidf: bool,
    },

    /// Train the hiring classifier on synthetic data
    Train {
        /// Number of synthetic samples
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Seed for data generation
        #[arg(short, long)]
        seed: Option<u64>,

        /// Where to write the model artifact
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Run the hiring classifier on raw feature values
    Predict {
        /// Similarity score (0-100)
        #[arg(long)]
        score: f64,

        /// Job description skill coverage (0-100)
        #[arg(long)]
        coverage: f64,

        /// Resume word count
        #[arg(long)]
        word_count: usize,

        /// Hiring model artifact (defaults to the configured path)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

/// Check that a feature value lies on the 0-100 percentage scale
pub fn validate_percentage(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{} must be between 0 and 100, got {}", name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "txt", "md"];
        assert!(validate_file_extension(Path::new("cv.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("cv"), &allowed).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("score", 0.0).is_ok());
        assert!(validate_percentage("score", 100.0).is_ok());
        assert!(validate_percentage("score", 100.5).is_err());
        assert!(validate_percentage("score", f64::NAN).is_err());
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "ats-analyzer", "analyze", "--resume", "cv.pdf", "--job", "jd.pdf", "--tfidf",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { resume, tfidf, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert!(tfidf);
            }
            _ => panic!("expected analyze command"),
        }
    }
}
