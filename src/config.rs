//! Configuration management for the ATS analyzer

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub training: TrainingConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Location of the persisted hiring model artifact
    pub model_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub n_samples: usize,
    pub seed: u64,
    pub split_seed: u64,
    pub noise_rate: f64,
    pub test_fraction: f64,
    pub learning_rate: f64,
    pub epochs: usize,
    /// Inverse L2 regularization strength
    pub regularization_c: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weighting: TermWeighting,
    pub high_match_threshold: f64,
    pub medium_match_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermWeighting {
    TermFrequency,
    TfIdf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            seed: 42,
            split_seed: 42,
            noise_rate: 0.05,
            test_fraction: 0.2,
            learning_rate: 0.5,
            epochs: 1000,
            regularization_c: 1.0,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weighting: TermWeighting::TermFrequency,
            high_match_threshold: 75.0,
            medium_match_threshold: 50.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let model_path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ats-analyzer")
            .join("hiring_model.bin");

        Self {
            model: ModelConfig { model_path },
            training: TrainingConfig::default(),
            scoring: ScoringConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the config from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| {
                    AnalyzerError::Configuration(format!("Failed to parse config: {}", e))
                })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| {
                AnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
            })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-analyzer")
            .join("config.toml")
    }

    pub fn model_path(&self) -> &PathBuf {
        &self.model.model_path
    }

    fn validate(&self) -> Result<()> {
        let training = &self.training;
        if training.n_samples < 2 {
            return Err(AnalyzerError::Configuration(
                "training.n_samples must be at least 2".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&training.noise_rate) {
            return Err(AnalyzerError::Configuration(format!(
                "training.noise_rate must be within [0, 1], got {}",
                training.noise_rate
            )));
        }
        if !(training.test_fraction > 0.0 && training.test_fraction < 1.0) {
            return Err(AnalyzerError::Configuration(format!(
                "training.test_fraction must be within (0, 1), got {}",
                training.test_fraction
            )));
        }
        if training.regularization_c <= 0.0 {
            return Err(AnalyzerError::Configuration(
                "training.regularization_c must be positive".to_string(),
            ));
        }
        if self.scoring.medium_match_threshold > self.scoring.high_match_threshold {
            return Err(AnalyzerError::Configuration(
                "scoring.medium_match_threshold exceeds scoring.high_match_threshold".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.training.seed, 42);
        assert_eq!(parsed.training.n_samples, 1000);
        assert_eq!(parsed.scoring.weighting, TermWeighting::TermFrequency);
        assert_eq!(parsed.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.training.test_fraction, 0.2);
    }

    #[test]
    fn test_invalid_noise_rate_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.training.noise_rate = 1.5;
        config.save_to(&path).unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(AnalyzerError::Configuration(_))));
    }
}
