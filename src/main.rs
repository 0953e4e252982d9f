//! ATS analyzer: resume and job description match scoring

use ats_analyzer::cli::{self, Cli, Commands, ConfigAction};
use ats_analyzer::config::{Config, OutputFormat, TermWeighting};
use ats_analyzer::error::{AnalyzerError, Result};
use ats_analyzer::input::{InputManager, SUPPORTED_EXTENSIONS};
use ats_analyzer::model::{FeatureVector, HiringPredictor, HiringTrainer};
use ats_analyzer::output::{resolve_save_path, save_report_to_file, ReportGenerator};
use ats_analyzer::processing::analyzer::AnalysisEngine;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(
    command: Commands,
    mut config: Config,
    config_path: Option<PathBuf>,
) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            detailed,
            save,
            model,
            tfidf,
        } => {
            info!("Starting resume match analysis");

            cli::validate_file_extension(&resume, &SUPPORTED_EXTENSIONS)
                .map_err(|e| AnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &SUPPORTED_EXTENSIONS)
                .map_err(|e| AnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format = match output {
                Some(format) => {
                    cli::parse_output_format(&format).map_err(AnalyzerError::InvalidInput)?
                }
                None => config.output.format,
            };
            if tfidf {
                config.scoring.weighting = TermWeighting::TfIdf;
            }

            let spinner = spinner("Analyzing...");

            // Extraction failures end the analysis before anything is scored
            let (resume_doc, job_doc) = InputManager::new().load_pair(&resume, &job).await?;

            let engine = AnalysisEngine::from_config(&config, model.as_deref());
            let report = engine.analyze(&resume_doc, &job_doc);
            spinner.finish_and_clear();

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(target) => {
                    let path = resolve_save_path(&target, &output_format, &report.resume_path);
                    save_report_to_file(&rendered, &path)?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Train { samples, seed, out } => {
            if let Some(samples) = samples {
                config.training.n_samples = samples;
            }
            if let Some(seed) = seed {
                config.training.seed = seed;
            }
            let model_path = out.unwrap_or_else(|| config.model_path().clone());

            let spinner = spinner("Training hiring model...");
            let trainer = HiringTrainer::new(config.training.clone());
            let (model, report) = trainer.train()?;
            model.save(&model_path)?;
            spinner.finish_and_clear();

            let generator =
                ReportGenerator::with_options(config.output.color_output, false, true, true);
            println!("{}", generator.console().format_training_report(&report, &model_path));
        }

        Commands::Predict {
            score,
            coverage,
            word_count,
            model,
        } => {
            cli::validate_percentage("score", score).map_err(AnalyzerError::InvalidInput)?;
            cli::validate_percentage("coverage", coverage).map_err(AnalyzerError::InvalidInput)?;

            let model_path = model.unwrap_or_else(|| config.model_path().clone());
            let predictor = HiringPredictor::load(&model_path)?;
            let features = FeatureVector::new(score, coverage, word_count);

            println!(
                "{} (hire probability {:.1}%)",
                predictor.predict_features(&features),
                predictor.probability(&features) * 100.0
            );
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("Model artifact: {}", config.model_path().display());
                    println!("Term weighting: {:?}", config.scoring.weighting);
                    println!(
                        "Match tiers: high > {:.0}%, medium > {:.0}%",
                        config.scoring.high_match_threshold, config.scoring.medium_match_threshold
                    );
                    println!(
                        "Training: {} samples, seed {}, noise {:.0}%, test split {:.0}%",
                        config.training.n_samples,
                        config.training.seed,
                        config.training.noise_rate * 100.0,
                        config.training.test_fraction * 100.0
                    );
                    println!("Output format: {}", format_name(config.output.format));
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset to defaults at {}", path.display());
                }

                Some(ConfigAction::Path) => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Console => "console",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "markdown",
    }
}
