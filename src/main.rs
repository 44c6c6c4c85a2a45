//! Resume evaluator: resume quality scoring and job-description skill matching

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_evaluator::cli::{self, Cli, Commands, ConfigAction};
use resume_evaluator::config::OutputFormat;
use resume_evaluator::input::InputManager;
use resume_evaluator::output::{
    save_report, suggest_filename, ReportGenerator, ReportMetadata, ResumeReport,
};
use resume_evaluator::processing::keyword_extractor::KeywordExtractor;
use resume_evaluator::{Config, Result, ResumeAnalyzer, ResumeEvaluatorError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
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

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(
    command: Commands,
    config: Config,
    config_path: Option<PathBuf>,
) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            detailed,
            output,
            save,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| ResumeEvaluatorError::InvalidInput(format!("Resume file: {}", e)))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, &["txt", "md"]).map_err(|e| {
                    ResumeEvaluatorError::InvalidInput(format!("Job description file: {}", e))
                })?;
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format)
                    .map_err(ResumeEvaluatorError::InvalidInput)?,
                None => config.output.format,
            };

            let started = Instant::now();
            let spinner = spinner("Extracting text...");

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_description = match (&job, job_text) {
                (Some(path), _) => Some(input_manager.extract_text(path).await?),
                (None, inline) => inline,
            };

            if resume_text.trim().is_empty() {
                warn!("No text could be extracted from {}", resume.display());
            }

            spinner.set_message("Analyzing resume...");
            let analyzer = ResumeAnalyzer::from_config(&config)?;
            let analysis = analyzer.analyze(&resume_text, job_description.as_deref());
            spinner.finish_and_clear();

            let metadata = ReportMetadata::new(
                resume.to_string_lossy(),
                job.as_ref().map(|p| p.to_string_lossy().to_string()),
                started.elapsed().as_millis() as u64,
            );
            let report = ResumeReport::new(analysis, config.scoring.clone(), metadata);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, output_format)?;

            let destination = match (save, output_format) {
                (Some(path), _) => Some(path),
                (None, OutputFormat::Pdf) => Some(PathBuf::from(suggest_filename(
                    output_format,
                    &resume.to_string_lossy(),
                    true,
                ))),
                (None, _) => None,
            };

            match destination {
                Some(path) => {
                    save_report(&rendered, &path)?;
                    info!("Report saved to {}", path.display());
                    println!("Report saved to {}", path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&rendered)?;
                    stdout.flush()?;
                }
            }
        }

        Commands::Keywords { file } => {
            let mut input_manager = InputManager::new();
            let text = input_manager.extract_text(&file).await?;
            let extractor = KeywordExtractor::from_config(&config.extraction)?;
            let keywords = extractor.extract(&text);

            println!("{} keywords in {}", keywords.len(), file.display());
            for keyword in &keywords {
                println!("  • {}", keyword);
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let rendered = toml::to_string_pretty(&config)
                        .map_err(|e| ResumeEvaluatorError::Configuration(e.to_string()))?;
                    println!("# {}\n", path.display());
                    println!("{}", rendered);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults at {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
