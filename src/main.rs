//! Resume screener: TF-IDF resume screening and job seeker guidance

use anyhow::{anyhow, Context};
use chrono::Local;
use clap::Parser;
use log::{debug, error, info, warn};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::input::InputManager;
use resume_screener::output::formatter::{resolve_report_path, save_report_to_file, ReportGenerator};
use resume_screener::output::report::ScreeningReport;
use resume_screener::processing::analyzer::ScreeningEngine;
use std::path::{Path, PathBuf};
use std::process;

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

    if let Err(e) = run_command(cli.command, cli.config, config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config_path: Option<PathBuf>, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Screen {
            resume,
            job,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS).map_err(|e| anyhow!(e))?;
            cli::validate_file_extension(&job, cli::JOB_EXTENSIONS).map_err(|e| anyhow!(e))?;
            let format = resolve_format(output.as_deref(), &config)?;

            info!("Screening {} against {}", resume.display(), job.display());

            let mut input_manager = InputManager::new()?.with_cache(config.extraction.enable_caching);
            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;
            let job_text = input_manager
                .extract_text(&job)
                .await
                .with_context(|| format!("Failed to read job description {}", job.display()))?;
            debug!(
                "Extracted {} resume and {} job description characters",
                resume_text.len(),
                job_text.len()
            );

            let engine = ScreeningEngine::new(&config)?;
            let report = engine.screen(
                &resume_text,
                &job_text,
                &resume.to_string_lossy(),
                &job.to_string_lossy(),
            )?;

            emit_report(&report, &config, format, detailed, save.as_deref())?;
        }

        Commands::Review {
            resume,
            courses,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS).map_err(|e| anyhow!(e))?;
            let format = resolve_format(output.as_deref(), &config)?;

            info!("Reviewing {}", resume.display());

            let mut input_manager = InputManager::new()?.with_cache(config.extraction.enable_caching);
            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;

            let mut engine = ScreeningEngine::new(&config)?;
            if let Some(count) = courses {
                engine = engine.with_courses_per_category(count);
            }
            let report = engine.review(&resume_text, &resume.to_string_lossy(), Local::now().date_naive())?;

            emit_report(&report, &config, format, detailed, save.as_deref())?;
        }

        Commands::Config { action } => {
            let path = config_path.clone().unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration ({})\n", path.display());
                    println!("Extraction cache: {}", config.extraction.enable_caching);
                    println!("Courses per category: {}", config.recommendations.courses_per_category);
                    println!("General courses: {}", config.recommendations.general_courses);
                    println!("Job window: {} days", config.recommendations.job_window_days);
                    println!("Job search keywords: {}", config.recommendations.job_search_keywords);
                    println!("Output format: {:?}", config.output.format);
                    println!("Detailed output: {}", config.output.detailed);
                    println!("Colored output: {}", config.output.color_output);
                }

                Some(ConfigAction::Reset) => {
                    let defaults = Config::default();
                    let saved = match &config_path {
                        Some(custom) => defaults.save_to(custom),
                        None => defaults.save(),
                    };
                    saved.with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Configuration reset to defaults at {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

/// Command line format wins over the configured one
fn resolve_format(requested: Option<&str>, config: &Config) -> anyhow::Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(|e| anyhow!(e)),
        None => Ok(config.output.format),
    }
}

fn emit_report(
    report: &ScreeningReport,
    config: &Config,
    format: OutputFormat,
    detailed: bool,
    save: Option<&Path>,
) -> anyhow::Result<()> {
    let detailed = detailed || config.output.detailed;
    let use_colors = config.output.color_output && save.is_none();
    let generator = ReportGenerator::with_options(use_colors, detailed, true, true);
    let content = generator.generate_report(report, &format)?;

    match save {
        Some(target) => {
            let path = resolve_report_path(target, &format, &report.metadata.resume_file);
            save_report_to_file(&content, &path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    for warning in &report.analysis.warnings {
        warn!("{}", warning);
    }

    Ok(())
}
