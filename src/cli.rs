//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::Path;
use std::path::PathBuf;

/// File types a resume may be uploaded as
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md"];

/// File types a job description may be read from
pub const JOB_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md"];

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(version)]
#[command(about = "Resume screening and job description matching")]
#[command(long_about = "Score resumes against job descriptions with TF-IDF similarity, extract keywords and skills, and suggest jobs and courses to job seekers")]
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
    /// Score a resume against a job description (recruiter flow)
    Screen {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show every keyword, skill and the fingerprint
        #[arg(short, long)]
        detailed: bool,
    },

    /// Review a resume on its own with job and course suggestions (job seeker flow)
    Review {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Courses to suggest per matched category
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        courses: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show every keyword, skill and the fingerprint
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show or reset configuration
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
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_screen_command() {
        let cli = Cli::try_parse_from([
            "resume-screener",
            "screen",
            "--resume",
            "cv.pdf",
            "--job",
            "jd.txt",
            "-o",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Screen { resume, job, output, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(job, PathBuf::from("jd.txt"));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected screen command"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.DOCX"), RESUME_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.rtf"), RESUME_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("README"), RESUME_EXTENSIONS).is_err());
    }

    #[test]
    fn test_zero_courses_rejected() {
        let parsed = Cli::try_parse_from(["resume-screener", "review", "--resume", "cv.pdf", "--courses", "0"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from(["resume-screener", "review", "--resume", "cv.pdf", "--courses", "2"]).unwrap();
        match cli.command {
            Commands::Review { courses, .. } => assert_eq!(courses, Some(2)),
            _ => panic!("expected review command"),
        }
    }
}
