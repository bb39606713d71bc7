//! Output formatters for console, JSON and Markdown reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeScreenerError};
use crate::output::report::{ScreeningMode, ScreeningReport};
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Keywords shown in summaries; the full list is in detailed and JSON output
const SUMMARY_KEYWORDS: usize = 10;

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured consumers
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    formatters: Vec<Box<dyn OutputFormatter>>,
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
            _ => "░",
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

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            80..=100 => ("STRONG MATCH", Color::Green),
            60..=79 => ("GOOD", Color::BrightGreen),
            40..=59 => ("PARTIAL", Color::Yellow),
            20..=39 => ("WEAK", Color::BrightYellow),
            _ => ("POOR", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME SCREENING REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Analysis", 2));
        if report.mode == ScreeningMode::Screen {
            output.push_str(&format!(
                "JD Match Score: {:.2}% {}\n",
                analysis.match_score,
                self.format_score_badge(report.match_percentage())
            ));
        }
        output.push_str(&format!(
            "Position: {}\n",
            self.colorize(&analysis.position, Color::Cyan)
        ));

        let shown = if self.detailed { analysis.keywords.len() } else { SUMMARY_KEYWORDS };
        let keywords: Vec<&str> = analysis.keywords.iter().take(shown).map(String::as_str).collect();
        output.push_str(&format!("Top Keywords: {}\n", keywords.join(", ")));

        let skills: Vec<&str> = if self.detailed {
            analysis.skills.iter().map(String::as_str).collect()
        } else {
            analysis.skills.iter().take(SUMMARY_KEYWORDS).map(String::as_str).collect()
        };
        if !skills.is_empty() {
            output.push_str(&format!("Skills: {}\n", skills.join(", ")));
        }

        output.push_str(&format!(
            "Completeness: {}%{}\n",
            report.completeness.score,
            if report.completeness.missing.is_empty() {
                String::new()
            } else {
                format!(" (missing: {})", report.completeness.missing.join(", "))
            }
        ));

        if self.detailed {
            output.push_str(&format!("Fingerprint: {}\n", analysis.fingerprint));
        }

        for warning in &analysis.warnings {
            output.push_str(&format!("{} {}\n", self.colorize("warning:", Color::Yellow), warning));
        }

        if report.mode == ScreeningMode::Review {
            output.push_str(&self.format_header("Job Openings", 2));
            match &report.job_search {
                Some(query) => {
                    output.push_str(&format!(
                        "Search: \"{}\" with {} (posted {} to {})\n",
                        query.title,
                        query.keywords.join(" "),
                        query.window_start,
                        query.window_end
                    ));
                    output.push_str(&format!(
                        "Browse: {}\n",
                        self.colorize(&query.fallback_url, Color::Blue)
                    ));
                }
                None => output.push_str("No position or keywords extracted from resume\n"),
            }

            output.push_str(&self.format_header("Recommended Courses", 2));
            for recommendation in &report.courses {
                output.push_str(&format!(
                    "{}\n",
                    self.colorize(&recommendation.category, Color::Magenta)
                ));
                if !recommendation.recommended_skills.is_empty() {
                    output.push_str(&format!(
                        "  Skills to add: {}\n",
                        recommendation.recommended_skills.join(", ")
                    ));
                }
                for course in &recommendation.courses {
                    output.push_str(&format!("  • {} ({})\n", course.name, course.url));
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn file_name(path: &str) -> String {
        Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str("# Resume Screening Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!("**Resume:** `{}`", Self::file_name(&report.metadata.resume_file)));
            if let Some(job_file) = &report.metadata.job_file {
                output.push_str(&format!(" | **Job:** `{}`", Self::file_name(job_file)));
            }
            output.push_str("\n\n");
        }

        output.push_str("## Analysis\n\n");
        output.push_str("| Field | Value |\n");
        output.push_str("|-------|-------|\n");
        if report.mode == ScreeningMode::Screen {
            output.push_str(&format!("| JD Match Score | {:.2}% |\n", analysis.match_score));
        }
        output.push_str(&format!("| Position | {} |\n", analysis.position));
        output.push_str(&format!("| Completeness | {}% |\n", report.completeness.score));
        output.push_str(&format!("| Fingerprint | `{}` |\n\n", analysis.fingerprint));

        if !analysis.keywords.is_empty() {
            output.push_str(&format!("**Keywords:** `{}`\n\n", analysis.keywords.join("`, `")));
        }
        if !analysis.skills.is_empty() {
            output.push_str(&format!("**Skills:** {}\n\n", analysis.skills.join(", ")));
        }
        if !report.completeness.missing.is_empty() {
            output.push_str(&format!(
                "**Missing sections:** {}\n\n",
                report.completeness.missing.join(", ")
            ));
        }
        for warning in &analysis.warnings {
            output.push_str(&format!("> **Warning:** {}\n\n", warning));
        }

        if report.mode == ScreeningMode::Review {
            output.push_str("## Job Openings\n\n");
            match &report.job_search {
                Some(query) => output.push_str(&format!(
                    "Search for **{}** ({} to {}): [LinkedIn]({})\n\n",
                    query.title, query.window_start, query.window_end, query.fallback_url
                )),
                None => output.push_str("No position or keywords extracted from resume.\n\n"),
            }

            output.push_str("## Recommended Courses\n\n");
            for recommendation in &report.courses {
                output.push_str(&format!("### {}\n\n", recommendation.category));
                if !recommendation.recommended_skills.is_empty() {
                    output.push_str(&format!(
                        "Skills to add: {}\n\n",
                        recommendation.recommended_skills.join(", ")
                    ));
                }
                for course in &recommendation.courses {
                    output.push_str(&format!("- [{}]({})\n", course.name, course.url));
                }
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            formatters: vec![
                Box::new(ConsoleFormatter::new(use_colors, detailed)),
                Box::new(JsonFormatter::new(pretty_json)),
                Box::new(MarkdownFormatter::new(include_metadata)),
            ],
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        let formatter = self
            .formatters
            .iter()
            .find(|formatter| formatter.supports_format() == *format)
            .ok_or_else(|| ResumeScreenerError::OutputFormatting(format!("No formatter for {:?}", format)))?;

        formatter.format_report(report)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if file_path.is_dir() {
        return Err(ResumeScreenerError::OutputFormatting(format!(
            "Report path is a directory: {}",
            file_path.display()
        )));
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// A directory target gets a generated file name inside it
pub fn resolve_report_path(target: &Path, format: &OutputFormat, resume_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, resume_name, true))
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
        OutputFormat::Console => format!("{}_screening{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_screening{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_screening{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::analyzer::ScreeningEngine;
    use chrono::NaiveDate;

    const RESUME: &str = "Senior Data Scientist\nObjective: applied research\nSkills: Python, TensorFlow, SQL";

    fn screened() -> ScreeningReport {
        ScreeningEngine::new(&Config::default())
            .unwrap()
            .screen(RESUME, "data scientist with python", "cv.pdf", "role.txt")
            .unwrap()
    }

    fn reviewed() -> ScreeningReport {
        ScreeningEngine::new(&Config::default())
            .unwrap()
            .review(RESUME, "cv.docx", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .unwrap()
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&screened()).unwrap();

        assert!(output.contains("RESUME SCREENING REPORT"));
        assert!(output.contains("JD Match Score:"));
        assert!(output.contains("Position: Data Scientist"));
        assert!(output.contains("Fingerprint: "));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_review_console_lists_courses() {
        let output = ConsoleFormatter::new(false, false).format_report(&reviewed()).unwrap();

        assert!(!output.contains("JD Match Score"));
        assert!(output.contains("Recommended Courses"));
        assert!(output.contains("Data Science"));
        assert!(output.contains("linkedin.com/jobs/search"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = reviewed();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let parsed: ScreeningReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.analysis, report.analysis);
        assert_eq!(parsed.courses, report.courses);
    }

    #[test]
    fn test_markdown_sections() {
        let output = MarkdownFormatter::new(true).format_report(&screened()).unwrap();

        assert!(output.starts_with("# Resume Screening Report"));
        assert!(output.contains("**Resume:** `cv.pdf` | **Job:** `role.txt`"));
        assert!(output.contains("| Position | Data Scientist |"));
        assert!(!output.contains("## Recommended Courses"));
    }

    #[test]
    fn test_save_refuses_directory() {
        let dir = tempfile::tempdir().unwrap();

        let result = save_report_to_file("report", dir.path());
        assert!(matches!(result, Err(ResumeScreenerError::OutputFormatting(_))));
    }

    #[test]
    fn test_generator_dispatches_on_format() {
        let generator = ReportGenerator::with_options(false, false, false, false);
        let report = screened();

        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();

        assert!(json.starts_with('{'));
        assert!(markdown.starts_with("# Resume Screening Report"));
        assert!(!markdown.contains("**Generated:**"));
    }

    #[test]
    fn test_directory_target_gets_generated_name() {
        let dir = tempfile::tempdir().unwrap();

        let path = resolve_report_path(dir.path(), &OutputFormat::Json, "cv/jane.pdf");
        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("jane_screening_") && name.ends_with(".json"));

        let file = dir.path().join("out.md");
        assert_eq!(resolve_report_path(&file, &OutputFormat::Markdown, "cv.pdf"), file);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "/tmp/jane_doe.pdf", false),
            "jane_doe_screening.json"
        );
        assert_eq!(
            suggest_filename(&OutputFormat::Markdown, "cv.docx", false),
            "cv_screening.md"
        );
    }
}
