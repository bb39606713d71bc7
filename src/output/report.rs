//! Report structures handed to the formatters

use crate::processing::completeness::CompletenessScore;
use crate::processing::courses::CourseRecommendation;
use crate::processing::jobs::JobSearchQuery;
use crate::processing::scorer::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything produced for one resume upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub mode: ScreeningMode,

    /// Core relevance analysis
    pub analysis: AnalysisResult,

    /// Section-presence score of the resume
    pub completeness: CompletenessScore,

    /// Job search the candidate could run; review mode only
    pub job_search: Option<JobSearchQuery>,

    /// Suggested courses; review mode only
    pub courses: Vec<CourseRecommendation>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningMode {
    /// A recruiter scoring a candidate against a job description
    Screen,
    /// A job seeker reviewing their own resume
    Review,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub screener_version: String,
    pub resume_file: String,
    pub job_file: Option<String>,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(resume_file: &str, job_file: Option<&str>, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            screener_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.to_string(),
            job_file: job_file.map(String::from),
            processing_time_ms,
        }
    }
}

impl ScreeningReport {
    /// Match score as a whole percentage for badges
    pub fn match_percentage(&self) -> u8 {
        self.analysis.match_score.round().clamp(0.0, 100.0) as u8
    }
}
