//! Resume to job description relevance scoring
//!
//! [`RelevanceScorer::analyze`] is a pure function of its two inputs: it
//! infers the candidate's position and skills with fixed patterns, fits a
//! TF-IDF model over the job description and the resume, and ranks the
//! resulting keywords. Nothing here touches the filesystem or the network.

use crate::error::{Result, ResumeScreenerError};
use crate::processing::text_processor::TextProcessor;
use crate::processing::tfidf::{cosine_similarity, TfidfMatrix, TfidfVectorizer};
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

/// Position reported when no role phrase is found
pub const FALLBACK_POSITION: &str = "Professional";

pub const MAX_KEYWORDS: usize = 15;

/// Terms ranked ahead of everything else in the keyword list
pub const PRIORITY_TERMS: &[&str] = &[
    "developer", "scientist", "engineer", "designer", "android", "ios", "data",
    "machine", "ux", "ui", "mobile",
];

const POSITION_PATTERN: &str =
    r"(?i)\b(?:Senior|Junior)?\s*(.*?Developer|Data Scientist|UI Designer|Engineer)\b";
const SKILLS_PATTERN: &str = r"(?i)Skills:?\s*([\w\s,]+)(?:\n|$)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Job description match in percent, two decimals; 0 without a job description
    pub match_score: f64,
    pub position: String,
    pub keywords: Vec<String>,
    pub skills: Vec<String>,
    /// Lowercase hex SHA-256 of the raw resume text
    pub fingerprint: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AnalysisResult {
    pub fn has_job_match(&self) -> bool {
        self.match_score > 0.0
    }
}

pub struct RelevanceScorer {
    text_processor: TextProcessor,
    vectorizer: TfidfVectorizer,
    position_regex: Regex,
    skills_regex: Regex,
}

impl RelevanceScorer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            text_processor: TextProcessor::new()?,
            vectorizer: TfidfVectorizer::new()?,
            position_regex: Regex::new(POSITION_PATTERN)?,
            skills_regex: Regex::new(SKILLS_PATTERN)?,
        })
    }

    /// Score `resume_text` against `job_description`.
    ///
    /// A blank job description is valid and disables similarity scoring. A
    /// blank resume yields [`ResumeScreenerError::NoInput`]. An empty TF-IDF
    /// vocabulary does not fail the call: the result carries no keywords, a
    /// zero score and a warning.
    pub fn analyze(&self, job_description: &str, resume_text: &str) -> Result<AnalysisResult> {
        if resume_text.trim().is_empty() {
            return Err(ResumeScreenerError::NoInput);
        }

        let position = self.extract_position(resume_text);
        let skills = self.custom_keywords(position.as_deref(), resume_text);
        let fingerprint = fingerprint(resume_text);

        let include_job = !job_description.trim().is_empty();
        let mut documents = Vec::with_capacity(2);
        if include_job {
            documents.push(self.text_processor.filtered_document(job_description));
        }
        documents.push(self.text_processor.filtered_document(resume_text));

        let mut warnings = Vec::new();
        let (match_score, keywords) = match self.vectorizer.fit_transform(&documents) {
            Ok(matrix) => {
                let match_score = if include_job {
                    Self::match_score(&matrix)?
                } else {
                    0.0
                };
                let keywords = rank_keywords(&skills, matrix.vocabulary());
                (match_score, keywords)
            }
            Err(ResumeScreenerError::VectorizationFailed(reason)) => {
                warn!("Keyword extraction skipped: {}", reason);
                warnings.push(format!("Keyword extraction skipped: {}", reason));
                (0.0, Vec::new())
            }
            Err(e) => return Err(ResumeScreenerError::AnalysisFailed(e.to_string())),
        };

        debug!(
            "Analyzed resume {}: score {:.2}, {} keywords, {} skills",
            &fingerprint[..12],
            match_score,
            keywords.len(),
            skills.len()
        );

        Ok(AnalysisResult {
            match_score,
            position: position.unwrap_or_else(|| FALLBACK_POSITION.to_string()),
            keywords,
            skills,
            fingerprint,
            warnings,
        })
    }

    /// Job description is row 0, the resume row 1
    fn match_score(matrix: &TfidfMatrix) -> Result<f64> {
        let (job, resume) = match (matrix.row(0), matrix.row(1)) {
            (Some(job), Some(resume)) => (job, resume),
            _ => {
                return Err(ResumeScreenerError::AnalysisFailed(format!(
                    "expected two vectorized documents, found {}",
                    matrix.len()
                )))
            }
        };

        let similarity = cosine_similarity(job, resume)?;
        let percent = (similarity * 100.0 * 100.0).round() / 100.0;
        Ok(percent.clamp(0.0, 100.0))
    }

    /// First role phrase in the text, seniority qualifier excluded
    pub fn extract_position(&self, text: &str) -> Option<String> {
        self.position_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|position| !position.is_empty())
    }

    /// Tokens from the first "Skills:" line, lowercased, longer than two characters
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        self.skills_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| {
                m.as_str()
                    .replace(',', " ")
                    .split_whitespace()
                    .filter(|skill| skill.chars().count() > 2)
                    .map(str::to_lowercase)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn custom_keywords(&self, position: Option<&str>, text: &str) -> Vec<String> {
        let mut keywords: Vec<String> = position
            .map(|p| p.to_lowercase().split_whitespace().map(String::from).collect())
            .unwrap_or_default();
        keywords.extend(self.extract_skills(text));
        keywords
    }
}

/// Deduplicate custom and TF-IDF keywords, then order priority terms first,
/// custom keywords next and everything else alphabetically within each tier.
pub fn rank_keywords(custom_keywords: &[String], tfidf_keywords: &[String]) -> Vec<String> {
    let custom: HashSet<&str> = custom_keywords.iter().map(String::as_str).collect();

    let combined: BTreeSet<&str> = custom_keywords
        .iter()
        .chain(tfidf_keywords.iter())
        .map(String::as_str)
        .collect();

    // BTreeSet iterates alphabetically and the sort is stable
    let mut ranked: Vec<&str> = combined.into_iter().collect();
    ranked.sort_by_key(|keyword| Reverse((PRIORITY_TERMS.contains(keyword), custom.contains(keyword))));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(String::from)
        .collect()
}

/// Stable identity of a resume text
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
