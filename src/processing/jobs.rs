//! Job search query preparation
//!
//! Builds the request a job-search backend would receive for a resume: a
//! cleaned position title, the leading keywords and a posting window that
//! ends on the upload date. No request is sent from here.

use crate::config::RecommendationConfig;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

const SEARCH_ENGINE: &str = "linkedin_jobs";
const LINKEDIN_SEARCH_URL: &str = "https://www.linkedin.com/jobs/search/?keywords=";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSearchQuery {
    pub title: String,
    pub keywords: Vec<String>,
    pub location: String,
    pub sort_by: String,
    /// `%Y%m%d`
    pub window_start: String,
    /// `%Y%m%d`
    pub window_end: String,
    pub fallback_url: String,
}

impl JobSearchQuery {
    /// `None` when there is no usable position or no keywords to search with
    pub fn build(
        position: &str,
        keywords: &[String],
        uploaded_on: NaiveDate,
        config: &RecommendationConfig,
    ) -> Option<Self> {
        if keywords.is_empty() {
            return None;
        }

        let title = clean_title(position);
        if title.is_empty() {
            return None;
        }

        let window_start = uploaded_on - Duration::days(config.job_window_days);
        let fallback_url = format!(
            "{}{}",
            LINKEDIN_SEARCH_URL,
            title.split_whitespace().collect::<Vec<_>>().join("%20")
        );

        Some(Self {
            keywords: keywords
                .iter()
                .take(config.job_search_keywords)
                .cloned()
                .collect(),
            location: "worldwide".to_string(),
            sort_by: "date".to_string(),
            window_start: window_start.format("%Y%m%d").to_string(),
            window_end: uploaded_on.format("%Y%m%d").to_string(),
            fallback_url,
            title,
        })
    }

    /// Request parameters in the job-search API's vocabulary, credentials excluded
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let range = format!("{}-{}", self.window_start, self.window_end);

        vec![
            ("engine", SEARCH_ENGINE.to_string()),
            ("q", format!("\"{}\"", self.title)),
            ("keywords", self.keywords.join(" ")),
            ("location", self.location.clone()),
            ("sort_by", self.sort_by.clone()),
            ("date_posted", range.clone()),
            ("chips", format!("date_posted_range:{}", range)),
        ]
    }
}

/// Keep ASCII letters and whitespace, trim, and title-case every word
fn clean_title(position: &str) -> String {
    let letters: String = position
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();

    let mut title = String::with_capacity(letters.len());
    let mut at_word_start = true;
    for c in letters.trim().chars() {
        if c.is_ascii_alphabetic() {
            if at_word_start {
                title.push(c.to_ascii_uppercase());
            } else {
                title.push(c.to_ascii_lowercase());
            }
            at_word_start = false;
        } else {
            title.push(c);
            at_word_start = true;
        }
    }

    title
}
