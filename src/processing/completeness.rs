//! Section-presence score for a resume

use crate::error::{Result, ResumeScreenerError};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

/// Sections worth `POINTS_PER_SECTION` each when their heading appears
pub const SCORED_SECTIONS: &[&str] = &["Objective", "Declaration", "Hobbies", "Achievements", "Projects"];

const POINTS_PER_SECTION: u8 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessScore {
    pub score: u8,
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

pub struct ResumeCompleteness {
    matcher: AhoCorasick,
}

impl ResumeCompleteness {
    pub fn new() -> Result<Self> {
        // Headings are matched case-sensitively, as they are written on a resume
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(SCORED_SECTIONS)
            .map_err(|e| ResumeScreenerError::AnalysisFailed(format!("Failed to build section matcher: {}", e)))?;

        Ok(Self { matcher })
    }

    pub fn score(&self, text: &str) -> CompletenessScore {
        let mut found = [false; SCORED_SECTIONS.len()];
        for mat in self.matcher.find_iter(text) {
            found[mat.pattern().as_usize()] = true;
        }

        let (present, missing): (Vec<_>, Vec<_>) = SCORED_SECTIONS
            .iter()
            .zip(found.iter())
            .partition(|&(_, &hit)| hit);

        let present: Vec<String> = present.into_iter().map(|(s, _)| s.to_string()).collect();
        let missing: Vec<String> = missing.into_iter().map(|(s, _)| s.to_string()).collect();

        CompletenessScore {
            score: POINTS_PER_SECTION * present.len() as u8,
            present,
            missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_resume_scores_hundred() {
        let completeness = ResumeCompleteness::new().unwrap();
        let text = "Objective\n...\nProjects\n...\nAchievements\n...\nHobbies\n...\nDeclaration\n...";

        let score = completeness.score(text);
        assert_eq!(score.score, 100);
        assert!(score.missing.is_empty());
    }

    #[test]
    fn test_partial_resume() {
        let completeness = ResumeCompleteness::new().unwrap();
        let score = completeness.score("Career Objective: build things\nProjects: resume-screener\nprojects again");

        assert_eq!(score.score, 40);
        assert_eq!(score.present, vec!["Objective", "Projects"]);
        assert_eq!(score.missing, vec!["Declaration", "Hobbies", "Achievements"]);
    }

    #[test]
    fn test_headings_are_case_sensitive() {
        let completeness = ResumeCompleteness::new().unwrap();

        assert_eq!(completeness.score("my hobbies include chess").score, 0);
    }
}
