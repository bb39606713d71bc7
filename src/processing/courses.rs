//! Course and skill recommendations driven by analysis keywords

use crate::config::RecommendationConfig;
use crate::error::{Result, ResumeScreenerError};
use crate::processing::scorer::AnalysisResult;
use log::debug;
use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../../resources/courses.toml");

pub const GENERAL_CATEGORY: &str = "General Career Development";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseCategory {
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub trigger_skills: Vec<String>,
    #[serde(default)]
    pub recommended_skills: Vec<String>,
    /// Contributes to the fallback list when no category matches
    #[serde(default)]
    pub general: bool,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseCatalog {
    #[serde(rename = "category")]
    pub categories: Vec<CourseCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub category: String,
    pub recommended_skills: Vec<String>,
    pub courses: Vec<Course>,
}

impl CourseCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ResumeScreenerError::Configuration(format!("Failed to parse course catalog: {}", e)))
    }
}

impl CourseCategory {
    fn matches(&self, analysis: &AnalysisResult) -> bool {
        self.keywords.iter().any(|k| analysis.keywords.contains(k))
            || self.trigger_skills.iter().any(|s| analysis.skills.contains(s))
    }
}

pub struct CourseRecommender {
    catalog: CourseCatalog,
    courses_per_category: usize,
    general_courses: usize,
}

impl CourseRecommender {
    pub fn new(config: &RecommendationConfig) -> Result<Self> {
        Ok(Self::with_catalog(CourseCatalog::builtin()?, config))
    }

    pub fn with_catalog(catalog: CourseCatalog, config: &RecommendationConfig) -> Self {
        Self {
            catalog,
            courses_per_category: config.courses_per_category,
            general_courses: config.general_courses,
        }
    }

    pub fn with_courses_per_category(mut self, count: usize) -> Self {
        self.courses_per_category = count;
        self
    }

    /// Suggest courses for every category the analysis touches, or a general
    /// list when it touches none.
    ///
    /// Which courses are shown is a rotation of each list seeded by the resume
    /// fingerprint, so the same resume always gets the same suggestions.
    pub fn recommend(&self, analysis: &AnalysisResult) -> Vec<CourseRecommendation> {
        let seed = rotation_seed(&analysis.fingerprint);

        let matched: Vec<CourseRecommendation> = self
            .catalog
            .categories
            .iter()
            .filter(|category| category.matches(analysis))
            .map(|category| CourseRecommendation {
                category: category.name.clone(),
                recommended_skills: category.recommended_skills.clone(),
                courses: rotate(&category.courses, seed, self.courses_per_category),
            })
            .collect();

        if !matched.is_empty() {
            debug!("Matched {} course categories", matched.len());
            return matched;
        }

        let general: Vec<Course> = self
            .catalog
            .categories
            .iter()
            .filter(|category| category.general)
            .flat_map(|category| category.courses.iter().cloned())
            .collect();

        vec![CourseRecommendation {
            category: GENERAL_CATEGORY.to_string(),
            recommended_skills: Vec::new(),
            courses: rotate(&general, seed, self.general_courses),
        }]
    }
}

fn rotation_seed(fingerprint: &str) -> usize {
    let prefix = fingerprint.get(..8).unwrap_or(fingerprint);
    usize::from_str_radix(prefix, 16).unwrap_or(0)
}

/// `count` distinct items starting at `seed`, wrapping around
fn rotate(courses: &[Course], seed: usize, count: usize) -> Vec<Course> {
    if courses.is_empty() {
        return Vec::new();
    }

    courses
        .iter()
        .cycle()
        .skip(seed % courses.len())
        .take(count.min(courses.len()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn analysis(keywords: &[&str], skills: &[&str], fingerprint: &str) -> AnalysisResult {
        AnalysisResult {
            match_score: 0.0,
            position: "Professional".to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            fingerprint: fingerprint.to_string(),
            warnings: Vec::new(),
        }
    }

    fn recommender() -> CourseRecommender {
        CourseRecommender::new(&Config::default().recommendations).unwrap()
    }

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = CourseCatalog::builtin().unwrap();

        assert_eq!(catalog.categories.len(), 5);
        assert!(catalog.categories.iter().all(|c| c.courses.len() >= 3));
    }

    #[test]
    fn test_keyword_match_selects_category() {
        let recommendations = recommender().recommend(&analysis(&["android", "kotlin"], &[], "00"));

        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].category, "Android Development");
        assert_eq!(recommendations[0].courses.len(), 3);
    }

    #[test]
    fn test_trigger_skill_selects_data_science() {
        let recommendations = recommender().recommend(&analysis(&["research"], &["pytorch"], "00"));

        assert_eq!(recommendations[0].category, "Data Science");
        assert!(recommendations[0]
            .recommended_skills
            .contains(&"Deep Learning".to_string()));
    }

    #[test]
    fn test_general_fallback() {
        let recommendations = recommender().recommend(&analysis(&["accounting"], &[], "ff"));

        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].category, GENERAL_CATEGORY);
        assert_eq!(recommendations[0].courses.len(), 5);
    }

    #[test]
    fn test_selection_follows_fingerprint() {
        let r = recommender();
        let first = r.recommend(&analysis(&["ux"], &[], "00000000"));
        let again = r.recommend(&analysis(&["ux"], &[], "00000000"));
        let other = r.recommend(&analysis(&["ux"], &[], "00000001"));

        assert_eq!(first, again);
        assert_ne!(first[0].courses[0], other[0].courses[0]);
    }

    #[test]
    fn test_rotate_wraps_without_duplicates() {
        let courses: Vec<Course> = (0..4)
            .map(|i| Course {
                name: format!("c{}", i),
                url: String::new(),
            })
            .collect();

        let picked = rotate(&courses, 3, 3);
        let names: Vec<&str> = picked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["c3", "c0", "c1"]);
        assert_eq!(rotate(&courses, 0, 10).len(), 4);
        assert!(rotate(&[], 5, 3).is_empty());
    }
}
