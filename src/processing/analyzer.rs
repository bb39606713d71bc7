//! Screening engine tying the scorer and the recommendation tables together

use crate::config::{Config, RecommendationConfig};
use crate::error::Result;
use crate::output::report::{ReportMetadata, ScreeningMode, ScreeningReport};
use crate::processing::completeness::ResumeCompleteness;
use crate::processing::courses::CourseRecommender;
use crate::processing::jobs::JobSearchQuery;
use crate::processing::scorer::RelevanceScorer;
use chrono::NaiveDate;
use log::info;
use std::time::Instant;

/// Runs the recruiter and job seeker flows over already extracted text
pub struct ScreeningEngine {
    scorer: RelevanceScorer,
    completeness: ResumeCompleteness,
    recommender: CourseRecommender,
    recommendations: RecommendationConfig,
}

impl ScreeningEngine {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            scorer: RelevanceScorer::new()?,
            completeness: ResumeCompleteness::new()?,
            recommender: CourseRecommender::new(&config.recommendations)?,
            recommendations: config.recommendations.clone(),
        })
    }

    pub fn with_courses_per_category(mut self, count: usize) -> Self {
        self.recommender = self.recommender.with_courses_per_category(count);
        self
    }

    /// Score a candidate's resume against a job description
    pub fn screen(
        &self,
        resume_text: &str,
        job_text: &str,
        resume_file: &str,
        job_file: &str,
    ) -> Result<ScreeningReport> {
        let start_time = Instant::now();

        let analysis = self.scorer.analyze(job_text, resume_text)?;
        let completeness = self.completeness.score(resume_text);

        info!(
            "Screened {}: {:.2}% match as {}",
            resume_file, analysis.match_score, analysis.position
        );

        Ok(ScreeningReport {
            mode: ScreeningMode::Screen,
            analysis,
            completeness,
            job_search: None,
            courses: Vec::new(),
            metadata: ReportMetadata::new(
                resume_file,
                Some(job_file),
                start_time.elapsed().as_millis() as u64,
            ),
        })
    }

    /// Analyze a job seeker's resume on its own and suggest next steps
    pub fn review(
        &self,
        resume_text: &str,
        resume_file: &str,
        uploaded_on: NaiveDate,
    ) -> Result<ScreeningReport> {
        let start_time = Instant::now();

        let analysis = self.scorer.analyze("", resume_text)?;
        let completeness = self.completeness.score(resume_text);
        let job_search = JobSearchQuery::build(
            &analysis.position,
            &analysis.keywords,
            uploaded_on,
            &self.recommendations,
        );
        let courses = self.recommender.recommend(&analysis);

        info!(
            "Reviewed {} as {}: {} course categories, completeness {}%",
            resume_file,
            analysis.position,
            courses.len(),
            completeness.score
        );

        Ok(ScreeningReport {
            mode: ScreeningMode::Review,
            analysis,
            completeness,
            job_search,
            courses,
            metadata: ReportMetadata::new(resume_file, None, start_time.elapsed().as_millis() as u64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumeScreenerError;

    const RESUME: &str = "Jane Roe\nJunior Android Developer\n\
                          Objective: ship delightful apps\n\
                          Skills: Kotlin, Java, Firebase\n\
                          Projects: offline-first notes app";

    fn engine() -> ScreeningEngine {
        ScreeningEngine::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_screen_fills_analysis_only() {
        let report = engine()
            .screen(RESUME, "Android developer with Kotlin", "jane.pdf", "jd.txt")
            .unwrap();

        assert_eq!(report.mode, ScreeningMode::Screen);
        assert!(report.analysis.match_score > 0.0);
        assert!(report.job_search.is_none());
        assert!(report.courses.is_empty());
        assert_eq!(report.completeness.score, 40);
        assert_eq!(report.metadata.job_file.as_deref(), Some("jd.txt"));
    }

    #[test]
    fn test_review_suggests_jobs_and_courses() {
        let uploaded = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let report = engine().review(RESUME, "jane.docx", uploaded).unwrap();

        assert_eq!(report.mode, ScreeningMode::Review);
        assert_eq!(report.analysis.match_score, 0.0);
        // The match starts at the line break, so the qualifier is part of the phrase
        assert_eq!(report.analysis.position, "Junior Android Developer");

        let job_search = report.job_search.expect("job search query");
        assert_eq!(job_search.title, "Junior Android Developer");
        assert_eq!(job_search.window_end, "20240520");

        assert!(report
            .courses
            .iter()
            .any(|c| c.category == "Android Development"));
    }

    #[test]
    fn test_empty_resume_rejected() {
        let result = engine().review("   ", "empty.txt", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert!(matches!(result, Err(ResumeScreenerError::NoInput)));
    }
}
