//! Text processing, scoring and recommendation module

pub mod text_processor;
pub mod tfidf;
pub mod scorer;
pub mod completeness;
pub mod courses;
pub mod jobs;
pub mod analyzer;
