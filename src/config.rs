//! Configuration management for the resume screener

use crate::error::{Result, ResumeScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub recommendations: RecommendationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionConfig {
    pub enable_caching: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationConfig {
    /// Courses listed for every matched category
    pub courses_per_category: usize,
    /// Courses listed when no category matches
    pub general_courses: usize,
    pub job_window_days: i64,
    pub job_search_keywords: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig {
                enable_caching: true,
            },
            recommendations: RecommendationConfig {
                courses_per_category: 3,
                general_courses: 5,
                job_window_days: 7,
                job_search_keywords: 5,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.recommendations.job_window_days < 1 {
            return Err(ResumeScreenerError::Configuration(
                "recommendations.job_window_days must be at least 1".to_string(),
            ));
        }
        if self.recommendations.courses_per_category == 0 {
            return Err(ResumeScreenerError::Configuration(
                "recommendations.courses_per_category must be at least 1".to_string(),
            ));
        }
        if self.recommendations.general_courses == 0 {
            return Err(ResumeScreenerError::Configuration(
                "recommendations.general_courses must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
