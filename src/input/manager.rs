//! Input manager for handling different file types

use crate::error::{Result, ResumeScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    docx: DocxExtractor,
    markdown: MarkdownExtractor,
}

impl InputManager {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cache: HashMap::new(),
            enable_cache: true,
            docx: DocxExtractor::new()?,
            markdown: MarkdownExtractor::new()?,
        })
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = Self::detect_file_type(path)?;
        if !file_type.is_supported() {
            return Err(ResumeScreenerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        info!("Extracting {:?} text from: {}", file_type, path.display());
        let bytes = fs::read(path).await?;
        let text = self.extract_bytes(&bytes, file_type)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract text from an in-memory upload of a declared type
    pub fn extract_bytes(&self, bytes: &[u8], file_type: FileType) -> Result<String> {
        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract(bytes)?,
            FileType::Docx => self.docx.extract(bytes)?,
            FileType::Text => PlainTextExtractor.extract(bytes)?,
            FileType::Markdown => self.markdown.extract(bytes)?,
            FileType::Unknown => {
                return Err(ResumeScreenerError::UnsupportedFormat(
                    "cannot extract text from an unknown file type".to_string(),
                ));
            }
        };

        debug!("Extracted {} characters", text.chars().count());
        Ok(text)
    }

    fn detect_file_type(path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            ResumeScreenerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
