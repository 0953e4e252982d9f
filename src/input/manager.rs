//! Loads resumes and job descriptions from disk into `Document`s

use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::processing::document::{Document, DocumentType};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    /// Extracted text keyed by source path
    cache: HashMap<PathBuf, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Extract plain text from a PDF, text or markdown file.
    ///
    /// Blank output is an `ExtractionFailure` and is never cached.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if let Some(cached) = self.cache.get(path) {
            debug!("Using cached text for: {}", path.display());
            return Ok(cached.clone());
        }

        if !path.exists() {
            return Err(AnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path).ok_or_else(|| {
            AnalyzerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await?,
            FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => MarkdownExtractor.extract(path).await?,
            FileType::Unknown => {
                return Err(AnalyzerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };
        info!(
            "Extracted {} characters from {:?} file {}",
            text.len(),
            file_type,
            path.display()
        );

        self.cache.insert(path.to_path_buf(), text.clone());

        Ok(text)
    }

    pub async fn load_document(
        &mut self,
        path: &Path,
        document_type: DocumentType,
    ) -> Result<Document> {
        let text = self.extract_text(path).await?;
        Ok(Document::new(text, path.to_string_lossy().to_string(), document_type))
    }

    /// Load the resume first; a failure on either side ends the pair
    pub async fn load_pair(&mut self, resume: &Path, job: &Path) -> Result<(Document, Document)> {
        let resume = self.load_document(resume, DocumentType::Resume).await?;
        let job = self.load_document(job, DocumentType::JobDescription).await?;
        Ok((resume, job))
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
