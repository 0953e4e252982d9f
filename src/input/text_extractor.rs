//! Text extraction from various file formats

use crate::error::{AnalyzerError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Reject extraction results that carry no text at all.
///
/// Image-only and encrypted PDFs commonly "succeed" with an empty string.
pub fn ensure_text(text: String, source: &Path) -> Result<String> {
    if text.trim().is_empty() {
        Err(AnalyzerError::ExtractionFailure(format!(
            "No text could be extracted from '{}'",
            source.display()
        )))
    } else {
        Ok(text)
    }
}

/// Extract the text layer of an in-memory PDF
pub fn extract_pdf_bytes(bytes: &[u8], source: &Path) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        AnalyzerError::ExtractionFailure(format!(
            "Failed to extract text from PDF '{}': {}",
            source.display(),
            e
        ))
    })?;
    ensure_text(text, source)
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(AnalyzerError::Io)?;
        extract_pdf_bytes(&bytes, path)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(AnalyzerError::Io)?;
        ensure_text(content, path)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(AnalyzerError::Io)?;
        ensure_text(Self::markdown_to_text(&markdown_content), path)
    }
}

impl MarkdownExtractor {
    /// Flatten markdown into plain text, one line per block
    pub fn markdown_to_text(markdown: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(text) | Event::Code(text) => current.push_str(&text),
                Event::SoftBreak | Event::HardBreak => current.push(' '),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => {
                    let line = current.trim().to_string();
                    if !line.is_empty() {
                        lines.push(line);
                    }
                    current.clear();
                }
                _ => {}
            }
        }

        let tail = current.trim();
        if !tail.is_empty() {
            lines.push(tail.to_string());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text_strips_formatting() {
        let markdown = "## Skills\n\n- **Rust** and `SQL`\n- Kubernetes\n";
        let text = MarkdownExtractor::markdown_to_text(markdown);

        assert!(text.contains("Skills"));
        assert!(text.contains("Rust and SQL"));
        assert!(text.contains("Kubernetes"));
        assert!(!text.contains("**"));
        assert!(!text.contains("##"));
    }

    #[test]
    fn test_ensure_text_rejects_whitespace() {
        let result = ensure_text("  \n\t ".to_string(), Path::new("scan.pdf"));
        assert!(matches!(result, Err(AnalyzerError::ExtractionFailure(_))));
    }

    #[test]
    fn test_malformed_pdf_is_extraction_failure() {
        let result = extract_pdf_bytes(b"definitely not a pdf", Path::new("broken.pdf"));
        assert!(matches!(result, Err(AnalyzerError::ExtractionFailure(_))));
    }
}
