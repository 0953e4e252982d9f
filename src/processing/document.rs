//! Document structures

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub file_path: String,
    pub document_type: DocumentType,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Resume,
    JobDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub word_count: usize,
    pub character_count: usize,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Resume => write!(f, "Resume"),
            DocumentType::JobDescription => write!(f, "Job Description"),
        }
    }
}

impl Document {
    pub fn new(content: String, file_path: String, document_type: DocumentType) -> Self {
        let word_count = content.split_whitespace().count();
        let character_count = content.chars().count();

        let mut document = Self {
            content,
            file_path,
            document_type,
            metadata: DocumentMetadata {
                title: None,
                word_count,
                character_count,
            },
        };
        document.extract_title();
        document
    }

    /// In-memory document with no backing file
    pub fn from_text(content: &str, document_type: DocumentType) -> Self {
        Self::new(content.to_string(), String::new(), document_type)
    }

    pub fn word_count(&self) -> usize {
        self.metadata.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    /// Leading text with whitespace runs collapsed, cut at `max_chars` characters
    pub fn excerpt(&self, max_chars: usize) -> String {
        let collapsed = self.content.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= max_chars {
            return collapsed;
        }
        let mut excerpt: String = collapsed.chars().take(max_chars).collect();
        excerpt.push_str("...");
        excerpt
    }

    /// Extract the document title from the first few lines
    fn extract_title(&mut self) {
        for line in self.content.lines().take(5) {
            let trimmed = line.trim();
            if trimmed.len() > 5
                && trimmed.len() < 100
                && !trimmed.contains('@')
                && !trimmed.starts_with('-')
            {
                self.metadata.title = Some(trimmed.to_string());
                break;
            }
        }
    }
}
