//! Text processing and matching

pub mod analyzer;
pub mod document;
pub mod keywords;
pub mod similarity;
pub mod skills;
pub mod tagger;
