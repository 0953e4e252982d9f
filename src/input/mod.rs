//! Document input: file type detection and text extraction

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use file_detector::{FileType, SUPPORTED_EXTENSIONS};
pub use manager::InputManager;
