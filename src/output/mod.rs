//! Report rendering

pub mod formatter;

pub use formatter::{
    resolve_save_path, save_report_to_file, ConsoleFormatter, OutputFormatter, ReportGenerator,
};
