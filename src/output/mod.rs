//! Report assembly and rendering

pub mod formatter;
pub mod report;

pub use formatter::{save_report, suggest_filename, OutputFormatter, ReportGenerator};
pub use report::{ReportMetadata, ResumeReport};
