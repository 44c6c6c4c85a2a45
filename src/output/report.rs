//! Report structures wrapping an analysis with run metadata

use crate::config::ScoringConfig;
use crate::processing::analyzer::ResumeAnalysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete evaluation report handed to the formatters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeReport {
    /// Headline verdict derived from the total score
    pub summary: ReportSummary,

    /// Component weights used for the total
    pub weights: ScoringConfig,

    /// Full analysis result
    pub analysis: ResumeAnalysis,

    /// Report metadata and generation info
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_score: f64,
    pub rating: ScoreRating,
    pub verdict: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,

    /// Version of the evaluator that produced the report
    pub evaluator_version: String,

    pub resume_file: String,

    /// `None` when no job description was supplied or it was given inline
    pub job_file: Option<String>,

    pub processing_time_ms: u64,
}

impl ScoreRating {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 85.0 => ScoreRating::Excellent,
            s if s >= 70.0 => ScoreRating::Good,
            s if s >= 50.0 => ScoreRating::Fair,
            _ => ScoreRating::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreRating::Excellent => "Excellent",
            ScoreRating::Good => "Good",
            ScoreRating::Fair => "Fair",
            ScoreRating::Poor => "Needs Work",
        }
    }

    fn verdict(&self) -> &'static str {
        match self {
            ScoreRating::Excellent => "Strong resume. Polish the details and send it out.",
            ScoreRating::Good => "Solid resume with a few gaps worth closing.",
            ScoreRating::Fair => "Reasonable base, but several areas need attention.",
            ScoreRating::Poor => "Significant revision recommended before applying.",
        }
    }
}

impl ResumeReport {
    pub fn new(analysis: ResumeAnalysis, weights: ScoringConfig, metadata: ReportMetadata) -> Self {
        let rating = ScoreRating::from_score(analysis.total_score);
        Self {
            summary: ReportSummary {
                total_score: analysis.total_score,
                rating,
                verdict: rating.verdict().to_string(),
            },
            weights,
            analysis,
            metadata,
        }
    }

    /// Generation time formatted for display.
    pub fn generated_at_display(&self) -> String {
        self.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    pub fn resume_name(&self) -> String {
        display_name(&self.metadata.resume_file)
    }

    pub fn job_name(&self) -> String {
        match &self.metadata.job_file {
            Some(file) => display_name(file),
            None if self.analysis.job_description_provided => "inline text".to_string(),
            None => "none".to_string(),
        }
    }
}

impl ReportMetadata {
    pub fn new(
        resume_file: impl Into<String>,
        job_file: Option<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            evaluator_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.into(),
            job_file,
            processing_time_ms,
        }
    }
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(ScoreRating::from_score(92.0), ScoreRating::Excellent);
        assert_eq!(ScoreRating::from_score(85.0), ScoreRating::Excellent);
        assert_eq!(ScoreRating::from_score(70.0), ScoreRating::Good);
        assert_eq!(ScoreRating::from_score(69.99), ScoreRating::Fair);
        assert_eq!(ScoreRating::from_score(12.0), ScoreRating::Poor);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(display_name("/home/me/cv/resume.pdf"), "resume.pdf");
        assert_eq!(display_name("resume.txt"), "resume.txt");
        assert_eq!(display_name(""), "");
    }
}
