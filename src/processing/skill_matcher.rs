//! Resume vs job-description skill comparison

use crate::processing::keyword_extractor::{KeywordExtractor, KeywordSet};
use crate::processing::round2;
use log::debug;
use serde::{Deserialize, Serialize};

/// Outcome of comparing two keyword sets.
///
/// `matched` and `missing` partition the job-description keywords;
/// `match_score` is the matched share of them as a percentage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: KeywordSet,
    pub missing: KeywordSet,
    pub match_score: f64,
}

impl MatchResult {
    /// Result used when no job description was supplied.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_sets(resume: &KeywordSet, job: &KeywordSet) -> Self {
        let matched: KeywordSet = resume.intersection(job).cloned().collect();
        let missing: KeywordSet = job.difference(resume).cloned().collect();

        let match_score = if job.is_empty() {
            0.0
        } else {
            round2(matched.len() as f64 / job.len() as f64 * 100.0)
        };

        Self {
            matched,
            missing,
            match_score,
        }
    }

    /// Number of keywords the job description asked for.
    pub fn job_keyword_count(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

pub struct SkillMatcher {
    extractor: KeywordExtractor,
}

impl SkillMatcher {
    pub fn new(extractor: KeywordExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    pub fn extractor_mut(&mut self) -> &mut KeywordExtractor {
        &mut self.extractor
    }

    pub fn compare(&self, resume_text: &str, job_text: &str) -> MatchResult {
        let resume_keywords = self.extractor.extract(resume_text);
        let job_keywords = self.extractor.extract(job_text);
        debug!(
            "Comparing {} resume keywords against {} job keywords",
            resume_keywords.len(),
            job_keywords.len()
        );

        MatchResult::from_sets(&resume_keywords, &job_keywords)
    }
}
