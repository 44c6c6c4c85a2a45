//! Dictionary skill matching against a fixed vocabulary

use crate::config::SkillListConfig;
use crate::error::{Result, ResumeEvaluatorError};
use crate::processing::round2;
use aho_corasick::AhoCorasick;
use log::debug;
use serde::{Deserialize, Serialize};

/// Overlap of listed skills between a resume and a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillListMatch {
    /// Listed skills found in both texts, in vocabulary order
    pub matched: Vec<String>,
    /// Listed skills found in the job description
    pub job_skill_count: usize,
    /// `matched / job skills * 100`, 0 when the job names no listed skill
    pub score: f64,
}

/// Finds vocabulary skills as plain substrings of lowercased text, so
/// "javascript" also reports "java".
pub struct SkillListMatcher {
    skills: Vec<String>,
    automaton: Option<AhoCorasick>,
}

impl SkillListMatcher {
    pub fn new(skills: Vec<String>) -> Result<Self> {
        if skills.iter().any(|skill| skill.is_empty()) {
            return Err(ResumeEvaluatorError::Configuration(
                "Skill list contains an empty entry".to_string(),
            ));
        }

        let mut unique: Vec<String> = Vec::with_capacity(skills.len());
        for skill in skills {
            if !unique.contains(&skill) {
                unique.push(skill);
            }
        }

        let automaton = if unique.is_empty() {
            None
        } else {
            Some(AhoCorasick::new(&unique).map_err(|e| {
                ResumeEvaluatorError::Configuration(format!(
                    "Failed to build skill list matcher: {}",
                    e
                ))
            })?)
        };

        Ok(Self {
            skills: unique,
            automaton,
        })
    }

    pub fn from_config(config: &SkillListConfig) -> Result<Self> {
        Self::new(config.skills.iter().map(|s| s.to_lowercase()).collect())
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Listed skills occurring anywhere in the text, in vocabulary order.
    pub fn find_skills(&self, text: &str) -> Vec<String> {
        let Some(automaton) = &self.automaton else {
            return Vec::new();
        };

        let lowered = text.to_lowercase();
        let mut found = vec![false; self.skills.len()];
        for m in automaton.find_overlapping_iter(&lowered) {
            found[m.pattern().as_usize()] = true;
        }

        self.skills
            .iter()
            .zip(found)
            .filter(|(_, hit)| *hit)
            .map(|(skill, _)| skill.clone())
            .collect()
    }

    pub fn compare(&self, resume_text: &str, job_text: &str) -> SkillListMatch {
        let job_skills = self.find_skills(job_text);
        let matched: Vec<String> = self
            .find_skills(resume_text)
            .into_iter()
            .filter(|skill| job_skills.contains(skill))
            .collect();

        let score = if job_skills.is_empty() {
            0.0
        } else {
            round2(matched.len() as f64 / job_skills.len() as f64 * 100.0)
        };
        debug!(
            "Skill list: {} of {} job skills matched",
            matched.len(),
            job_skills.len()
        );

        SkillListMatch {
            matched,
            job_skill_count: job_skills.len(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SkillListMatcher {
        SkillListMatcher::from_config(&SkillListConfig::default()).unwrap()
    }

    #[test]
    fn test_find_skills_in_vocabulary_order() {
        let skills = matcher().find_skills("Team lead. SQL, Python and Machine Learning; Excel");
        assert_eq!(skills, vec!["python", "sql", "machine learning", "excel"]);
    }

    #[test]
    fn test_substring_matches_overlap() {
        let skills = matcher().find_skills("JavaScript and HTML5/CSS3");
        assert_eq!(skills, vec!["java", "html", "css", "javascript"]);
    }

    #[test]
    fn test_compare_scores_against_job_skills() {
        let result = matcher().compare(
            "Python developer, strong communication",
            "Python, SQL and communication required",
        );
        assert_eq!(result.matched, vec!["python", "communication"]);
        assert_eq!(result.job_skill_count, 3);
        assert_eq!(result.score, 66.67);
    }

    #[test]
    fn test_job_without_listed_skills_scores_zero() {
        let result = matcher().compare("Python, SQL, Excel", "Kubernetes and Terraform");
        assert!(result.matched.is_empty());
        assert_eq!(result.job_skill_count, 0);
        assert_eq!(result.score, 0.0);

        assert_eq!(matcher().compare("Python", ""), SkillListMatch::default());
    }

    #[test]
    fn test_empty_vocabulary_finds_nothing() {
        let matcher = SkillListMatcher::new(Vec::new()).unwrap();
        assert!(matcher.find_skills("python").is_empty());
        assert_eq!(matcher.compare("python", "python").score, 0.0);
    }

    #[test]
    fn test_entries_lowercased_and_deduplicated() {
        let config = SkillListConfig {
            skills: vec!["Rust".to_string(), "rust".to_string(), "Go".to_string()],
        };
        let matcher = SkillListMatcher::from_config(&config).unwrap();
        assert_eq!(matcher.skills(), ["rust".to_string(), "go".to_string()]);
        assert_eq!(matcher.find_skills("RUST and Go"), vec!["rust", "go"]);
    }

    #[test]
    fn test_empty_entry_rejected() {
        assert!(SkillListMatcher::new(vec![String::new()]).is_err());
    }
}
