//! Career suggestions for missing skills

use crate::config::SuggestionConfig;
use crate::error::{Result, ResumeEvaluatorError};
use crate::processing::keyword_extractor::KeywordSet;
use aho_corasick::AhoCorasick;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRule {
    pub trigger: String,
    pub advice: String,
}

/// Maps missing skills to canned advice.
///
/// Rules are checked in priority order and only the first rule whose
/// trigger is a substring of a skill fires for that skill.
pub struct SuggestionGenerator {
    rules: Vec<SuggestionRule>,
    triggers: Option<AhoCorasick>,
    fallback: String,
}

impl SuggestionGenerator {
    pub fn new(rules: Vec<SuggestionRule>, fallback: impl Into<String>) -> Result<Self> {
        if let Some(rule) = rules.iter().find(|r| r.trigger.is_empty()) {
            return Err(ResumeEvaluatorError::Configuration(format!(
                "Suggestion rule with advice '{}' has an empty trigger",
                rule.advice
            )));
        }

        let triggers = if rules.is_empty() {
            None
        } else {
            let patterns: Vec<&str> = rules.iter().map(|r| r.trigger.as_str()).collect();
            Some(AhoCorasick::new(&patterns).map_err(|e| {
                ResumeEvaluatorError::Configuration(format!(
                    "Failed to build suggestion matcher: {}",
                    e
                ))
            })?)
        };

        Ok(Self {
            rules,
            triggers,
            fallback: fallback.into(),
        })
    }

    pub fn from_config(config: &SuggestionConfig) -> Result<Self> {
        let rules = config
            .rules
            .iter()
            .map(|r| SuggestionRule {
                trigger: r.trigger.to_lowercase(),
                advice: r.advice.clone(),
            })
            .collect();

        Self::new(rules, config.fallback.clone())
    }

    /// Advice for the given missing skills, de-duplicated. Falls back to a
    /// single encouragement when no rule fires.
    pub fn suggest(&self, missing: &KeywordSet) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();

        for skill in missing {
            if let Some(rule) = self.first_rule_for(skill) {
                if seen.insert(rule.advice.as_str()) {
                    suggestions.push(rule.advice.clone());
                }
            }
        }

        if suggestions.is_empty() {
            suggestions.push(self.fallback.clone());
        }

        suggestions
    }

    fn first_rule_for(&self, skill: &str) -> Option<&SuggestionRule> {
        let triggers = self.triggers.as_ref()?;
        triggers
            .find_overlapping_iter(skill)
            .map(|m| m.pattern().as_usize())
            .min()
            .map(|index| &self.rules[index])
    }
}
