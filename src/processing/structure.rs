//! Resume section detection

use crate::config::StructureConfig;
use crate::error::{Result, ResumeEvaluatorError};
use crate::processing::round2;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct SectionRule {
    pub name: String,
    pub pattern: Regex,
    pub tip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCheck {
    pub name: String,
    pub present: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    /// Percentage of expected sections found
    pub score: f64,
    /// One entry per expected section, in configured order
    pub sections: Vec<SectionCheck>,
}

impl StructureReport {
    pub fn is_present(&self, name: &str) -> Option<bool> {
        self.sections.iter().find(|s| s.name == name).map(|s| s.present)
    }

    pub fn found_count(&self) -> usize {
        self.sections.iter().filter(|s| s.present).count()
    }

    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().filter(|s| !s.present).map(|s| s.name.as_str())
    }
}

pub struct StructureEvaluator {
    rules: Vec<SectionRule>,
    /// Rule indices in the order tips are emitted
    tip_order: Vec<usize>,
    complete_tip: String,
}

impl StructureEvaluator {
    pub fn new(rules: Vec<SectionRule>, complete_tip: impl Into<String>) -> Self {
        Self {
            tip_order: (0..rules.len()).collect(),
            rules,
            complete_tip: complete_tip.into(),
        }
    }

    /// Emit tips for the named sections first, in the given order. Sections
    /// not named keep their rule order after them.
    pub fn with_tip_order<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self> {
        let mut order = Vec::with_capacity(self.rules.len());
        for name in names {
            let name = name.as_ref();
            let index = self
                .rules
                .iter()
                .position(|rule| rule.name == name)
                .ok_or_else(|| {
                    ResumeEvaluatorError::Configuration(format!(
                        "Tip order names unknown section '{}'",
                        name
                    ))
                })?;
            if !order.contains(&index) {
                order.push(index);
            }
        }
        for index in 0..self.rules.len() {
            if !order.contains(&index) {
                order.push(index);
            }
        }

        self.tip_order = order;
        Ok(self)
    }

    pub fn from_config(config: &StructureConfig) -> Result<Self> {
        let rules = config
            .sections
            .iter()
            .map(|section| -> Result<SectionRule> {
                let pattern = RegexBuilder::new(&section.pattern)
                    .case_insensitive(true)
                    .build()?;
                Ok(SectionRule {
                    name: section.name.clone(),
                    pattern,
                    tip: section.tip.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(rules, config.complete_tip.clone()).with_tip_order(&config.tip_order)
    }

    pub fn evaluate(&self, text: &str) -> StructureReport {
        let sections: Vec<SectionCheck> = self
            .rules
            .iter()
            .map(|rule| SectionCheck {
                name: rule.name.clone(),
                present: rule.pattern.is_match(text),
            })
            .collect();

        let found = sections.iter().filter(|s| s.present).count();
        let score = if sections.is_empty() {
            0.0
        } else {
            round2(found as f64 / sections.len() as f64 * 100.0)
        };

        StructureReport { score, sections }
    }

    /// One tip per missing section in tip order, or a single compliment when
    /// none is missing.
    pub fn tips(&self, report: &StructureReport) -> Vec<String> {
        let tips: Vec<String> = self
            .tip_order
            .iter()
            .map(|&index| &self.rules[index])
            .filter(|rule| report.is_present(&rule.name) == Some(false))
            .map(|rule| rule.tip.clone())
            .collect();

        if tips.is_empty() {
            vec![self.complete_tip.clone()]
        } else {
            tips
        }
    }
}
