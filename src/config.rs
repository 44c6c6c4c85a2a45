//! Configuration management for the resume evaluator

use crate::error::{Result, ResumeEvaluatorError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub skill_list: SkillListConfig,
    pub structure: StructureConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

/// Tables driving keyword extraction and skill normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Generic words dropped from every extracted keyword set
    pub noise_words: Vec<String>,
    /// Words that open a skill clause, tried in order
    pub trigger_words: Vec<String>,
    /// Words removed from captured clause fragments
    pub strip_words: Vec<String>,
    /// Raw surface form -> canonical skill spelling
    pub normalization: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    pub fallback: String,
    pub rules: Vec<SuggestionRuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRuleConfig {
    pub trigger: String,
    pub advice: String,
}

/// Fixed skill vocabulary for the dictionary match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillListConfig {
    /// Lowercase skills searched for as substrings, reported in this order
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureConfig {
    pub complete_tip: String,
    /// Section names in the order their tips are shown
    #[serde(default)]
    pub tip_order: Vec<String>,
    pub sections: Vec<SectionRuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRuleConfig {
    pub name: String,
    /// Case-insensitive regular expression that marks the section as present
    pub pattern: String,
    /// Advice shown when the section is missing
    pub tip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub grammar_weight: f64,
    pub readability_weight: f64,
    pub structure_weight: f64,
    pub skill_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
    Pdf,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let normalization = [
            ("cpp", "c++"),
            ("c plus plus", "c++"),
            ("python3", "python"),
            ("py", "python"),
            ("js", "javascript"),
            ("nodejs", "node.js"),
            ("reactjs", "react"),
            ("react.js", "react"),
            ("html5", "html"),
            ("css3", "css"),
            ("sql database", "sql"),
            ("structured query language", "sql"),
            ("ml", "machine learning"),
            ("dl", "deep learning"),
            ("ai", "artificial intelligence"),
            ("team work", "teamwork"),
            ("comm", "communication"),
            ("lead", "leadership"),
        ]
        .iter()
        .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
        .collect();

        Self {
            noise_words: to_strings(&[
                "experience",
                "skills",
                "candidate",
                "candidates",
                "knowledge",
                "requirement",
            ]),
            trigger_words: to_strings(&[
                "skills",
                "skill",
                "experience",
                "proficient",
                "knowledge",
                "expertise",
                "looking for",
                "familiar",
                "candidate",
                "candidates",
                "skilled",
            ]),
            strip_words: to_strings(&[
                "candidates",
                "candidate",
                "skilled",
                "looking",
                "for",
                "in",
                "with",
            ]),
            normalization,
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        let rules = [
            (
                "python",
                "Take an advanced Python course on data analysis or web frameworks.",
            ),
            ("java", "Enhance your Java OOP and Spring Boot development skills."),
            ("sql", "Practice writing complex SQL joins and queries."),
            ("machine learning", "Learn ML libraries like scikit-learn or TensorFlow."),
            ("communication", "Join communication and soft skills workshops."),
            ("c++", "Brush up on C++ data structures and STL concepts."),
        ]
        .iter()
        .map(|(trigger, advice)| SuggestionRuleConfig {
            trigger: trigger.to_string(),
            advice: advice.to_string(),
        })
        .collect();

        Self {
            fallback: "You're doing great! Keep updating your resume with new certifications."
                .to_string(),
            rules,
        }
    }
}

impl Default for SkillListConfig {
    fn default() -> Self {
        Self {
            skills: to_strings(&[
                "python",
                "java",
                "c++",
                "sql",
                "html",
                "css",
                "javascript",
                "machine learning",
                "deep learning",
                "data analysis",
                "excel",
                "communication",
                "leadership",
                "teamwork",
            ]),
        }
    }
}

impl Default for StructureConfig {
    fn default() -> Self {
        let sections = [
            (
                "summary",
                "summary|objective|profile",
                "Add a short professional summary at the beginning.",
            ),
            (
                "education",
                "education|qualification|academics",
                "Make sure your education section has degrees and dates.",
            ),
            (
                "experience",
                "experience|work history|employment",
                "Include work or internship experience with measurable results.",
            ),
            (
                "projects",
                "project|portfolio",
                "Add academic or personal projects to showcase your work.",
            ),
            (
                "skills",
                "skills|technical skills|proficiency",
                "Include a skills section with both technical and soft skills.",
            ),
        ]
        .iter()
        .map(|(name, pattern, tip)| SectionRuleConfig {
            name: name.to_string(),
            pattern: pattern.to_string(),
            tip: tip.to_string(),
        })
        .collect();

        Self {
            complete_tip: "Your resume structure looks great!".to_string(),
            tip_order: to_strings(&["summary", "skills", "projects", "experience", "education"]),
            sections,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            grammar_weight: 0.3,
            readability_weight: 0.2,
            structure_weight: 0.3,
            skill_weight: 0.2,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            suggestions: SuggestionConfig::default(),
            skill_list: SkillListConfig::default(),
            structure: StructureConfig::default(),
            scoring: ScoringConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl ScoringConfig {
    pub fn total_weight(&self) -> f64 {
        self.grammar_weight + self.readability_weight + self.structure_weight + self.skill_weight
    }
}

impl Config {
    /// Load the user configuration, writing the defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load an explicit configuration file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ResumeEvaluatorError::Configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ResumeEvaluatorError::Configuration(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeEvaluatorError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-evaluator")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("grammar_weight", self.scoring.grammar_weight),
            ("readability_weight", self.scoring.readability_weight),
            ("structure_weight", self.scoring.structure_weight),
            ("skill_weight", self.scoring.skill_weight),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ResumeEvaluatorError::Configuration(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        if self.scoring.total_weight() <= 0.0 {
            return Err(ResumeEvaluatorError::Configuration(
                "At least one scoring weight must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
