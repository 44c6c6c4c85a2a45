//! Resume analysis engine combining grammar, readability, structure and skill matching

use crate::config::{Config, ScoringConfig};
use crate::error::{Result, ResumeEvaluatorError};
use crate::processing::keyword_extractor::KeywordExtractor;
use crate::processing::quality::{
    clamp_percentage, word_count, FleschReadingEase, GrammarAssessment, GrammarChecker,
    ReadabilityScorer, RuleBasedGrammarChecker,
};
use crate::processing::round2;
use crate::processing::skill_list::{SkillListMatch, SkillListMatcher};
use crate::processing::skill_matcher::{MatchResult, SkillMatcher};
use crate::processing::structure::{StructureEvaluator, StructureReport};
use crate::processing::suggestions::SuggestionGenerator;
use crate::processing::tagger::PosTagger;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Everything computed for one resume and optional job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    /// Weighted blend of the component scores (0-100)
    pub total_score: f64,
    pub grammar: GrammarAssessment,
    /// Raw readability metric, not clamped
    pub readability_score: f64,
    pub structure: StructureReport,
    pub structure_tips: Vec<String>,
    pub job_description_provided: bool,
    pub skill_match: MatchResult,
    /// Overlap on the fixed skill vocabulary; informational, not part of the total
    pub skill_list_match: SkillListMatch,
    pub suggestions: Vec<String>,
}

pub struct ResumeAnalyzer {
    matcher: SkillMatcher,
    skill_list: SkillListMatcher,
    suggestions: SuggestionGenerator,
    structure: StructureEvaluator,
    grammar: Box<dyn GrammarChecker>,
    readability: Box<dyn ReadabilityScorer>,
    weights: ScoringConfig,
}

impl ResumeAnalyzer {
    pub fn new(
        matcher: SkillMatcher,
        suggestions: SuggestionGenerator,
        structure: StructureEvaluator,
        weights: ScoringConfig,
    ) -> Result<Self> {
        if weights.total_weight() <= 0.0 || !weights.total_weight().is_finite() {
            return Err(ResumeEvaluatorError::Configuration(
                "Scoring weights must sum to a positive number".to_string(),
            ));
        }

        Ok(Self {
            matcher,
            skill_list: SkillListMatcher::new(Vec::new())?,
            suggestions,
            structure,
            grammar: Box::new(RuleBasedGrammarChecker::new()),
            readability: Box::new(FleschReadingEase::new()),
            weights,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let extractor = KeywordExtractor::from_config(&config.extraction)?;
        let suggestions = SuggestionGenerator::from_config(&config.suggestions)?;
        let structure = StructureEvaluator::from_config(&config.structure)?;

        let skill_list = SkillListMatcher::from_config(&config.skill_list)?;

        Ok(Self::new(
            SkillMatcher::new(extractor),
            suggestions,
            structure,
            config.scoring.clone(),
        )?
        .with_skill_list(skill_list))
    }

    pub fn with_skill_list(mut self, skill_list: SkillListMatcher) -> Self {
        self.skill_list = skill_list;
        self
    }

    pub fn with_grammar_checker(mut self, grammar: Box<dyn GrammarChecker>) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn with_readability_scorer(mut self, readability: Box<dyn ReadabilityScorer>) -> Self {
        self.readability = readability;
        self
    }

    pub fn with_tagger(mut self, tagger: Box<dyn PosTagger>) -> Self {
        self.matcher.extractor_mut().set_tagger(tagger);
        self
    }

    pub fn matcher(&self) -> &SkillMatcher {
        &self.matcher
    }

    /// Score a resume, optionally against a job description. A missing or
    /// blank job description yields an empty skill match.
    pub fn analyze(&self, resume_text: &str, job_text: Option<&str>) -> ResumeAnalysis {
        info!("Analyzing resume ({} characters)", resume_text.len());

        let words = word_count(resume_text);
        let issues = self.grammar.count_issues(resume_text);
        let grammar = GrammarAssessment::new(issues, words);
        debug!("Grammar: {} issues over {} words", issues, words);

        let readability_score = self.readability.score(resume_text);

        let structure = self.structure.evaluate(resume_text);
        let structure_tips = self.structure.tips(&structure);

        let job_text = job_text.filter(|jd| !jd.trim().is_empty());
        let skill_match = match job_text {
            Some(jd) => self.matcher.compare(resume_text, jd),
            None => MatchResult::empty(),
        };
        let skill_list_match = self
            .skill_list
            .compare(resume_text, job_text.unwrap_or_default());
        let suggestions = self.suggestions.suggest(&skill_match.missing);

        let total_score = self.total_score(
            grammar.score,
            readability_score,
            structure.score,
            skill_match.match_score,
        );
        info!("Total resume score: {:.2}", total_score);

        ResumeAnalysis {
            total_score,
            grammar,
            readability_score,
            structure,
            structure_tips,
            job_description_provided: job_text.is_some(),
            skill_match,
            skill_list_match,
            suggestions,
        }
    }

    /// Weighted mean of the component scores, readability clamped to [0, 100].
    pub fn total_score(&self, grammar: f64, readability: f64, structure: f64, skills: f64) -> f64 {
        let w = &self.weights;
        let blended = w.grammar_weight * clamp_percentage(grammar)
            + w.readability_weight * clamp_percentage(readability)
            + w.structure_weight * clamp_percentage(structure)
            + w.skill_weight * clamp_percentage(skills);

        round2(blended / w.total_weight())
    }
}
