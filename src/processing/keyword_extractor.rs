//! Skill keyword extraction from free text
//!
//! Two passes run over the lowercased text and their results are unioned:
//!
//! 1. a grammatical pass keeping the lemmas of nouns and proper nouns, and
//! 2. a pattern pass capturing the clause after trigger words such as
//!    "skills", "experience with" or "looking for", split into fragments on
//!    commas and "and", with trigger and connector words stripped.
//!
//! Every candidate is normalized and the noise list is subtracted last.

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::processing::normalizer::SkillNormalizer;
use crate::processing::tagger::{LexiconTagger, PosTagger};
use log::debug;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

/// Normalized skill tokens extracted from one document.
pub type KeywordSet = BTreeSet<String>;

/// Nouns need a surface form longer than this to count.
const MIN_NOUN_CHARS: usize = 2;
/// Every candidate needs more characters than this before normalization.
const MIN_KEYWORD_CHARS: usize = 1;

static FRAGMENT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",|\band\b").expect("Invalid fragment split regex"));

pub struct KeywordExtractor {
    tagger: Box<dyn PosTagger>,
    normalizer: SkillNormalizer,
    noise: HashSet<String>,
    clause_pattern: Option<Regex>,
    strip_pattern: Option<Regex>,
}

impl KeywordExtractor {
    pub fn new(
        tagger: Box<dyn PosTagger>,
        normalizer: SkillNormalizer,
        noise_words: &[String],
        trigger_words: &[String],
        strip_words: &[String],
    ) -> Result<Self> {
        let noise = noise_words
            .iter()
            .map(|w| w.to_lowercase().trim().to_string())
            .collect();

        let clause_pattern = match alternation(trigger_words) {
            Some(triggers) => Some(Regex::new(&format!(
                r"(?:{}).*?(?:in|with|:)?\s*([a-zA-Z0-9+#\s,-]+)",
                triggers
            ))?),
            None => None,
        };

        let strip_pattern = match alternation(strip_words) {
            Some(words) => Some(Regex::new(&format!(r"\b(?:{})\b", words))?),
            None => None,
        };

        Ok(Self {
            tagger,
            normalizer,
            noise,
            clause_pattern,
            strip_pattern,
        })
    }

    /// Build an extractor from configuration tables with the default tagger.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let normalizer = SkillNormalizer::new(&config.normalization)?;
        Self::new(
            Box::new(LexiconTagger::new()),
            normalizer,
            &config.noise_words,
            &config.trigger_words,
            &config.strip_words,
        )
    }

    pub fn with_tagger(mut self, tagger: Box<dyn PosTagger>) -> Self {
        self.set_tagger(tagger);
        self
    }

    pub fn set_tagger(&mut self, tagger: Box<dyn PosTagger>) {
        self.tagger = tagger;
    }

    /// Extract the keyword set of `text`. Empty or skill-free text yields
    /// an empty set.
    pub fn extract(&self, text: &str) -> KeywordSet {
        let text = text.to_lowercase();

        let nouns = self.grammatical_candidates(&text);
        let fragments = self.pattern_candidates(&text);
        debug!(
            "Keyword candidates: {} nouns, {} clause fragments",
            nouns.len(),
            fragments.len()
        );

        nouns
            .iter()
            .chain(fragments.iter())
            .filter(|candidate| candidate.chars().count() > MIN_KEYWORD_CHARS)
            .map(|candidate| self.normalizer.normalize(candidate))
            .filter(|keyword| !self.noise.contains(keyword))
            .collect()
    }

    fn grammatical_candidates(&self, text: &str) -> Vec<String> {
        self.tagger
            .tag(text)
            .into_iter()
            .filter(|token| token.pos.is_noun() && token.text.chars().count() > MIN_NOUN_CHARS)
            .map(|token| token.lemma)
            .collect()
    }

    fn pattern_candidates(&self, text: &str) -> Vec<String> {
        let Some(clause_pattern) = &self.clause_pattern else {
            return Vec::new();
        };

        let mut fragments = Vec::new();
        for caps in clause_pattern.captures_iter(text) {
            let Some(clause) = caps.get(1) else { continue };

            for part in FRAGMENT_SPLIT.split(clause.as_str()) {
                let cleaned = match &self.strip_pattern {
                    Some(strip) => strip.replace_all(part.trim(), "").trim().to_string(),
                    None => part.trim().to_string(),
                };
                if !cleaned.is_empty() {
                    fragments.push(cleaned);
                }
            }
        }

        fragments
    }
}

fn alternation(words: &[String]) -> Option<String> {
    let escaped: Vec<String> = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect();

    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}
