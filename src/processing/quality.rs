//! Grammar and readability scoring

use crate::processing::round2;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]+[,;:!?.](?:\s|$)").expect("Invalid punctuation spacing regex")
});
static LOWERCASE_SENTENCE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[.!?]\s+)[\s"'(\[*•-]*(\p{Ll})"#).expect("Invalid sentence start regex")
});
static LOWERCASE_I: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)i(?:[\s,']|$)").expect("Invalid pronoun regex"));

/// Given text, return the number of grammar issues found.
pub trait GrammarChecker: Send + Sync {
    fn count_issues(&self, text: &str) -> usize;
}

/// Given text, return a readability metric. Values may fall outside
/// [0, 100]; callers clamp before blending.
pub trait ReadabilityScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrammarRule {
    RepeatedWord,
    LowercaseSentenceStart,
    SpaceBeforePunctuation,
    LowercasePronoun,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub rule: GrammarRule,
    /// Byte offset of the issue in the checked text
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarAssessment {
    pub issues: usize,
    pub word_count: usize,
    pub score: f64,
}

impl GrammarAssessment {
    pub fn new(issues: usize, word_count: usize) -> Self {
        Self {
            issues,
            word_count,
            score: grammar_score(issues, word_count),
        }
    }
}

/// Issue density as a percentage score. Texts without words score 100.
pub fn grammar_score(issues: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        return 100.0;
    }
    (100.0 - issues as f64 / word_count as f64 * 100.0).max(0.0)
}

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Pattern-based checker for mechanical mistakes.
#[derive(Debug, Default, Clone)]
pub struct RuleBasedGrammarChecker;

impl RuleBasedGrammarChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn find_issues(&self, text: &str) -> Vec<GrammarIssue> {
        let mut issues = Vec::new();

        let mut previous: Option<&str> = None;
        for (offset, word) in text.unicode_word_indices() {
            if let Some(prev) = previous {
                if word.chars().all(char::is_alphabetic) && prev.eq_ignore_ascii_case(word) {
                    issues.push(GrammarIssue {
                        rule: GrammarRule::RepeatedWord,
                        offset,
                    });
                }
            }
            previous = Some(word);
        }

        for caps in LOWERCASE_SENTENCE_START.captures_iter(text) {
            if let Some(letter) = caps.get(1) {
                issues.push(GrammarIssue {
                    rule: GrammarRule::LowercaseSentenceStart,
                    offset: letter.start(),
                });
            }
        }

        issues.extend(SPACE_BEFORE_PUNCTUATION.find_iter(text).map(|m| GrammarIssue {
            rule: GrammarRule::SpaceBeforePunctuation,
            offset: m.start(),
        }));

        issues.extend(LOWERCASE_I.find_iter(text).map(|m| GrammarIssue {
            rule: GrammarRule::LowercasePronoun,
            offset: m.start(),
        }));

        issues.sort_by_key(|issue| issue.offset);
        issues
    }
}

impl GrammarChecker for RuleBasedGrammarChecker {
    fn count_issues(&self, text: &str) -> usize {
        self.find_issues(text).len()
    }
}

/// Flesch reading ease with a vowel-group syllable estimate.
#[derive(Debug, Default, Clone)]
pub struct FleschReadingEase;

impl FleschReadingEase {
    pub fn new() -> Self {
        Self
    }

    pub fn count_syllables(word: &str) -> usize {
        let lower = word.to_lowercase();
        let mut count = 0;
        let mut in_vowel_group = false;

        for c in lower.chars() {
            let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
            if vowel && !in_vowel_group {
                count += 1;
            }
            in_vowel_group = vowel;
        }

        if count > 1 && lower.ends_with('e') && !lower.ends_with("le") {
            count -= 1;
        }

        count.max(1)
    }
}

impl ReadabilityScorer for FleschReadingEase {
    fn score(&self, text: &str) -> f64 {
        let words: Vec<&str> = text.unicode_words().collect();
        if words.is_empty() {
            return 0.0;
        }

        let sentences = text
            .unicode_sentences()
            .filter(|s| s.unicode_words().next().is_some())
            .count()
            .max(1);
        let syllables: usize = words.iter().map(|w| Self::count_syllables(w)).sum();

        let words_per_sentence = words.len() as f64 / sentences as f64;
        let syllables_per_word = syllables as f64 / words.len() as f64;

        round2(206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_score_without_words() {
        assert_eq!(grammar_score(0, 0), 100.0);
        assert_eq!(grammar_score(5, 0), 100.0);
    }

    #[test]
    fn test_grammar_score_floor() {
        assert_eq!(grammar_score(1, 4), 75.0);
        assert_eq!(grammar_score(10, 4), 0.0);
    }

    #[test]
    fn test_clean_text_has_no_issues() {
        let checker = RuleBasedGrammarChecker::new();
        assert_eq!(checker.count_issues("I build reliable systems. My team ships weekly."), 0);
        assert_eq!(checker.count_issues(""), 0);
    }

    #[test]
    fn test_detects_each_rule() {
        let checker = RuleBasedGrammarChecker::new();
        let issues = checker.find_issues("I led the the team , and i shipped it. then it worked.");
        let rules: Vec<GrammarRule> = issues.iter().map(|i| i.rule).collect();

        assert!(rules.contains(&GrammarRule::RepeatedWord));
        assert!(rules.contains(&GrammarRule::SpaceBeforePunctuation));
        assert!(rules.contains(&GrammarRule::LowercasePronoun));
        assert!(rules.contains(&GrammarRule::LowercaseSentenceStart));
        let text = "I led the the team , and i shipped it. then it worked.";
        assert_eq!(checker.count_issues(text), issues.len());
    }

    #[test]
    fn test_repeated_numbers_are_fine() {
        let checker = RuleBasedGrammarChecker::new();
        assert_eq!(checker.count_issues("Scored 10 10 times."), 0);
    }

    #[test]
    fn test_syllables() {
        assert_eq!(FleschReadingEase::count_syllables("cat"), 1);
        assert_eq!(FleschReadingEase::count_syllables("table"), 2);
        assert_eq!(FleschReadingEase::count_syllables("make"), 1);
        assert_eq!(FleschReadingEase::count_syllables("engineering"), 4);
        assert_eq!(FleschReadingEase::count_syllables("rhythm"), 1);
    }

    #[test]
    fn test_readability_empty_and_simple() {
        let scorer = FleschReadingEase::new();
        assert_eq!(scorer.score(""), 0.0);

        let simple = scorer.score("The cat sat. The dog ran.");
        let dense = scorer.score(
            "Comprehensive organizational transformation necessitates \
             interdisciplinary collaboration.",
        );
        assert!(simple > dense);
        assert!(simple > 90.0);
    }

    #[test]
    fn test_clamp_percentage() {
        assert_eq!(clamp_percentage(120.5), 100.0);
        assert_eq!(clamp_percentage(-30.0), 0.0);
        assert_eq!(clamp_percentage(f64::NAN), 0.0);
        assert_eq!(clamp_percentage(55.5), 55.5);
    }
}
