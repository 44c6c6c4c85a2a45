//! Part-of-speech tagging used by the grammatical keyword pass
//!
//! `PosTagger` is the narrow seam the extractor depends on. `LexiconTagger`
//! is a rule-based default: a closed-class lexicon, suffix heuristics, and
//! a noun fallback for open-class words, with suffix-based singular lemmas.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}+#]*(?:[.\-'][\p{L}\p{N}+#]+)*")
        .expect("Invalid token regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Numeral,
    Particle,
    Other,
}

impl PosTag {
    pub fn is_noun(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Surface form as it appears in the text
    pub text: String,
    /// Lowercased dictionary form
    pub lemma: String,
    pub pos: PosTag,
}

/// Given text, return (surface, lemma, tag) triples in reading order.
pub trait PosTagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<TaggedToken>;
}

pub struct LexiconTagger {
    lexicon: HashMap<&'static str, PosTag>,
    suffix_exceptions: HashSet<&'static str>,
    invariant_plurals: HashSet<&'static str>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        let mut lexicon = HashMap::new();

        let closed_classes: &[(PosTag, &[&'static str])] = &[
            (
                PosTag::Determiner,
                &[
                    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some",
                    "any", "no", "all", "both", "either", "neither", "another", "such", "what",
                    "which", "whose",
                ],
            ),
            (
                PosTag::Pronoun,
                &[
                    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he",
                    "him", "his", "she", "her", "hers", "it", "its", "itself", "we", "us", "our",
                    "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "who",
                    "whom", "someone", "anyone", "everyone",
                ],
            ),
            (
                PosTag::Adposition,
                &[
                    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
                    "through", "during", "before", "after", "above", "below", "to", "from", "up",
                    "down", "of", "off", "over", "under", "within", "without", "across", "along",
                    "among", "around", "behind", "beyond", "via", "per", "toward", "towards",
                    "upon", "near", "like", "including",
                ],
            ),
            (
                PosTag::Conjunction,
                &[
                    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "although",
                    "though", "whereas", "unless", "since", "than", "whether", "as",
                ],
            ),
            (
                PosTag::Auxiliary,
                &[
                    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
                    "having", "do", "does", "did", "will", "would", "shall", "should", "can",
                    "could", "may", "might", "must",
                ],
            ),
            (PosTag::Particle, &["not", "n't"]),
            (
                PosTag::Adverb,
                &[
                    "very", "also", "just", "only", "well", "too", "then", "there", "here", "now",
                    "often", "always", "never", "really", "quite", "more", "most", "less", "least",
                    "again", "already", "currently", "etc", "how", "when", "where", "why",
                ],
            ),
            (
                PosTag::Verb,
                &[
                    "seek", "seeks", "need", "needs", "want", "wants", "use", "uses", "build",
                    "builds", "develop", "develops", "design", "designs", "manage", "manages",
                    "lead", "leads", "led", "make", "makes", "made", "create", "creates",
                    "implement", "implements", "maintain", "maintains", "improve", "improves",
                    "deliver", "delivers", "drive", "drives", "support", "supports", "join",
                    "joins", "require", "requires", "prefer", "prefers", "know", "knows", "help",
                    "helps", "ensure", "ensures", "write", "writes", "wrote", "own", "owns", "get",
                    "got", "take", "took", "bring", "brings", "apply", "applies", "collaborate",
                    "collaborates", "thrive", "thrives", "grow", "grows",
                ],
            ),
            (
                PosTag::Adjective,
                &[
                    "strong", "good", "great", "excellent", "new", "senior", "junior", "able",
                    "other", "various", "several", "many", "much", "best", "better", "key", "main",
                    "high", "low", "large", "small", "fast", "solid", "deep", "proficient",
                    "familiar", "related", "relevant", "professional", "technical", "personal",
                    "academic", "social", "such", "own", "hands-on", "plus", "preferred",
                    "required",
                ],
            ),
            (
                PosTag::Numeral,
                &[
                    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
                    "first", "second", "third",
                ],
            ),
            (PosTag::Other, &["e.g", "i.e", "vs"]),
        ];

        for (tag, words) in closed_classes {
            for word in words.iter() {
                lexicon.entry(*word).or_insert(*tag);
            }
        }

        let suffix_exceptions: HashSet<&'static str> = [
            // -ing / -ed nouns
            "engineering", "marketing", "testing", "programming", "training", "learning",
            "networking", "accounting", "computing", "scheduling", "planning", "building",
            "modeling", "modelling", "debugging", "processing", "writing", "reporting",
            "consulting", "manufacturing", "mentoring", "banking", "hosting", "caching", "logging",
            "messaging", "pricing", "recruiting", "speed", "embed",
            // -ive / -able / -ful nouns
            "executive", "objective", "initiative", "incentive", "representative", "perspective",
            "archive", "narrative", "directive", "deliverable", "variable", "table", "cable",
        ]
        .into_iter()
        .collect();

        let invariant_plurals: HashSet<&'static str> = [
            "kubernetes", "analytics", "statistics", "economics", "mathematics", "physics", "news",
            "series", "species", "aws", "css", "ios", "macos", "windows", "jenkins", "pandas",
            "redis", "devops", "postgres", "sales", "ethics", "logistics", "robotics", "graphics",
            "electronics", "linguistics", "mlops", "gitops", "sass", "less", "business", "express",
            "process", "success",
        ]
        .into_iter()
        .collect();

        Self {
            lexicon,
            suffix_exceptions,
            invariant_plurals,
        }
    }

    fn classify(&self, surface: &str, lower: &str, sentence_start: bool) -> PosTag {
        let first = lower.chars().next();
        if first.is_some_and(|c| c.is_numeric()) && !lower.chars().any(char::is_alphabetic) {
            return PosTag::Numeral;
        }

        if let Some(tag) = self.lexicon.get(lower) {
            return *tag;
        }

        let has_letters = lower.chars().any(char::is_alphabetic);
        let has_marks = lower.chars().any(|c| c.is_numeric() || matches!(c, '+' | '#' | '.'));
        if has_letters && has_marks {
            return PosTag::ProperNoun;
        }

        let capitalized = surface.chars().next().is_some_and(char::is_uppercase);
        if capitalized && !sentence_start {
            return PosTag::ProperNoun;
        }

        if self.suffix_exceptions.contains(lower) {
            return PosTag::Noun;
        }

        let len = lower.chars().count();
        if len > 4 && lower.ends_with("ly") {
            return PosTag::Adverb;
        }
        if len > 5 && lower.ends_with("ing") {
            return PosTag::Verb;
        }
        if len > 4 && lower.ends_with("ed") {
            return PosTag::Verb;
        }
        const ADJECTIVE_SUFFIXES: [&str; 7] = ["ous", "ful", "ive", "able", "ible", "less", "ical"];
        if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
            return PosTag::Adjective;
        }

        PosTag::Noun
    }

    /// Singular form of a common noun; other words are returned unchanged.
    pub fn lemmatize(&self, lower: &str, pos: PosTag) -> String {
        if pos != PosTag::Noun
            || self.invariant_plurals.contains(lower)
            || lower.chars().count() <= 3
        {
            return lower.to_string();
        }

        if let Some(stem) = lower.strip_suffix("ies") {
            if stem.chars().count() > 1 {
                return format!("{}y", stem);
            }
        }
        for suffix in ["sses", "ches", "shes", "xes", "zes"] {
            if lower.ends_with(suffix) {
                return lower[..lower.len() - 2].to_string();
            }
        }
        if ["ss", "us", "is", "ous"].iter().any(|suffix| lower.ends_with(suffix)) {
            return lower.to_string();
        }
        match lower.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => lower.to_string(),
        }
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut tokens = Vec::new();
        let mut previous_end = 0;

        for mat in TOKEN.find_iter(text) {
            let gap = &text[previous_end..mat.start()];
            let sentence_start =
                tokens.is_empty() || gap.contains(['.', '!', '?', '\n', ':', '•']);
            previous_end = mat.end();

            let surface = mat.as_str();
            let lower = surface.to_lowercase();
            let pos = self.classify(surface, &lower, sentence_start);
            let lemma = self.lemmatize(&lower, pos);

            tokens.push(TaggedToken {
                text: surface.to_string(),
                lemma,
                pos,
            });
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, PosTag)> {
        LexiconTagger::new()
            .tag(text)
            .into_iter()
            .map(|t| (t.lemma, t.pos))
            .collect()
    }

    #[test]
    fn test_tokens_keep_skill_punctuation() {
        let tokens = LexiconTagger::new().tag("Knows C++, C#, node.js and scikit-learn.");
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(surfaces, vec!["Knows", "C++", "C#", "node.js", "and", "scikit-learn"]);
    }

    #[test]
    fn test_job_posting_sentence() {
        let tagged = tags("looking for candidates skilled in python, sql, teamwork, and java.");
        assert!(tagged.contains(&("looking".to_string(), PosTag::Verb)));
        assert!(tagged.contains(&("for".to_string(), PosTag::Adposition)));
        assert!(tagged.contains(&("candidate".to_string(), PosTag::Noun)));
        assert!(tagged.contains(&("skilled".to_string(), PosTag::Verb)));
        assert!(tagged.contains(&("python".to_string(), PosTag::Noun)));
        assert!(tagged.contains(&("teamwork".to_string(), PosTag::Noun)));
        assert!(tagged.contains(&("and".to_string(), PosTag::Conjunction)));
    }

    #[test]
    fn test_proper_nouns() {
        let tagged = tags("Worked at Google on Python3 tooling");
        assert!(tagged.contains(&("google".to_string(), PosTag::ProperNoun)));
        assert!(tagged.contains(&("python3".to_string(), PosTag::ProperNoun)));
    }

    #[test]
    fn test_lemmatization() {
        let tagger = LexiconTagger::new();
        assert_eq!(tagger.lemmatize("technologies", PosTag::Noun), "technology");
        assert_eq!(tagger.lemmatize("databases", PosTag::Noun), "database");
        assert_eq!(tagger.lemmatize("processes", PosTag::Noun), "process");
        assert_eq!(tagger.lemmatize("branches", PosTag::Noun), "branch");
        assert_eq!(tagger.lemmatize("kubernetes", PosTag::Noun), "kubernetes");
        assert_eq!(tagger.lemmatize("analysis", PosTag::Noun), "analysis");
        assert_eq!(tagger.lemmatize("apis", PosTag::ProperNoun), "apis");
    }

    #[test]
    fn test_empty_text() {
        assert!(LexiconTagger::new().tag("").is_empty());
    }
}
