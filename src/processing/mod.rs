//! Text analysis: keyword extraction, skill matching, structure and quality scoring

pub mod normalizer;
pub mod tagger;
pub mod keyword_extractor;
pub mod skill_matcher;
pub mod skill_list;
pub mod suggestions;
pub mod structure;
pub mod quality;
pub mod analyzer;

/// Round a percentage to two decimal places, ties to even.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
