//! Skill spelling and synonym normalization

use crate::error::{Result, ResumeEvaluatorError};
use std::collections::HashMap;

/// Immutable raw-form -> canonical-form lookup.
///
/// Keys and values are stored lowercased and trimmed. A canonical value is
/// never itself a key for a different value, so `normalize` is idempotent.
#[derive(Debug, Clone, Default)]
pub struct SkillNormalizer {
    table: HashMap<String, String>,
}

impl SkillNormalizer {
    pub fn new<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let table: HashMap<String, String> = entries
            .into_iter()
            .map(|(raw, canonical)| (fold(raw.as_ref()), fold(canonical.as_ref())))
            .filter(|(raw, canonical)| raw != canonical)
            .collect();

        for (raw, canonical) in &table {
            if let Some(next) = table.get(canonical) {
                return Err(ResumeEvaluatorError::Configuration(format!(
                    "Normalization of '{}' -> '{}' chains into '{}'; \
                     map '{}' to the final form directly",
                    raw, canonical, next, raw
                )));
            }
        }

        Ok(Self { table })
    }

    /// Lowercase, trim, and map to the canonical spelling when one is known.
    pub fn normalize(&self, raw: &str) -> String {
        let folded = fold(raw);
        match self.table.get(&folded) {
            Some(canonical) => canonical.clone(),
            None => folded,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn fold(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}
