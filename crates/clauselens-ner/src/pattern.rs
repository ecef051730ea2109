//! Regex-based extraction strategy. No model dependency, always available.

use clauselens_common::{EntityBundle, MAX_ENTITIES_PER_FIELD};
use regex::Regex;
use std::sync::OnceLock;

use crate::{EntityExtractor, Result};

fn party_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Two consecutive capitalized words, the shape of person and company names.
    RE.get_or_init(|| Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").expect("party pattern"))
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,2}[-/]\d{1,2}[-/]\d{2,4}").expect("date pattern"))
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$[\d,]+(?:\.\d{2})?").expect("amount pattern"))
}

/// Pattern-matching entity extraction. Fields keep first-occurrence order,
/// duplicates included, capped at [`MAX_ENTITIES_PER_FIELD`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl EntityExtractor for PatternExtractor {
    fn extract_entities(&self, text: &str) -> Result<EntityBundle> {
        Ok(EntityBundle {
            parties: matches_of(party_re(), text),
            dates: matches_of(date_re(), text),
            amounts: matches_of(amount_re(), text),
            // No reliable pattern signal for jurisdiction; the field stays
            // empty under this strategy.
            jurisdiction: Vec::new(),
        })
    }
}

fn matches_of(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text)
        .take(MAX_ENTITIES_PER_FIELD)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_two_word_parties() {
        let bundle = PatternExtractor::new()
            .extract_entities("Agreement between Acme Corp and John Smith, effective today.")
            .unwrap();
        assert_eq!(bundle.parties, vec!["Acme Corp", "John Smith"]);
    }

    #[test]
    fn test_extracts_dates_and_amounts() {
        let bundle = PatternExtractor::new()
            .extract_entities("Signed 12/01/2024, renewed 1-2-25, for $1,500.00 then $300.")
            .unwrap();
        assert_eq!(bundle.dates, vec!["12/01/2024", "1-2-25"]);
        assert_eq!(bundle.amounts, vec!["$1,500.00", "$300"]);
    }

    #[test]
    fn test_jurisdiction_always_empty() {
        let bundle = PatternExtractor::new()
            .extract_entities("Governed by the laws of the State of New York.")
            .unwrap();
        assert!(bundle.jurisdiction.is_empty());
    }

    #[test]
    fn test_fields_cap_at_five() {
        let text = "Ann Bell Cal Dorr Eve Fox Gus Hart Ian Jones Kim Lowe Max Nash";
        let bundle = PatternExtractor::new().extract_entities(text).unwrap();
        assert_eq!(bundle.parties.len(), 5);
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let bundle = PatternExtractor::new()
            .extract_entities("John Smith signs first. John Smith signs last.")
            .unwrap();
        assert_eq!(bundle.parties, vec!["John Smith", "John Smith"]);
    }

    #[test]
    fn test_empty_text() {
        let bundle = PatternExtractor::new().extract_entities("").unwrap();
        assert!(bundle.is_empty());
    }
}
