//! Report summary lines and obligation sentence extraction.

use crate::classify::classify;

const OBLIGATION_KEYWORDS: &[&str] = &["shall", "must", "required to", "obligated"];

/// Obligation sentences kept per document.
const MAX_OBLIGATIONS: usize = 10;

/// Fixed-shape summary lines for the report header.
pub fn generate_summary(text: &str) -> Vec<String> {
    let contract_type = classify(text);
    vec![
        format!("Contract type identified as: {}", contract_type.as_str()),
        format!("Document length: {} characters", text.chars().count()),
        "Key sections extracted and analyzed".to_string(),
        "Risk assessment completed".to_string(),
    ]
}

/// Sentences containing obligation language, in document order, capped at
/// [`MAX_OBLIGATIONS`].
pub fn extract_obligations(text: &str) -> Vec<String> {
    text.split('.')
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            OBLIGATION_KEYWORDS.iter().any(|kw| lower.contains(*kw))
        })
        .map(|sentence| sentence.trim().to_string())
        .take(MAX_OBLIGATIONS)
        .collect()
}
