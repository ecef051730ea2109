//! Label normalization from model-specific tag sets to report categories.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Report-facing entity category. Spans normalized to `Other` are dropped
/// rather than misfiled into the wrong bundle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Party,
    Date,
    Amount,
    Jurisdiction,
    Other,
}

// Map model-specific labels to report categories.
fn label_map() -> &'static HashMap<&'static str, EntityCategory> {
    static LABEL_MAP: OnceLock<HashMap<&'static str, EntityCategory>> = OnceLock::new();
    LABEL_MAP.get_or_init(|| {
        let mut m = HashMap::new();

        // OntoNotes labels
        m.insert("PERSON", EntityCategory::Party);
        m.insert("ORG", EntityCategory::Party);
        m.insert("DATE", EntityCategory::Date);
        m.insert("MONEY", EntityCategory::Amount);
        m.insert("GPE", EntityCategory::Jurisdiction);

        // CoNLL-03 labels, so substitute models degrade sanely
        m.insert("PER", EntityCategory::Party);
        m.insert("ORGANIZATION", EntityCategory::Party);

        m
    })
}

/// Normalize a model-specific entity label to a report category.
pub fn normalize_label(label: &str) -> EntityCategory {
    // Handle BIO tagging (B-, I- prefixes)
    let clean = label.trim_start_matches("B-").trim_start_matches("I-");

    label_map().get(clean).copied().unwrap_or(EntityCategory::Other)
}
