//! Paragraph-based clause segmentation with plain-language explanations.

use clauselens_common::{Clause, ClauseKind, MAX_CLAUSES};
use regex::Regex;
use std::sync::OnceLock;

/// Segments at or below this trimmed length are dropped.
const MIN_SEGMENT_CHARS: usize = 50;

/// Characters of a segment kept as its title.
const TITLE_CHARS: usize = 80;

/// Explanation rules, checked in order; first match wins.
const EXPLANATION_RULES: &[(&str, &str)] = &[
    ("termination", "This clause describes how the contract can be ended."),
    ("payment", "This clause outlines payment terms."),
    ("confidential", "This protects confidential information."),
];

const DEFAULT_EXPLANATION: &str = "Important terms and conditions of the agreement.";

/// Clause-kind rules, checked in order; first match wins. "shall not" must
/// be tested before "shall".
const KIND_RULES: &[(&[&str], ClauseKind)] = &[
    (&["shall not", "prohibited"], ClauseKind::Prohibition),
    (&["shall", "must", "required"], ClauseKind::Obligation),
    (&["may", "entitled", "right"], ClauseKind::Right),
];

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\n+").expect("paragraph pattern"))
}

/// Split text into clauses on paragraph breaks, in document order.
///
/// Segments whose trimmed length is 50 characters or less are dropped, and
/// only the first [`MAX_CLAUSES`] survivors are kept — documents with more
/// qualifying segments silently lose the remainder.
pub fn segment(text: &str) -> Vec<Clause> {
    paragraph_re()
        .split(text)
        .map(str::trim)
        .filter(|candidate| candidate.chars().count() > MIN_SEGMENT_CHARS)
        .take(MAX_CLAUSES)
        .map(|candidate| Clause {
            title: title_of(candidate),
            text: candidate.to_string(),
            explanation: explain(candidate).to_string(),
            kind: classify_clause_kind(candidate),
        })
        .collect()
}

fn title_of(segment: &str) -> String {
    segment.chars().take(TITLE_CHARS).collect::<String>().trim().to_string()
}

fn explain(segment: &str) -> &'static str {
    let lower = segment.to_lowercase();
    for &(trigger, explanation) in EXPLANATION_RULES {
        if lower.contains(trigger) {
            return explanation;
        }
    }
    DEFAULT_EXPLANATION
}

/// Tag a clause by its modal language.
pub fn classify_clause_kind(text: &str) -> ClauseKind {
    let lower = text.to_lowercase();
    for &(triggers, kind) in KIND_RULES {
        if triggers.iter().any(|trigger| lower.contains(trigger)) {
            return kind;
        }
    }
    ClauseKind::General
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(body: &str) -> String {
        // Pad a body out past the minimum segment length.
        format!("{body} The parties agree to the detailed conditions set out in this section.")
    }

    #[test]
    fn test_empty_text_yields_no_clauses() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_short_segments_are_dropped() {
        let text = format!("Too short.\n\n{}", paragraph("Payment is due monthly."));
        let clauses = segment(&text);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].explanation, "This clause outlines payment terms.");
    }

    #[test]
    fn test_cap_at_ten_clauses() {
        let text = (0..15)
            .map(|i| paragraph(&format!("Section {i} covers one topic.")))
            .collect::<Vec<_>>()
            .join("\n\n");
        let clauses = segment(&text);
        assert_eq!(clauses.len(), 10);
        // Original document order is preserved.
        assert!(clauses[0].text.starts_with("Section 0"));
        assert!(clauses[9].text.starts_with("Section 9"));
    }

    #[test]
    fn test_title_is_first_80_chars() {
        let body = "x".repeat(200);
        let clauses = segment(&body);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].title.chars().count(), 80);
        assert_eq!(clauses[0].text.chars().count(), 200);
    }

    #[test]
    fn test_explanation_priority_order() {
        // "termination" outranks "payment" even when both are present.
        let text = paragraph("Termination ends all payment duties.");
        let clauses = segment(&text);
        assert_eq!(
            clauses[0].explanation,
            "This clause describes how the contract can be ended."
        );
    }

    #[test]
    fn test_default_explanation() {
        let clauses = segment(&paragraph("Notices go to the registered address."));
        assert_eq!(
            clauses[0].explanation,
            "Important terms and conditions of the agreement."
        );
    }

    #[test]
    fn test_prohibition_beats_obligation() {
        // "shall not" contains "shall"; the prohibition rule must win.
        assert_eq!(
            classify_clause_kind("The employee shall not disclose trade secrets."),
            ClauseKind::Prohibition
        );
    }

    #[test]
    fn test_obligation_and_right_kinds() {
        assert_eq!(
            classify_clause_kind("The vendor must deliver within 30 days."),
            ClauseKind::Obligation
        );
        assert_eq!(
            classify_clause_kind("The tenant is entitled to quiet enjoyment."),
            ClauseKind::Right
        );
    }

    #[test]
    fn test_general_clause_fallback() {
        assert_eq!(
            classify_clause_kind("This agreement is governed by its schedules."),
            ClauseKind::General
        );
    }
}
