//! Weighted risk scoring and ordered risk/unfavorable-clause detectors.
//!
//! Scoring and factor enumeration are independent passes over the same
//! text: the score is a weighted count of keyword hits, while the factor
//! and unfavorable tables are fixed ordered detectors that each append at
//! most one result. Detectors are non-exclusive.

use clauselens_common::{RiskFactor, RiskLevel, RiskReport, Severity, UnfavorableClause};
use tracing::debug;

/// Distinct keywords worth 15 score points each.
const HIGH_RISK_KEYWORDS: &[&str] = &[
    "penalty",
    "indemnity",
    "termination without cause",
    "unilateral",
    "non-compete",
    "auto-renewal",
    "lock-in",
    "exclusive",
    "unlimited liability",
];

/// Distinct keywords worth 5 score points each.
const MEDIUM_RISK_KEYWORDS: &[&str] = &[
    "arbitration",
    "jurisdiction",
    "confidential",
    "force majeure",
    "assignment",
];

const HIGH_KEYWORD_WEIGHT: u32 = 15;
const MEDIUM_KEYWORD_WEIGHT: u32 = 5;
const MAX_RISK_SCORE: u32 = 100;

/// Level boundaries, inclusive, checked high-first.
const HIGH_RISK_THRESHOLD: u32 = 60;
const MEDIUM_RISK_THRESHOLD: u32 = 30;

/// Trigger condition for one detector row.
enum Trigger {
    AnyOf(&'static [&'static str]),
    AllOf(&'static [&'static str]),
}

impl Trigger {
    fn matches(&self, lower: &str) -> bool {
        match self {
            Trigger::AnyOf(words) => words.iter().any(|word| lower.contains(word)),
            Trigger::AllOf(words) => words.iter().all(|word| lower.contains(word)),
        }
    }
}

struct RiskRule {
    trigger: Trigger,
    severity: Severity,
    kind: &'static str,
    description: &'static str,
    impact: &'static str,
    clause_reference: &'static str,
}

/// Risk-factor detectors, evaluated in fixed order. The attached strings
/// are part of the report contract.
const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        trigger: Trigger::AnyOf(&["penalty"]),
        severity: Severity::High,
        kind: "Penalty Clause",
        description: "Contract contains penalty provisions",
        impact: "May result in financial penalties",
        clause_reference: "Penalty section",
    },
    RiskRule {
        trigger: Trigger::AnyOf(&["indemnity", "indemnification"]),
        severity: Severity::High,
        kind: "Indemnity Clause",
        description: "Indemnification obligations present",
        impact: "May require you to cover third-party losses",
        clause_reference: "Indemnity section",
    },
    RiskRule {
        trigger: Trigger::AnyOf(&["non-compete", "non compete"]),
        severity: Severity::High,
        kind: "Non-Compete Clause",
        description: "Non-compete restrictions found",
        impact: "Limits business activities after contract ends",
        clause_reference: "Non-compete section",
    },
    RiskRule {
        trigger: Trigger::AnyOf(&["auto-renewal", "automatically renew"]),
        severity: Severity::Medium,
        kind: "Auto-Renewal",
        description: "Contract auto-renews without action",
        impact: "May continue indefinitely if not cancelled",
        clause_reference: "Renewal section",
    },
    RiskRule {
        trigger: Trigger::AllOf(&["unilateral", "termination"]),
        severity: Severity::High,
        kind: "Unilateral Termination",
        description: "One party can terminate without cause",
        impact: "Contract can be ended suddenly",
        clause_reference: "Termination clause",
    },
];

struct UnfavorableRule {
    trigger: Trigger,
    title: &'static str,
    issue: &'static str,
    alternative: &'static str,
}

/// Unfavorable-clause detectors, separate from the risk-factor table.
const UNFAVORABLE_RULES: &[UnfavorableRule] = &[
    UnfavorableRule {
        trigger: Trigger::AnyOf(&["unlimited liability"]),
        title: "Unlimited Liability",
        issue: "You may have unlimited financial exposure",
        alternative: "Negotiate for liability cap or limited liability clause",
    },
    UnfavorableRule {
        trigger: Trigger::AllOf(&["exclusive", "vendor"]),
        title: "Exclusivity Provision",
        issue: "Restricted from working with other parties",
        alternative: "Request non-exclusive arrangement or limited exclusivity period",
    },
    UnfavorableRule {
        trigger: Trigger::AnyOf(&["no warranty", "as-is"]),
        title: "No Warranty",
        issue: "No guarantees on quality or performance",
        alternative: "Negotiate for express warranties or performance guarantees",
    },
];

fn count_hits(lower: &str, keywords: &[&str]) -> u32 {
    keywords.iter().filter(|kw| lower.contains(**kw)).count() as u32
}

/// Score overall contract risk and enumerate the risk factors present.
pub fn score(text: &str) -> RiskReport {
    let lower = text.to_lowercase();

    let high_risk_count = count_hits(&lower, HIGH_RISK_KEYWORDS);
    let medium_risk_count = count_hits(&lower, MEDIUM_RISK_KEYWORDS);

    let risk_score = (high_risk_count * HIGH_KEYWORD_WEIGHT
        + medium_risk_count * MEDIUM_KEYWORD_WEIGHT)
        .min(MAX_RISK_SCORE);

    let overall_risk = if risk_score >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if risk_score >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let risk_factors: Vec<RiskFactor> = RISK_RULES
        .iter()
        .filter(|rule| rule.trigger.matches(&lower))
        .map(|rule| RiskFactor {
            severity: rule.severity,
            kind: rule.kind.to_string(),
            description: rule.description.to_string(),
            impact: rule.impact.to_string(),
            clause_reference: rule.clause_reference.to_string(),
        })
        .collect();

    debug!(
        risk_score,
        high_risk_count,
        factors = risk_factors.len(),
        "scored contract risk"
    );

    RiskReport {
        overall_risk,
        risk_score,
        high_risk_count,
        risk_factors,
    }
}

/// Detect provisions disadvantageous to the uploading party, each paired
/// with a suggested negotiation alternative.
pub fn find_unfavorable(text: &str) -> Vec<UnfavorableClause> {
    let lower = text.to_lowercase();
    UNFAVORABLE_RULES
        .iter()
        .filter(|rule| rule.trigger.matches(&lower))
        .map(|rule| UnfavorableClause {
            title: rule.title.to_string(),
            issue: rule.issue.to_string(),
            alternative: rule.alternative.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_scores_low() {
        let report = score("");
        assert_eq!(report.risk_score, 0);
        assert_eq!(report.overall_risk, RiskLevel::Low);
        assert_eq!(report.high_risk_count, 0);
        assert!(report.risk_factors.is_empty());
    }

    #[test]
    fn test_two_high_keywords_score_medium() {
        let report = score("The agreement sets a penalty and an indemnity duty.");
        assert_eq!(report.high_risk_count, 2);
        assert_eq!(report.risk_score, 30);
        assert_eq!(report.overall_risk, RiskLevel::Medium);
        // Both detectors fire, in table order.
        let kinds: Vec<&str> = report.risk_factors.iter().map(|f| f.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Penalty Clause", "Indemnity Clause"]);
    }

    #[test]
    fn test_high_boundary_is_inclusive() {
        // Four distinct high-risk keywords: 4 * 15 = 60, exactly the High boundary.
        let report = score("penalty indemnity unilateral lock-in");
        assert_eq!(report.risk_score, 60);
        assert_eq!(report.overall_risk, RiskLevel::High);
    }

    #[test]
    fn test_score_clamps_at_100() {
        let text = HIGH_RISK_KEYWORDS.join(" ") + " " + &MEDIUM_RISK_KEYWORDS.join(" ");
        let report = score(&text);
        assert_eq!(report.risk_score, 100);
        assert_eq!(report.overall_risk, RiskLevel::High);
    }

    #[test]
    fn test_adding_new_keyword_increases_score() {
        let base = score("A penalty applies to late delivery.");
        let more = score("A penalty applies to late delivery under exclusive terms.");
        assert!(more.risk_score > base.risk_score);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let once = score("penalty");
        let thrice = score("penalty penalty penalty");
        assert_eq!(once.risk_score, thrice.risk_score);
    }

    #[test]
    fn test_unilateral_termination_needs_both_words() {
        let report = score("Either party may seek unilateral review of fees.");
        assert!(report.risk_factors.iter().all(|f| f.kind != "Unilateral Termination"));

        // The two trigger words need not be adjacent.
        let report = score(
            "Unilateral changes are allowed. A separate section covers termination notice.",
        );
        let matches: Vec<_> = report
            .risk_factors
            .iter()
            .filter(|f| f.kind == "Unilateral Termination")
            .collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].severity, Severity::High);
        assert_eq!(matches[0].description, "One party can terminate without cause");
    }

    #[test]
    fn test_indemnification_variant_fires_indemnity_rule() {
        let report = score("Indemnification of the supplier is mandatory.");
        assert_eq!(report.risk_factors.len(), 1);
        assert_eq!(report.risk_factors[0].kind, "Indemnity Clause");
        // The scoring keyword is "indemnity", which "indemnification" does
        // not contain, so score and factor list diverge here.
        assert_eq!(report.high_risk_count, 0);
    }

    #[test]
    fn test_unlimited_liability_recommendation() {
        let found = find_unfavorable("Contractor accepts unlimited liability for defects.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Unlimited Liability");
        assert_eq!(found[0].issue, "You may have unlimited financial exposure");
        assert_eq!(
            found[0].alternative,
            "Negotiate for liability cap or limited liability clause"
        );
    }

    #[test]
    fn test_exclusivity_needs_vendor_mention() {
        assert!(find_unfavorable("An exclusive license is granted.").is_empty());
        let found = find_unfavorable("The vendor is the exclusive source of goods.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Exclusivity Provision");
    }

    #[test]
    fn test_as_is_fires_warranty_rule() {
        let found = find_unfavorable("Equipment is provided as-is.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "No Warranty");
    }

    #[test]
    fn test_clean_text_has_no_unfavorable_clauses() {
        assert!(find_unfavorable("Payment is due within thirty days.").is_empty());
    }
}
