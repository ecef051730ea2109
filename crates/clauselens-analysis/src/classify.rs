//! Keyword-overlap contract type classification.

use clauselens_common::ContractType;
use tracing::debug;

/// Candidate types with their keyword sets. Table order is the tie-break
/// contract: the first type reaching the maximum count wins.
const TYPE_KEYWORDS: &[(ContractType, &[&str])] = &[
    (
        ContractType::EmploymentAgreement,
        &["employment", "employee", "employer", "salary", "job title"],
    ),
    (
        ContractType::VendorContract,
        &["vendor", "supplier", "purchase order", "goods"],
    ),
    (
        ContractType::LeaseAgreement,
        &["lease", "rent", "tenant", "landlord", "premises"],
    ),
    (
        ContractType::PartnershipDeed,
        &["partnership", "partners", "profit sharing"],
    ),
    (
        ContractType::ServiceContract,
        &["service provider", "client", "deliverables"],
    ),
    (
        ContractType::Nda,
        &["confidential", "non-disclosure", "proprietary"],
    ),
];

/// Classify a document by keyword overlap against the fixed taxonomy.
/// Returns [`ContractType::GeneralContract`] when no keyword set scores.
pub fn classify(text: &str) -> ContractType {
    let lower = text.to_lowercase();

    let mut best = ContractType::GeneralContract;
    let mut best_score = 0usize;
    for &(candidate, keywords) in TYPE_KEYWORDS {
        let score = keywords.iter().filter(|kw| lower.contains(**kw)).count();
        // Strictly-greater keeps the earliest candidate on ties.
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }

    debug!(contract_type = best.as_str(), score = best_score, "classified contract");
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_agreement() {
        let text = "This Employment Agreement between Employer and Employee sets salary terms.";
        assert_eq!(classify(text), ContractType::EmploymentAgreement);
    }

    #[test]
    fn test_lease_agreement() {
        let text = "The landlord leases the premises to the tenant for monthly rent.";
        assert_eq!(classify(text), ContractType::LeaseAgreement);
    }

    #[test]
    fn test_no_keywords_falls_back() {
        assert_eq!(
            classify("A short note with nothing recognizable in it."),
            ContractType::GeneralContract
        );
    }

    #[test]
    fn test_empty_text_falls_back() {
        assert_eq!(classify(""), ContractType::GeneralContract);
    }

    #[test]
    fn test_tie_breaks_in_table_order() {
        // One keyword each for Lease Agreement and NDA: the earlier table
        // entry must win.
        assert_eq!(
            classify("a lease kept confidential"),
            ContractType::LeaseAgreement
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            classify("VENDOR shall ship the GOODS under each PURCHASE ORDER."),
            ContractType::VendorContract
        );
    }
}
