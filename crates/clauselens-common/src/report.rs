/// Report value types shared by every analyzer.
/// These are the serializable shapes the external renderer/exporter consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard cap on entities kept per report field.
pub const MAX_ENTITIES_PER_FIELD: usize = 5;

/// Hard cap on clauses kept per segmentation pass.
pub const MAX_CLAUSES: usize = 10;

// ---------------------------------------------------------------------------
// Contract type
// ---------------------------------------------------------------------------

/// Closed contract-type taxonomy. Serialized names are part of the report
/// contract and must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "Employment Agreement")]
    EmploymentAgreement,
    #[serde(rename = "Vendor Contract")]
    VendorContract,
    #[serde(rename = "Lease Agreement")]
    LeaseAgreement,
    #[serde(rename = "Partnership Deed")]
    PartnershipDeed,
    #[serde(rename = "Service Contract")]
    ServiceContract,
    #[serde(rename = "NDA")]
    Nda,
    #[serde(rename = "General Contract")]
    GeneralContract,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::EmploymentAgreement => "Employment Agreement",
            ContractType::VendorContract      => "Vendor Contract",
            ContractType::LeaseAgreement      => "Lease Agreement",
            ContractType::PartnershipDeed     => "Partnership Deed",
            ContractType::ServiceContract     => "Service Contract",
            ContractType::Nda                 => "NDA",
            ContractType::GeneralContract     => "General Contract",
        }
    }
}

// ---------------------------------------------------------------------------
// Clause
// ---------------------------------------------------------------------------

/// Structural role of a clause, derived from its modal language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClauseKind {
    Obligation,
    Right,
    Prohibition,
    #[serde(rename = "General Clause")]
    General,
}

impl ClauseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseKind::Obligation  => "Obligation",
            ClauseKind::Right       => "Right",
            ClauseKind::Prohibition => "Prohibition",
            ClauseKind::General     => "General Clause",
        }
    }
}

/// A segmented portion of contract text with its plain-language explanation.
/// No persistent identity: re-deriving from the same text yields identical clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub title: String,
    pub text: String,
    pub explanation: String,
    pub kind: ClauseKind,
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// The four-category entity extraction. Each field is capped at
/// [`MAX_ENTITIES_PER_FIELD`], kept in first-occurrence order, duplicates
/// preserved. All fields are always present; an empty list means the
/// extractor ran and found nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBundle {
    pub parties: Vec<String>,
    pub dates: Vec<String>,
    pub amounts: Vec<String>,
    pub jurisdiction: Vec<String>,
}

impl EntityBundle {
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
            && self.dates.is_empty()
            && self.amounts.is_empty()
            && self.jurisdiction.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

/// Severity of an individual risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High   => "HIGH",
            Severity::Medium => "MEDIUM",
        }
    }
}

/// Three-level summary derived from the numeric risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low    => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High   => "High",
        }
    }
}

/// An independently-detected contractual risk. Factors are non-exclusive;
/// several may co-occur in one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub severity: Severity,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub impact: String,
    pub clause_reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskReport {
    pub overall_risk: RiskLevel,
    /// Clamped to [0, 100].
    pub risk_score: u32,
    pub high_risk_count: u32,
    pub risk_factors: Vec<RiskFactor>,
}

/// A provision disadvantageous to the uploading party, paired with a
/// suggested negotiation alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfavorableClause {
    pub title: String,
    pub issue: String,
    pub alternative: String,
}

// ---------------------------------------------------------------------------
// Assembled report
// ---------------------------------------------------------------------------

/// The full assessment for one document pass. A value object with no
/// further lifecycle; serializes to a flat JSON structure for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub contract_type: ContractType,
    pub analysis_date: DateTime<Utc>,
    pub clauses: Vec<Clause>,
    pub entities: EntityBundle,
    pub risk: RiskReport,
    pub unfavorable_clauses: Vec<UnfavorableClause>,
    pub summary: Vec<String>,
    pub obligations: Vec<String>,
}
