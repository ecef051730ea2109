//! clauselens-common — Shared report types and errors used across all ClauseLens crates.

pub mod error;
pub mod report;

// Re-export commonly used types
pub use error::{ClauseLensError, Result};
pub use report::{
    AnalysisReport, Clause, ClauseKind, ContractType, EntityBundle, RiskFactor, RiskLevel,
    RiskReport, Severity, UnfavorableClause, MAX_CLAUSES, MAX_ENTITIES_PER_FIELD,
};
