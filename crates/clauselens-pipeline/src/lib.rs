//! clauselens-pipeline — Report assembly over one normalized document.
//!
//! The analyzers run independently; nothing here feeds one analyzer's
//! output into another. Assembly is the only place all four results meet.

use chrono::Utc;
use tracing::info;

use clauselens_analysis::{
    classify, extract_obligations, find_unfavorable, generate_summary, score, segment,
};
use clauselens_common::{AnalysisReport, Result};
use clauselens_ner::{EntityExtractor, ModelExtractor, NerConfig, PatternExtractor};

pub use clauselens_analysis::normalize;

/// Runs the analyzers over one document and assembles the report. The
/// entity strategy is fixed at construction; call sites never branch on
/// which one is active.
pub struct ContractAnalyzer {
    entities: Box<dyn EntityExtractor>,
}

impl ContractAnalyzer {
    /// Analyzer with the regex entity strategy. Always available, no
    /// external resources.
    pub fn with_pattern_extractor() -> Self {
        Self {
            entities: Box::new(PatternExtractor::new()),
        }
    }

    /// Analyzer with the model entity strategy. Performs the one-time
    /// model initialization; a failed load surfaces here rather than
    /// degrading later reports.
    pub async fn with_model_extractor(config: NerConfig) -> Result<Self> {
        let extractor = ModelExtractor::new(config).await?;
        Ok(Self {
            entities: Box::new(extractor),
        })
    }

    /// Analyzer with any extractor honoring the capability interface.
    pub fn with_extractor(entities: Box<dyn EntityExtractor>) -> Self {
        Self { entities }
    }

    /// Run every analyzer over already-normalized text and assemble the
    /// timestamped report.
    pub fn analyze(&self, text: &str) -> Result<AnalysisReport> {
        let contract_type = classify(text);
        let clauses = segment(text);
        let entities = self.entities.extract_entities(text)?;
        let risk = score(text);
        let unfavorable_clauses = find_unfavorable(text);
        let summary = generate_summary(text);
        let obligations = extract_obligations(text);

        info!(
            contract_type = contract_type.as_str(),
            clauses = clauses.len(),
            risk_score = risk.risk_score,
            "assembled analysis report"
        );

        Ok(AnalysisReport {
            contract_type,
            analysis_date: Utc::now(),
            clauses,
            entities,
            risk,
            unfavorable_clauses,
            summary,
            obligations,
        })
    }
}
