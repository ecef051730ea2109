//! clauselens-analysis — Deterministic text analyzers over normalized contract text.
//!
//! Every analyzer is a pure function of its input string: no shared state,
//! no I/O, identical input reproduces identical output. The analyzers run
//! independently; only report assembly (in `clauselens-pipeline`) sees all
//! of their outputs together.

pub mod classify;
pub mod normalize;
pub mod risk;
pub mod segment;
pub mod summary;

pub use classify::classify;
pub use normalize::normalize;
pub use risk::{find_unfavorable, score};
pub use segment::{classify_clause_kind, segment};
pub use summary::{extract_obligations, generate_summary};
