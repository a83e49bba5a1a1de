//! Analysis and generation pipelines.
//!
//! Nothing in here prints; every pipeline returns an outcome value carrying
//! its results and the non-fatal warnings collected along the way.

pub mod audit;
pub mod compliance;
pub mod markers;
pub mod plugins;
pub mod prune;
pub mod scanner;
pub mod search;
pub mod translations;
pub mod wiki;

pub use audit::{AnalysisResult, AuditOutcome, KeyAuditor};
pub use compliance::{ComplianceOutcome, ComplianceResult, ComplianceScorer, Tier};
pub use prune::{PruneOptions, PruneSummary, YamlEditor, prune_redundant};
pub use search::{SearchOutcome, search_markers};
