// Scoring pages: CV analyzer, ATS optimizer, ATS evaluator.
// Each page owns a Workflow; results come from the ScoringBackend port.

pub mod analyzer;
pub mod evaluator;
pub mod handlers;
pub mod optimizer;
