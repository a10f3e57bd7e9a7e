//! Requirement coverage and gap analysis
//!
//! Given requirements extracted from healthcare specification documents and
//! the test cases generated for them, measures how well the suite covers each
//! requirement, classifies coverage gaps, flags critical risk, and produces a
//! prioritized remediation plan:
//! - Coverage: lexical requirement/test matching and 0-100 coverage scores
//! - Gaps: uncovered, partially covered and implicit (model-advised) gaps
//! - Risk: uncovered requirements touching security, PHI or compliance
//! - Recommendations: ordered remediation actions

// Module declarations
pub mod advisor;
pub mod analyzer;
pub mod config;
pub mod coverage;
pub mod error;
pub mod gaps;
pub mod report;
pub mod types;

// Re-export main types
pub use advisor::{
    AdvisorError, GenerativeModel, ImplicitGapAdvisor, LlmGapAdvisor, NoopAdvisor,
};

#[cfg(feature = "http-model")]
pub use advisor::HttpModelClient;

pub use analyzer::GapAnalyzer;

pub use config::{AnalysisConfig, ModelEndpointConfig, ScoringWeights};

pub use coverage::{build_coverage_map, covers, extract_keywords, CoverageEntry};

pub use error::{AnalysisError, Result};

pub use gaps::{
    Aspect, Gap, ImplicitGap, ImplicitGapKind, PartialCoverageGap, Recommendation,
    RecommendationDetail, RiskFinding, RiskLevel, Severity, UncoveredGap,
};

pub use report::{
    AdvisorOutcome, CategoryCoverage, GapReport, GapSet, ReportSummary, RequirementCoverage,
};

pub use types::{
    parse_requirements, parse_test_cases, Requirement, RequirementCategory, TestCase, TestType,
};

/// Version of the gap analysis crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the gap analysis engine
pub fn init() {
    tracing::info!("Coverage Gap Analysis v{}", VERSION);
}
