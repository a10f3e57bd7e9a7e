//! Coverage gap classification, risk assessment and remediation planning
//!
//! Turns a coverage map into explicit gaps (uncovered, partially covered,
//! implicit), flags high-risk uncovered requirements, and orders the
//! resulting work into a prioritized recommendation list.

pub mod classifier;
pub mod recommendations;
pub mod risk;
pub mod types;

// Public exports
pub use classifier::{find_partial, find_uncovered, missing_aspects};
pub use recommendations::{generate_recommendations, Recommendation, RecommendationDetail};
pub use risk::{assess_risk, RiskFinding, RiskLevel, HIGH_RISK_TERMS};
pub use types::{
    Aspect, Gap, ImplicitGap, ImplicitGapKind, PartialCoverageGap, Severity, UncoveredGap,
};
