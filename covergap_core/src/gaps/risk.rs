//! Risk assessment over uncovered requirements

use serde::{Deserialize, Serialize};

use super::types::UncoveredGap;

/// Vocabulary that marks an uncovered requirement as critical
///
/// Matched as lower-case substrings of the requirement text.
pub const HIGH_RISK_TERMS: &[&str] = &[
    "security",
    "authentication",
    "authorization",
    "phi",
    "patient data",
    "encryption",
    "audit",
    "compliance",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Critical,
}

/// An uncovered requirement in a high-risk area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub requirement_id: String,
    pub requirement_text: String,
    pub risk_level: RiskLevel,
    pub reason: String,
    /// Matched vocabulary terms, in [`HIGH_RISK_TERMS`] order
    pub matched_terms: Vec<String>,
    /// Every framework passed to the analysis; not narrowed per requirement
    pub impacted_frameworks: Vec<String>,
}

/// One critical finding per uncovered requirement touching the vocabulary
pub fn assess_risk(uncovered: &[UncoveredGap], compliance_frameworks: &[String]) -> Vec<RiskFinding> {
    uncovered
        .iter()
        .filter_map(|gap| {
            let text = gap.requirement_text.to_lowercase();
            let matched_terms: Vec<String> = HIGH_RISK_TERMS
                .iter()
                .filter(|term| text.contains(**term))
                .map(|term| term.to_string())
                .collect();

            if matched_terms.is_empty() {
                return None;
            }

            Some(RiskFinding {
                requirement_id: gap.requirement_id.clone(),
                requirement_text: gap.requirement_text.clone(),
                risk_level: RiskLevel::Critical,
                reason: format!(
                    "Untested requirement in high-risk area ({})",
                    matched_terms.join(", ")
                ),
                matched_terms,
                impacted_frameworks: compliance_frameworks.to_vec(),
            })
        })
        .collect()
}
