//! Gap data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Requirement, RequirementCategory};

/// Gap severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Lenient parse; anything not recognisably high or medium is low
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" | "critical" => Self::High,
            "medium" | "moderate" => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Testing dimension used to judge coverage completeness
///
/// Declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Positive,
    Negative,
    EdgeCase,
    Security,
}

impl Aspect {
    pub const ALL: [Aspect; 4] = [Self::Positive, Self::Negative, Self::EdgeCase, Self::Security];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "positive test",
            Self::Negative => "negative test",
            Self::EdgeCase => "edge case test",
            Self::Security => "security test",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Requirement with no covering tests at all
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncoveredGap {
    pub requirement_id: String,
    pub requirement_text: String,
    pub category: RequirementCategory,
    pub severity: Severity,
}

impl UncoveredGap {
    pub fn new(requirement: &Requirement) -> Self {
        Self {
            requirement_id: requirement.id.clone(),
            requirement_text: requirement.text.clone(),
            category: requirement.category.clone(),
            severity: Severity::High,
        }
    }
}

/// Requirement covered below the adequacy threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialCoverageGap {
    pub requirement_id: String,
    pub requirement_text: String,
    pub category: RequirementCategory,
    pub coverage_score: u8,
    pub covering_test_count: usize,
    /// Always in [`Aspect::ALL`] order
    pub missing_aspects: Vec<Aspect>,
}

/// Kind of gap invisible to lexical matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicitGapKind {
    Integration,
    Performance,
    Compliance,
    ErrorHandling,
    Accessibility,
    Validation,
    Audit,
}

impl ImplicitGapKind {
    pub const ALL: [ImplicitGapKind; 7] = [
        Self::Integration,
        Self::Performance,
        Self::Compliance,
        Self::ErrorHandling,
        Self::Accessibility,
        Self::Validation,
        Self::Audit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integration => "integration",
            Self::Performance => "performance",
            Self::Compliance => "compliance",
            Self::ErrorHandling => "error_handling",
            Self::Accessibility => "accessibility",
            Self::Validation => "validation",
            Self::Audit => "audit",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL.into_iter().find(|kind| kind.as_str() == normalized)
    }
}

impl fmt::Display for ImplicitGapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gap surfaced by the implicit gap advisor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplicitGap {
    #[serde(rename = "type")]
    pub kind: ImplicitGapKind,
    pub description: String,
    pub severity: Severity,
    pub recommendation: String,
}

/// Any coverage gap
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gap {
    Uncovered(UncoveredGap),
    PartialCoverage(PartialCoverageGap),
    Implicit(ImplicitGap),
}

impl Gap {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Uncovered(gap) => gap.severity,
            // Partial coverage is always scheduled behind uncovered work
            Self::PartialCoverage(_) => Severity::Medium,
            Self::Implicit(gap) => gap.severity,
        }
    }
}
