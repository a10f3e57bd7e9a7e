//! Gap analysis report
//!
//! Plain serializable structures handed back to the caller; nothing here
//! outlives the analysis call that built it.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::coverage::CoverageEntry;
use crate::error::Result;
use crate::gaps::{ImplicitGap, PartialCoverageGap, Recommendation, RiskFinding, UncoveredGap};
use crate::types::RequirementCategory;

/// Mean coverage for one requirement category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCoverage {
    pub category: RequirementCategory,
    pub requirements: usize,
    pub average_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_requirements: usize,
    /// Requirements scoring exactly 100
    pub fully_tested: usize,
    pub partially_tested: usize,
    pub untested: usize,
    /// Rounded mean of all coverage scores; 0 for no requirements
    pub coverage_percentage: u8,
    /// In order of first appearance
    pub by_category: Vec<CategoryCoverage>,
}

impl ReportSummary {
    pub fn from_coverage(
        coverage_map: &[CoverageEntry<'_>],
        partially_tested: usize,
        untested: usize,
    ) -> Self {
        let scores: Vec<u8> = coverage_map.iter().map(|e| e.coverage_score).collect();

        let mut categories: IndexMap<&RequirementCategory, Vec<u8>> = IndexMap::new();
        for entry in coverage_map {
            categories
                .entry(&entry.requirement.category)
                .or_default()
                .push(entry.coverage_score);
        }

        Self {
            total_requirements: coverage_map.len(),
            fully_tested: scores.iter().filter(|s| **s == 100).count(),
            partially_tested,
            untested,
            coverage_percentage: rounded_mean(&scores),
            by_category: categories
                .into_iter()
                .map(|(category, scores)| CategoryCoverage {
                    category: category.clone(),
                    requirements: scores.len(),
                    average_score: rounded_mean(&scores),
                })
                .collect(),
        }
    }
}

fn rounded_mean(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let total: u64 = scores.iter().map(|s| u64::from(*s)).sum();
    (total as f64 / scores.len() as f64).round() as u8
}

/// Gaps grouped by variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapSet {
    pub uncovered: Vec<UncoveredGap>,
    pub partial_coverage: Vec<PartialCoverageGap>,
    pub implicit: Vec<ImplicitGap>,
}

impl GapSet {
    pub fn len(&self) -> usize {
        self.uncovered.len() + self.partial_coverage.len() + self.implicit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Coverage of one requirement as reported to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementCoverage {
    pub requirement_id: String,
    pub category: RequirementCategory,
    pub coverage_score: u8,
    pub covering_tests: Vec<String>,
}

impl From<&CoverageEntry<'_>> for RequirementCoverage {
    fn from(entry: &CoverageEntry<'_>) -> Self {
        Self {
            requirement_id: entry.requirement.id.clone(),
            category: entry.requirement.category.clone(),
            coverage_score: entry.coverage_score,
            covering_tests: entry.covering_test_ids(),
        }
    }
}

/// What happened when the implicit gap advisor was consulted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdvisorOutcome {
    Completed { gaps_found: usize },
    /// The advisor failed; `gaps.implicit` is empty
    Degraded { reason: String },
}

impl AdvisorOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Result of one gap analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub summary: ReportSummary,
    pub gaps: GapSet,
    /// Sorted by ascending priority
    pub recommendations: Vec<Recommendation>,
    pub risk_assessment: Vec<RiskFinding>,
    pub coverage: Vec<RequirementCoverage>,
    pub implicit_analysis: AdvisorOutcome,
    pub generated_at: DateTime<Utc>,
}

impl GapReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
