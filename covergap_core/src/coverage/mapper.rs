//! Per-requirement coverage map

use serde::Serialize;

use crate::config::{AnalysisConfig, ScoringWeights};
use crate::types::{Requirement, TestCase, TestType};

use super::keywords::extract_keywords;
use super::matcher::keyword_ratio;

/// Coverage of one requirement by the test suite
///
/// Borrows from the input collections; lives only for one analysis.
/// `coverage_score == 0` exactly when `covering_tests` is empty under the
/// default weights.
#[derive(Clone, Debug, Serialize)]
pub struct CoverageEntry<'a> {
    pub requirement: &'a Requirement,
    /// Covering tests in input order
    pub covering_tests: Vec<&'a TestCase>,
    /// 0..=100
    pub coverage_score: u8,
}

impl CoverageEntry<'_> {
    pub fn has_type(&self, test_type: &TestType) -> bool {
        self.covering_tests.iter().any(|t| t.is_type(test_type))
    }

    pub fn has_security_test(&self) -> bool {
        self.covering_tests.iter().any(|t| t.is_security())
    }

    pub fn covering_test_ids(&self) -> Vec<String> {
        self.covering_tests.iter().map(|t| t.id.clone()).collect()
    }
}

/// Score a set of covering tests
///
/// Zero for no tests. Otherwise one weight per aspect present, plus
/// `per_test_bonus` for every covering test, clamped to `max_score`.
pub fn compute_coverage_score(covering_tests: &[&TestCase], weights: &ScoringWeights) -> u8 {
    if covering_tests.is_empty() {
        return 0;
    }

    let has = |test_type: TestType| covering_tests.iter().any(|t| t.is_type(&test_type));

    let mut score: u64 = 0;
    if has(TestType::Positive) {
        score += u64::from(weights.positive);
    }
    if has(TestType::Negative) {
        score += u64::from(weights.negative);
    }
    if has(TestType::EdgeCase) {
        score += u64::from(weights.edge_case);
    }
    score += u64::from(weights.per_test_bonus) * covering_tests.len() as u64;

    score.min(u64::from(weights.max_score.min(100))) as u8
}

/// Build one coverage entry per requirement, in requirement order
pub fn build_coverage_map<'a>(
    requirements: &'a [Requirement],
    test_cases: &'a [TestCase],
    config: &AnalysisConfig,
) -> Vec<CoverageEntry<'a>> {
    let haystacks: Vec<String> = test_cases.iter().map(TestCase::match_text).collect();

    requirements
        .iter()
        .map(|requirement| {
            let keywords = extract_keywords(&requirement.text);
            let covering_tests: Vec<&TestCase> = test_cases
                .iter()
                .zip(&haystacks)
                .filter(|(_, haystack)| keyword_ratio(&keywords, haystack) > config.match_threshold)
                .map(|(test_case, _)| test_case)
                .collect();

            let coverage_score = compute_coverage_score(&covering_tests, &config.weights);
            tracing::debug!(
                "Requirement {} covered by {} test(s), score {}",
                requirement.id,
                covering_tests.len(),
                coverage_score
            );

            CoverageEntry {
                requirement,
                covering_tests,
                coverage_score,
            }
        })
        .collect()
}
