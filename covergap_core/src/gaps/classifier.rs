//! Uncovered and partial coverage classification

use crate::coverage::CoverageEntry;
use crate::types::TestType;

use super::types::{Aspect, PartialCoverageGap, UncoveredGap};

/// Requirements with a zero coverage score, tagged HIGH severity
pub fn find_uncovered(coverage_map: &[CoverageEntry<'_>]) -> Vec<UncoveredGap> {
    coverage_map
        .iter()
        .filter(|entry| entry.coverage_score == 0)
        .map(|entry| UncoveredGap::new(entry.requirement))
        .collect()
}

/// Requirements scoring above zero but below `adequate_threshold`
///
/// Scores in `[adequate_threshold, 100]` are adequately covered and excluded.
pub fn find_partial(
    coverage_map: &[CoverageEntry<'_>],
    adequate_threshold: u8,
) -> Vec<PartialCoverageGap> {
    coverage_map
        .iter()
        .filter(|entry| entry.coverage_score > 0 && entry.coverage_score < adequate_threshold)
        .map(|entry| PartialCoverageGap {
            requirement_id: entry.requirement.id.clone(),
            requirement_text: entry.requirement.text.clone(),
            category: entry.requirement.category.clone(),
            coverage_score: entry.coverage_score,
            covering_test_count: entry.covering_tests.len(),
            missing_aspects: missing_aspects(entry),
        })
        .collect()
}

/// Aspects absent from an entry's covering tests, in [`Aspect::ALL`] order
pub fn missing_aspects(entry: &CoverageEntry<'_>) -> Vec<Aspect> {
    Aspect::ALL
        .into_iter()
        .filter(|aspect| {
            let present = match aspect {
                Aspect::Positive => entry.has_type(&TestType::Positive),
                Aspect::Negative => entry.has_type(&TestType::Negative),
                Aspect::EdgeCase => entry.has_type(&TestType::EdgeCase),
                Aspect::Security => entry.has_security_test(),
            };
            !present
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Requirement, TestCase};

    fn entry<'a>(
        requirement: &'a Requirement,
        tests: &'a [TestCase],
        score: u8,
    ) -> CoverageEntry<'a> {
        CoverageEntry {
            requirement,
            covering_tests: tests.iter().collect(),
            coverage_score: score,
        }
    }

    #[test]
    fn test_uncovered_only_zero_scores() {
        let r1 = Requirement::new("R1", "encrypt data");
        let r2 = Requirement::new("R2", "audit access");
        let tests = vec![TestCase::new("T1", "audit access")];
        let map = vec![entry(&r1, &[], 0), entry(&r2, &tests, 5)];

        let uncovered = find_uncovered(&map);
        assert_eq!(uncovered.len(), 1);
        assert_eq!(uncovered[0].requirement_id, "R1");
    }

    #[test]
    fn test_partial_boundaries() {
        let reqs: Vec<Requirement> = (0..4)
            .map(|i| Requirement::new(format!("R{i}"), "audit access"))
            .collect();
        let tests = vec![TestCase::new("T1", "audit access")];
        let map = vec![
            entry(&reqs[0], &[], 0),
            entry(&reqs[1], &tests, 79),
            entry(&reqs[2], &tests, 80),
            entry(&reqs[3], &tests, 100),
        ];

        let partial = find_partial(&map, 80);
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].requirement_id, "R1");
        assert_eq!(partial[0].coverage_score, 79);
        assert_eq!(partial[0].covering_test_count, 1);
    }

    #[test]
    fn test_missing_aspects_fixed_order() {
        let req = Requirement::new("R1", "audit access");
        let tests = vec![TestCase::new("T1", "audit access").with_type("positive")];
        let e = entry(&req, &tests, 45);

        assert_eq!(
            missing_aspects(&e),
            vec![Aspect::Negative, Aspect::EdgeCase, Aspect::Security]
        );
    }

    #[test]
    fn test_missing_aspects_excludes_present_security() {
        let req = Requirement::new("R1", "audit access");
        let tests = vec![
            TestCase::new("T1", "audit access").with_type("negative").with_category("security"),
            TestCase::new("T2", "audit access").with_type("edge_case"),
        ];
        let e = entry(&req, &tests, 70);

        assert_eq!(missing_aspects(&e), vec![Aspect::Positive]);
    }
}
