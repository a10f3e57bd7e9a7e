//! Prioritized remediation plan

use serde::{Deserialize, Serialize};

use super::types::{
    Aspect, Gap, ImplicitGap, ImplicitGapKind, PartialCoverageGap, Severity, UncoveredGap,
};

/// One remediation action; priority 1 is most urgent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: u8,
    #[serde(flatten)]
    pub detail: RecommendationDetail,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_tests: Option<usize>,
}

/// Payload specific to the originating gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecommendationDetail {
    UncoveredRequirement {
        requirement_id: String,
        requirement_text: String,
    },
    PartialCoverage {
        requirement_id: String,
        coverage_score: u8,
        missing_aspects: Vec<Aspect>,
    },
    ImplicitGap {
        gap_type: ImplicitGapKind,
        description: String,
        severity: Severity,
    },
}

/// Build the remediation plan, sorted by ascending priority
///
/// Construction order is uncovered, then partial, then implicit; the sort is
/// stable so that order survives among equal priorities.
pub fn generate_recommendations(
    uncovered: &[UncoveredGap],
    partial: &[PartialCoverageGap],
    implicit: &[ImplicitGap],
    uncovered_estimated_tests: usize,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = uncovered
        .iter()
        .cloned()
        .map(Gap::Uncovered)
        .chain(partial.iter().cloned().map(Gap::PartialCoverage))
        .chain(implicit.iter().cloned().map(Gap::Implicit))
        .map(|gap| recommendation_for(gap, uncovered_estimated_tests))
        .collect();

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

fn priority_for(severity: Severity) -> u8 {
    match severity {
        Severity::High => 1,
        Severity::Medium => 2,
        Severity::Low => 3,
    }
}

fn recommendation_for(gap: Gap, uncovered_estimated_tests: usize) -> Recommendation {
    let priority = priority_for(gap.severity());

    match gap {
        Gap::Uncovered(gap) => Recommendation {
            priority,
            action: format!(
                "Create positive, negative and edge case tests for requirement {}",
                gap.requirement_id
            ),
            estimated_tests: Some(uncovered_estimated_tests),
            detail: RecommendationDetail::UncoveredRequirement {
                requirement_id: gap.requirement_id,
                requirement_text: gap.requirement_text,
            },
        },
        Gap::PartialCoverage(gap) => {
            let action = if gap.missing_aspects.is_empty() {
                format!("Strengthen existing tests for requirement {}", gap.requirement_id)
            } else {
                let labels: Vec<&str> = gap.missing_aspects.iter().map(Aspect::label).collect();
                format!("Add {} for requirement {}", labels.join(", "), gap.requirement_id)
            };

            Recommendation {
                priority,
                action,
                estimated_tests: Some(gap.missing_aspects.len()),
                detail: RecommendationDetail::PartialCoverage {
                    requirement_id: gap.requirement_id,
                    coverage_score: gap.coverage_score,
                    missing_aspects: gap.missing_aspects,
                },
            }
        }
        Gap::Implicit(gap) => {
            let action = if gap.recommendation.trim().is_empty() {
                format!("Address {} gap: {}", gap.kind, gap.description)
            } else {
                gap.recommendation
            };

            Recommendation {
                priority,
                action,
                estimated_tests: None,
                detail: RecommendationDetail::ImplicitGap {
                    gap_type: gap.kind,
                    description: gap.description,
                    severity: gap.severity,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Requirement, RequirementCategory};

    fn partial(id: &str, missing: Vec<Aspect>) -> PartialCoverageGap {
        PartialCoverageGap {
            requirement_id: id.to_string(),
            requirement_text: "audit access".to_string(),
            category: RequirementCategory::Functional,
            coverage_score: 45,
            covering_test_count: 1,
            missing_aspects: missing,
        }
    }

    fn implicit(kind: ImplicitGapKind, severity: Severity) -> ImplicitGap {
        ImplicitGap {
            kind,
            description: format!("{kind} coverage missing"),
            severity,
            recommendation: String::new(),
        }
    }

    #[test]
    fn test_uncovered_gets_priority_one_and_three_tests() {
        let uncovered = vec![UncoveredGap::new(&Requirement::new("R1", "Encrypt PHI"))];
        let recs = generate_recommendations(&uncovered, &[], &[], 3);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, 1);
        assert_eq!(recs[0].estimated_tests, Some(3));
        assert!(matches!(
            recs[0].detail,
            RecommendationDetail::UncoveredRequirement { ref requirement_id, .. } if requirement_id == "R1"
        ));
    }

    #[test]
    fn test_partial_estimates_missing_aspects() {
        let recs = generate_recommendations(
            &[],
            &[partial("R2", vec![Aspect::Negative, Aspect::Security])],
            &[],
            3,
        );

        assert_eq!(recs[0].priority, 2);
        assert_eq!(recs[0].estimated_tests, Some(2));
        assert_eq!(recs[0].action, "Add negative test, security test for requirement R2");
    }

    #[test]
    fn test_implicit_priority_follows_severity() {
        let recs = generate_recommendations(
            &[],
            &[],
            &[
                implicit(ImplicitGapKind::Accessibility, Severity::Low),
                implicit(ImplicitGapKind::Performance, Severity::Medium),
                implicit(ImplicitGapKind::Integration, Severity::High),
            ],
            3,
        );

        let priorities: Vec<u8> = recs.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3]);
        assert!(recs.iter().all(|r| r.estimated_tests.is_none()));
        assert_eq!(recs[0].action, "Address integration gap: integration coverage missing");
    }

    #[test]
    fn test_ties_keep_construction_order() {
        let uncovered = vec![UncoveredGap::new(&Requirement::new("R1", "Encrypt PHI"))];
        let partials = vec![partial("R2", vec![Aspect::Positive])];
        let implicits = vec![
            implicit(ImplicitGapKind::Audit, Severity::Medium),
            implicit(ImplicitGapKind::Integration, Severity::High),
        ];

        let recs = generate_recommendations(&uncovered, &partials, &implicits, 3);
        let kinds: Vec<&str> = recs
            .iter()
            .map(|r| match &r.detail {
                RecommendationDetail::UncoveredRequirement { .. } => "uncovered",
                RecommendationDetail::PartialCoverage { .. } => "partial",
                RecommendationDetail::ImplicitGap { gap_type, .. } => gap_type.as_str(),
            })
            .collect();

        assert_eq!(kinds, vec!["uncovered", "integration", "partial", "audit"]);
    }

    #[test]
    fn test_recommendation_serializes_type_tag() {
        let recs = generate_recommendations(
            &[],
            &[partial("R2", vec![Aspect::EdgeCase])],
            &[],
            3,
        );
        let value = serde_json::to_value(&recs[0]).unwrap();
        assert_eq!(value["type"], "partial_coverage");
        assert_eq!(value["priority"], 2);
        assert_eq!(value["missing_aspects"][0], "edge_case");
        assert_eq!(value["estimated_tests"], 1);
    }
}
