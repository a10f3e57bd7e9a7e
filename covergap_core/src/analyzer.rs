//! Gap analysis orchestrator
//!
//! Sequences coverage mapping, gap classification, the implicit gap advisor,
//! recommendation generation and risk assessment into one [`GapReport`].
//! The analyzer holds no per-run state; one instance may serve concurrent
//! analyses over independent inputs.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::advisor::{AdvisorError, ImplicitGapAdvisor, NoopAdvisor};
use crate::config::AnalysisConfig;
use crate::coverage::build_coverage_map;
use crate::error::{AnalysisError, Result};
use crate::gaps::{assess_risk, find_partial, find_uncovered, generate_recommendations, ImplicitGap};
use crate::report::{AdvisorOutcome, GapReport, GapSet, ReportSummary, RequirementCoverage};
use crate::types::{Requirement, TestCase};

/// Requirement coverage and gap analyzer
///
/// The external model is reached only through the injected advisor, so
/// tests can substitute a deterministic fake.
pub struct GapAnalyzer {
    advisor: Arc<dyn ImplicitGapAdvisor>,
    config: AnalysisConfig,
}

impl GapAnalyzer {
    /// Create new analyzer with default config
    pub fn new(advisor: Arc<dyn ImplicitGapAdvisor>) -> Self {
        Self {
            advisor,
            config: AnalysisConfig::default(),
        }
    }

    /// Analyzer that never consults an external model
    pub fn offline() -> Self {
        Self::new(Arc::new(NoopAdvisor))
    }

    /// Set custom analysis configuration (builder pattern)
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze how well `test_cases` cover `requirements`
    ///
    /// Fails only on contract violations or an invalid config. Advisor
    /// failures yield a report with no implicit gaps and a degraded
    /// [`AdvisorOutcome`].
    pub async fn analyze_gaps(
        &self,
        requirements: &[Requirement],
        test_cases: &[TestCase],
        compliance_frameworks: &[String],
    ) -> Result<GapReport> {
        self.config.validate()?;
        validate_inputs(requirements, test_cases)?;

        let coverage_map = build_coverage_map(requirements, test_cases, &self.config);
        let uncovered = find_uncovered(&coverage_map);
        let partial = find_partial(&coverage_map, self.config.adequate_coverage_threshold);

        let (implicit, implicit_analysis) = self
            .consult_advisor(requirements, test_cases, compliance_frameworks)
            .await;

        let recommendations = generate_recommendations(
            &uncovered,
            &partial,
            &implicit,
            self.config.uncovered_estimated_tests,
        );
        let risk_assessment = assess_risk(&uncovered, compliance_frameworks);

        let summary = ReportSummary::from_coverage(&coverage_map, partial.len(), uncovered.len());
        let coverage = coverage_map.iter().map(RequirementCoverage::from).collect();

        tracing::info!(
            "Analyzed {} requirements against {} test cases: {}% coverage, {} uncovered, {} partial, {} implicit, {} critical",
            summary.total_requirements,
            test_cases.len(),
            summary.coverage_percentage,
            uncovered.len(),
            partial.len(),
            implicit.len(),
            risk_assessment.len()
        );

        Ok(GapReport {
            summary,
            gaps: GapSet {
                uncovered,
                partial_coverage: partial,
                implicit,
            },
            recommendations,
            risk_assessment,
            coverage,
            implicit_analysis,
            generated_at: Utc::now(),
        })
    }

    /// Single bounded advisor call; failures degrade to no implicit gaps
    async fn consult_advisor(
        &self,
        requirements: &[Requirement],
        test_cases: &[TestCase],
        compliance_frameworks: &[String],
    ) -> (Vec<ImplicitGap>, AdvisorOutcome) {
        let timeout = self.config.advisor_timeout();
        let call = self
            .advisor
            .find_implicit_gaps(requirements, test_cases, compliance_frameworks);

        let result = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AdvisorError::Timeout(timeout)),
        };

        match result {
            Ok(gaps) => {
                let outcome = AdvisorOutcome::Completed {
                    gaps_found: gaps.len(),
                };
                (gaps, outcome)
            }
            Err(e) => {
                tracing::warn!("Implicit gap advisor failed, continuing without implicit gaps: {}", e);
                (
                    Vec::new(),
                    AdvisorOutcome::Degraded {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }
}

/// Reject inputs that break the upstream contract
fn validate_inputs(requirements: &[Requirement], test_cases: &[TestCase]) -> Result<()> {
    let mut seen = HashSet::with_capacity(requirements.len());
    for (index, requirement) in requirements.iter().enumerate() {
        if requirement.id.trim().is_empty() {
            return Err(AnalysisError::ContractViolation(format!(
                "requirement at index {} has an empty id",
                index
            )));
        }
        if !seen.insert(requirement.id.as_str()) {
            return Err(AnalysisError::ContractViolation(format!(
                "duplicate requirement id {}",
                requirement.id
            )));
        }
    }

    if let Some(index) = test_cases.iter().position(|t| t.id.trim().is_empty()) {
        return Err(AnalysisError::ContractViolation(format!(
            "test case at index {} has an empty id",
            index
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_analyzer_completes() {
        let analyzer = GapAnalyzer::offline();
        let report = analyzer.analyze_gaps(&[], &[], &[]).await.unwrap();

        assert_eq!(report.summary.total_requirements, 0);
        assert_eq!(report.summary.coverage_percentage, 0);
        assert!(report.gaps.is_empty());
        assert_eq!(report.implicit_analysis, AdvisorOutcome::Completed { gaps_found: 0 });
    }

    #[tokio::test]
    async fn test_duplicate_requirement_id_rejected() {
        let requirements = vec![
            Requirement::new("R1", "encrypt data"),
            Requirement::new("R1", "audit access"),
        ];
        let err = GapAnalyzer::offline()
            .analyze_gaps(&requirements, &[], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ContractViolation(_)));
    }

    #[tokio::test]
    async fn test_empty_test_id_rejected() {
        let tests = vec![TestCase::new(" ", "verify")];
        let err = GapAnalyzer::offline()
            .analyze_gaps(&[], &tests, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ContractViolation(_)));
    }

    #[tokio::test]
    async fn test_empty_requirement_text_degrades() {
        let requirements = vec![Requirement::new("R1", "")];
        let tests = vec![TestCase::new("T1", "anything at all").with_type("positive")];
        let report = GapAnalyzer::offline()
            .analyze_gaps(&requirements, &tests, &[])
            .await
            .unwrap();

        assert_eq!(report.gaps.uncovered.len(), 1);
        assert_eq!(report.coverage[0].coverage_score, 0);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            match_threshold: -0.1,
            ..AnalysisConfig::default()
        };
        let err = GapAnalyzer::offline()
            .with_config(config)
            .analyze_gaps(&[], &[], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }
}
