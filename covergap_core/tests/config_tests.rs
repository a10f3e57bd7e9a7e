//! Configuration loading from disk

use std::io::Write;

use covergap_core::*;

#[test]
fn test_load_config_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "match_threshold: 0.5\nadequate_coverage_threshold: 60\nadvisor_timeout_secs: 15\nweights:\n  per_test_bonus: 0"
    )
    .unwrap();

    let config = AnalysisConfig::from_path(file.path()).unwrap();
    assert_eq!(config.match_threshold, 0.5);
    assert_eq!(config.adequate_coverage_threshold, 60);
    assert_eq!(config.advisor_timeout_secs, 15);
    assert_eq!(config.weights.per_test_bonus, 0);
    assert_eq!(config.weights.positive, 40);
    assert_eq!(config.uncovered_estimated_tests, 3);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AnalysisConfig::from_path(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, AnalysisError::Io(_)));
}

/// Loaded config drives the analysis
#[tokio::test]
async fn test_loaded_config_changes_scoring() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "weights:\n  positive: 90\n  per_test_bonus: 10").unwrap();
    let config = AnalysisConfig::from_path(file.path()).unwrap();

    let requirements = vec![Requirement::new("R1", "system shall log audit access")];
    let tests = vec![TestCase::new("T1", "verify audit log access entries").with_type("positive")];

    let report = GapAnalyzer::offline()
        .with_config(config)
        .analyze_gaps(&requirements, &tests, &[])
        .await
        .unwrap();

    assert_eq!(report.coverage[0].coverage_score, 100);
    assert_eq!(report.summary.fully_tested, 1);
}
