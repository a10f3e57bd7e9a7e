//! Error types for coverage gap analysis

use thiserror::Error;

/// Main error type for gap analysis
///
/// Only contract violations and configuration problems surface here. Noisy
/// inputs (empty requirement text, missing test type) degrade instead, and
/// advisor failures are reported through [`crate::AdvisorOutcome`].
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Input collections broke the upstream contract (duplicate or empty ids)
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Configuration value outside its domain
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed JSON input or missing required fields
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed YAML configuration
    #[error("Configuration format error: {0}")]
    ConfigFormat(#[from] serde_yaml::Error),

    /// Generic IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gap analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::ContractViolation("duplicate requirement id R1".to_string());
        assert_eq!(err.to_string(), "Contract violation: duplicate requirement id R1");
    }

    #[test]
    fn test_serde_error_converts() {
        let err: AnalysisError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AnalysisError::Serialization(_)));
    }
}
