//! Tunable matching and scoring policy
//!
//! Every threshold and additive constant the engine uses lives here with its
//! documented default, so the policy can be tested and tuned on its own.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Additive coverage score weights
///
/// Aspect diversity dominates; the per-test bonus still nudges the score
/// for redundant tests. The sum is clamped to `max_score`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Awarded when any covering test is positive (default: 40)
    pub positive: u32,
    /// Awarded when any covering test is negative (default: 40)
    pub negative: u32,
    /// Awarded when any covering test is an edge case (default: 20)
    pub edge_case: u32,
    /// Added per covering test (default: 5)
    pub per_test_bonus: u32,
    /// Clamp for the final score (default: 100)
    pub max_score: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            positive: 40,
            negative: 40,
            edge_case: 20,
            per_test_bonus: 5,
            max_score: 100,
        }
    }
}

/// Configuration for a gap analysis run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fraction of requirement keywords a test must mention, strict
    /// greater-than (default: 0.3)
    pub match_threshold: f64,
    /// Scores at or above this are adequately covered (default: 80)
    pub adequate_coverage_threshold: u8,
    pub weights: ScoringWeights,
    /// Tests suggested for a fully uncovered requirement (default: 3)
    pub uncovered_estimated_tests: usize,
    /// Upper bound on the implicit gap advisor call (default: 20)
    pub advisor_timeout_secs: u64,
    /// Requirements listed in the advisor prompt (default: 100)
    pub max_prompt_requirements: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.3,
            adequate_coverage_threshold: 80,
            weights: ScoringWeights::default(),
            uncovered_estimated_tests: 3,
            advisor_timeout_secs: 20,
            max_prompt_requirements: 100,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a YAML configuration document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn advisor_timeout(&self) -> Duration {
        Duration::from_secs(self.advisor_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.match_threshold) {
            return Err(AnalysisError::InvalidConfig(format!(
                "match_threshold must be in [0, 1), got {}",
                self.match_threshold
            )));
        }
        if self.adequate_coverage_threshold == 0 || self.adequate_coverage_threshold > 100 {
            return Err(AnalysisError::InvalidConfig(format!(
                "adequate_coverage_threshold must be in 1..=100, got {}",
                self.adequate_coverage_threshold
            )));
        }
        if self.weights.max_score == 0 || self.weights.max_score > 100 {
            return Err(AnalysisError::InvalidConfig(format!(
                "weights.max_score must be in 1..=100, got {}",
                self.weights.max_score
            )));
        }
        if self.advisor_timeout_secs == 0 {
            return Err(AnalysisError::InvalidConfig(
                "advisor_timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Connection settings for an OpenAI-compatible chat completions endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelEndpointConfig {
    pub endpoint: String,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelEndpointConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            temperature: 0.2,
            max_tokens: 2000,
        }
    }
}

impl ModelEndpointConfig {
    pub const ENDPOINT_VAR: &'static str = "COVERGAP_MODEL_ENDPOINT";
    pub const MODEL_VAR: &'static str = "COVERGAP_MODEL";
    pub const API_KEY_VAR: &'static str = "COVERGAP_MODEL_API_KEY";

    /// Defaults overridden by `COVERGAP_MODEL_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = lookup(Self::ENDPOINT_VAR).filter(|v| !v.is_empty()) {
            config.endpoint = endpoint;
        }
        if let Some(model) = lookup(Self::MODEL_VAR).filter(|v| !v.is_empty()) {
            config.model = model;
        }
        config.api_key = lookup(Self::API_KEY_VAR).filter(|v| !v.is_empty());
        config
    }
}
