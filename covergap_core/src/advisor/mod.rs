//! Implicit gap advisor boundary
//!
//! Some omissions (integration, performance, accessibility, audit trail) are
//! invisible to lexical matching. An advisor asks an external generative
//! model for them. Advisors report failure explicitly through
//! [`AdvisorError`]; the analyzer turns that into an empty implicit list and
//! a degraded outcome instead of failing the whole report.

pub mod json;
pub mod llm;

#[cfg(feature = "http-model")]
pub mod http;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::gaps::ImplicitGap;
use crate::types::{Requirement, TestCase};

pub use json::extract_json;
pub use llm::{build_prompt, parse_implicit_gaps, GenerativeModel, LlmGapAdvisor};

#[cfg(feature = "http-model")]
pub use http::HttpModelClient;

/// Failure at the advisor boundary
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Advisor timed out after {0:?}")]
    Timeout(Duration),

    #[error("Model endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("No JSON array or object found in model reply")]
    NoJsonFound,

    #[error("Unexpected reply shape: {0}")]
    UnexpectedShape(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of implicit coverage gaps (allows test fakes)
#[async_trait]
pub trait ImplicitGapAdvisor: Send + Sync {
    async fn find_implicit_gaps(
        &self,
        requirements: &[Requirement],
        test_cases: &[TestCase],
        compliance_frameworks: &[String],
    ) -> Result<Vec<ImplicitGap>, AdvisorError>;
}

/// Advisor for offline runs; never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAdvisor;

#[async_trait]
impl ImplicitGapAdvisor for NoopAdvisor {
    async fn find_implicit_gaps(
        &self,
        _requirements: &[Requirement],
        _test_cases: &[TestCase],
        _compliance_frameworks: &[String],
    ) -> Result<Vec<ImplicitGap>, AdvisorError> {
        Ok(Vec::new())
    }
}
