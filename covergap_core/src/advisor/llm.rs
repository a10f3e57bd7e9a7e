//! Generative-model backed implicit gap advisor

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AnalysisConfig;
use crate::gaps::{ImplicitGap, ImplicitGapKind, Severity};
use crate::types::{Requirement, TestCase};

use super::json::extract_json;
use super::{AdvisorError, ImplicitGapAdvisor};

/// Text-in/text-out access to a generative model
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError>;
}

/// Advisor that prompts a [`GenerativeModel`] and parses its JSON reply
///
/// Makes exactly one model call per analysis and never retries.
pub struct LlmGapAdvisor<M> {
    model: M,
    max_prompt_requirements: usize,
}

impl<M: GenerativeModel> LlmGapAdvisor<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            max_prompt_requirements: AnalysisConfig::default().max_prompt_requirements,
        }
    }

    /// Take prompt bounds from an analysis config (builder pattern)
    pub fn with_config(mut self, config: &AnalysisConfig) -> Self {
        self.max_prompt_requirements = config.max_prompt_requirements;
        self
    }
}

#[async_trait]
impl<M: GenerativeModel> ImplicitGapAdvisor for LlmGapAdvisor<M> {
    async fn find_implicit_gaps(
        &self,
        requirements: &[Requirement],
        test_cases: &[TestCase],
        compliance_frameworks: &[String],
    ) -> Result<Vec<ImplicitGap>, AdvisorError> {
        let prompt = build_prompt(
            requirements,
            test_cases,
            compliance_frameworks,
            self.max_prompt_requirements,
        );
        let reply = self.model.complete(&prompt).await?;
        if reply.trim().is_empty() {
            return Err(AdvisorError::EmptyResponse);
        }
        parse_implicit_gaps(&reply)
    }
}

/// Prompt describing the suite and the exact reply shape expected
pub fn build_prompt(
    requirements: &[Requirement],
    test_cases: &[TestCase],
    compliance_frameworks: &[String],
    max_requirements: usize,
) -> String {
    let mut prompt = String::from(
        "You are reviewing a healthcare software test suite for coverage gaps that \
         keyword matching cannot detect.\n\n",
    );

    let frameworks = if compliance_frameworks.is_empty() {
        "none specified".to_string()
    } else {
        compliance_frameworks.join(", ")
    };
    prompt.push_str(&format!("Compliance frameworks: {frameworks}\n\n"));

    prompt.push_str(&format!("Requirements ({} total):\n", requirements.len()));
    for requirement in requirements.iter().take(max_requirements) {
        prompt.push_str(&format!(
            "- [{}] ({}) {}\n",
            requirement.id, requirement.category, requirement.text
        ));
    }
    if requirements.len() > max_requirements {
        prompt.push_str(&format!(
            "- ... {} more omitted\n",
            requirements.len() - max_requirements
        ));
    }

    prompt.push_str(&format!("\nExisting test cases ({} total):\n", test_cases.len()));
    for test_case in test_cases {
        let title = if test_case.title.trim().is_empty() {
            &test_case.description
        } else {
            &test_case.title
        };
        prompt.push_str(&format!(
            "- [{}] type={} category={} {}\n",
            test_case.id,
            test_case.test_type.as_ref().map_or("unknown", |t| t.as_str()),
            test_case.category.as_deref().unwrap_or("unknown"),
            title
        ));
    }

    let kinds: Vec<&str> = ImplicitGapKind::ALL.iter().map(|k| k.as_str()).collect();
    prompt.push_str(&format!(
        "\nIdentify missing testing such as integration, performance, accessibility, \
         error handling, input validation, audit trail and regulatory compliance coverage.\n\
         Reply with only a JSON array. Each element must be an object with keys:\n\
         \"type\" (one of: {}), \"description\", \"severity\" (HIGH, MEDIUM or LOW), \
         \"recommendation\".\n",
        kinds.join(", ")
    ));

    prompt
}

#[derive(Deserialize)]
struct RawImplicitGap {
    #[serde(rename = "type", alias = "kind", alias = "gap_type")]
    kind: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    recommendation: String,
}

/// Whether an extracted value can carry gap entries
///
/// Rejects arrays of scalars such as a `[1]` citation in surrounding prose.
/// An empty array is a valid "no gaps" reply.
fn is_gap_payload(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.is_empty() || items.iter().any(Value::is_object),
        _ => false,
    }
}

/// Parse a model reply into implicit gaps
///
/// Accepts a bare array, an object wrapping the array under `gaps` or
/// `implicit_gaps`, or a single gap object, optionally surrounded by prose
/// or code fences. Entries with an unknown `type` are skipped.
pub fn parse_implicit_gaps(reply: &str) -> Result<Vec<ImplicitGap>, AdvisorError> {
    let value = extract_json(reply, is_gap_payload).ok_or(AdvisorError::NoJsonFound)?;

    let entries = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let wrapped = ["gaps", "implicit_gaps", "implicitGaps"]
                .iter()
                .find_map(|key| match map.remove(*key) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                });
            match wrapped {
                Some(items) => items,
                None => vec![Value::Object(map)],
            }
        }
        other => {
            return Err(AdvisorError::UnexpectedShape(format!(
                "expected array or object, got {other}"
            )))
        }
    };

    let mut gaps = Vec::with_capacity(entries.len());
    for entry in entries {
        let raw: RawImplicitGap = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Skipping malformed implicit gap entry: {}", e);
                continue;
            }
        };

        let Some(kind) = ImplicitGapKind::parse(&raw.kind) else {
            tracing::debug!("Skipping implicit gap with unknown type '{}'", raw.kind);
            continue;
        };

        gaps.push(ImplicitGap {
            kind,
            description: raw.description,
            severity: Severity::parse_lenient(&raw.severity),
            recommendation: raw.recommendation,
        });
    }

    Ok(gaps)
}
