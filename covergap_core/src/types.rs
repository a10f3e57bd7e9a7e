//! Input records produced by the extraction and generation collaborators
//!
//! Both records are read-only for the duration of an analysis. Optional
//! fields degrade to "unknown" rather than failing deserialization; only
//! the identifiers (and requirement text) are mandatory.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Advisory classification of a requirement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequirementCategory {
    #[default]
    Functional,
    Security,
    Compliance,
    NonFunctional,
    DataManagement,
    Testing,
    /// Anything the extractor produced that is not one of the known labels
    Other(String),
}

impl RequirementCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Functional => "functional",
            Self::Security => "security",
            Self::Compliance => "compliance",
            Self::NonFunctional => "non_functional",
            Self::DataManagement => "data_management",
            Self::Testing => "testing",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for RequirementCategory {
    fn from(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "functional" => Self::Functional,
            "security" => Self::Security,
            "compliance" => Self::Compliance,
            "non_functional" | "nonfunctional" => Self::NonFunctional,
            "data_management" | "data" => Self::DataManagement,
            "testing" => Self::Testing,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}

impl From<String> for RequirementCategory {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<RequirementCategory> for String {
    fn from(category: RequirementCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for RequirementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requirement extracted from a source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Unique within one analysis run
    pub id: String,
    /// Free-form requirement statement
    pub text: String,
    #[serde(default, deserialize_with = "category_or_default")]
    pub category: RequirementCategory,
}

/// Null or blank categories fall back to the default
fn category_or_default<'de, D>(deserializer: D) -> std::result::Result<RequirementCategory, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|label| !label.trim().is_empty())
        .map(RequirementCategory::from)
        .unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Requirement {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category: RequirementCategory::default(),
        }
    }

    /// Set the category (builder pattern)
    pub fn with_category(mut self, category: impl Into<RequirementCategory>) -> Self {
        self.category = category.into();
        self
    }
}

/// Testing aspect a generated test case claims to exercise
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestType {
    Positive,
    Negative,
    EdgeCase,
    /// Unknown aspect; never contributes to coverage diversity
    Other(String),
}

impl TestType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::EdgeCase => "edge_case",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for TestType {
    fn from(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            "edge_case" | "edge" | "boundary" => Self::EdgeCase,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}

impl From<String> for TestType {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<TestType> for String {
    fn from(test_type: TestType) -> Self {
        test_type.as_str().to_string()
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Ordered instructions
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
    #[serde(default, rename = "type", alias = "test_type")]
    pub test_type: Option<TestType>,
    #[serde(default)]
    pub category: Option<String>,
}

impl TestCase {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: description.into(),
            steps: Vec::new(),
            test_type: None,
            category: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_type(mut self, test_type: impl Into<TestType>) -> Self {
        self.test_type = Some(test_type.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Lower-cased description and step text used for requirement matching
    ///
    /// Falls back to the title when the generator left the description empty.
    pub fn match_text(&self) -> String {
        let lead = if self.description.trim().is_empty() {
            &self.title
        } else {
            &self.description
        };

        let mut text = lead.to_lowercase();
        for step in &self.steps {
            text.push(' ');
            text.push_str(&step.to_lowercase());
        }
        text
    }

    pub fn is_type(&self, test_type: &TestType) -> bool {
        self.test_type.as_ref() == Some(test_type)
    }

    pub fn is_security(&self) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case("security"))
    }
}

/// Parse a JSON array of requirements
///
/// Missing `id` or `text` fields are contract errors.
pub fn parse_requirements(json: &str) -> Result<Vec<Requirement>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a JSON array of test cases
pub fn parse_test_cases(json: &str) -> Result<Vec<TestCase>> {
    Ok(serde_json::from_str(json)?)
}
