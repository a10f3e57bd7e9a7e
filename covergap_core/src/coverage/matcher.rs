//! Requirement/test match predicate

use indexmap::IndexSet;

use crate::types::{Requirement, TestCase};

use super::keywords::extract_keywords;

/// Fraction of the requirement's keywords mentioned anywhere in the test
///
/// Keywords are matched as substrings of the lower-cased description and
/// step text. A requirement with no keywords has ratio 0.0.
pub fn match_ratio(test_case: &TestCase, requirement: &Requirement) -> f64 {
    keyword_ratio(&extract_keywords(&requirement.text), &test_case.match_text())
}

/// Ratio over pre-extracted keywords and a pre-lowered haystack
pub(crate) fn keyword_ratio(keywords: &IndexSet<String>, haystack: &str) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let matched = keywords
        .iter()
        .filter(|keyword| haystack.contains(keyword.as_str()))
        .count();

    matched as f64 / keywords.len() as f64
}

/// Whether `test_case` covers `requirement`
///
/// True iff the match ratio is strictly greater than `threshold`.
pub fn covers(test_case: &TestCase, requirement: &Requirement, threshold: f64) -> bool {
    match_ratio(test_case, requirement) > threshold
}
