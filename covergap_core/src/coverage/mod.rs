//! Lexical requirement coverage
//!
//! Keyword extraction, the requirement/test match predicate, and the
//! per-requirement coverage map built on top of them.

pub mod keywords;
pub mod mapper;
pub mod matcher;

pub use keywords::{extract_keywords, STOP_WORDS};
pub use mapper::{build_coverage_map, compute_coverage_score, CoverageEntry};
pub use matcher::{covers, match_ratio};
