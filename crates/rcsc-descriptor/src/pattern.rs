//! File match patterns used by transform rules and parse exemptions.

use regex_lite::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised when a pattern is evaluated.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid match pattern {pattern}: {reason}")]
    Invalid { pattern: String, reason: String },
}

/// A regular expression matched against asset paths.
///
/// Patterns are stored as source text and compiled on evaluation, so a
/// descriptor stays plain data that serializes and compares structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPattern {
    /// Regular expression source, e.g. `\.js$`.
    pub source: String,

    /// Match case-insensitively.
    #[serde(default, skip_serializing_if = "is_false")]
    pub case_insensitive: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl MatchPattern {
    /// Case-sensitive pattern.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            case_insensitive: false,
        }
    }

    /// Case-insensitive pattern.
    pub fn case_insensitive(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            case_insensitive: true,
        }
    }

    pub fn compile(&self) -> Result<Regex, PatternError> {
        RegexBuilder::new(&self.source)
            .case_insensitive(self.case_insensitive)
            .build()
            .map_err(|e| PatternError::Invalid {
                pattern: self.to_string(),
                reason: e.to_string(),
            })
    }

    /// Test a path (or module request) against this pattern.
    pub fn is_match(&self, path: &str) -> Result<bool, PatternError> {
        Ok(self.compile()?.is_match(path))
    }
}

/// Renders in regex-literal form (`/\.html$/i`), the notation the bundler
/// configuration uses.
impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)?;
        if self.case_insensitive {
            write!(f, "i")?;
        }
        Ok(())
    }
}
