//! The result of a successful build.

use std::fmt;

use serde_json::Value;

/// A compiled pattern with its description and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    source: String,
    description: String,
    metadata: Value,
}

impl Pattern {
    pub(crate) fn new(source: String, description: String, metadata: Value) -> Self {
        Self {
            source,
            description,
            metadata,
        }
    }

    /// The compiled regex syntax.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Human-readable description of the pattern.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Structured metadata of the pattern.
    pub fn metadata(&self) -> &Value {
        &self.metadata
    }

    /// Consumes the pattern, returning the compiled syntax.
    pub fn into_string(self) -> String {
        self.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl AsRef<str> for Pattern {
    fn as_ref(&self) -> &str {
        &self.source
    }
}
