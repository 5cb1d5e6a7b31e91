//! Rendering configuration for element collections.

/// Default phrase joining element descriptions.
pub const DEFAULT_DESCRIBE_SEPARATOR: &str = ", then ";

/// Controls how an [`crate::ElementCollection`] renders descriptions and
/// metadata. Compiled regex syntax is never affected.
///
/// # Example
///
/// ```rust
/// use regex_compose::RenderConfig;
///
/// let config = RenderConfig::builder()
///     .with_describe_separator(" followed by ")
///     .with_pattern_in_metadata(false)
///     .build();
/// assert_eq!(config.describe_separator, " followed by ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Phrase placed between element descriptions.
    pub describe_separator: String,
    /// Whether collection metadata carries the compiled pattern.
    pub include_pattern_in_metadata: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            describe_separator: DEFAULT_DESCRIBE_SEPARATOR.to_string(),
            include_pattern_in_metadata: true,
        }
    }
}

impl RenderConfig {
    /// Creates a new builder for RenderConfig.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }
}

/// Builder for RenderConfig.
#[derive(Debug, Clone, Default)]
pub struct RenderConfigBuilder {
    describe_separator: Option<String>,
    include_pattern_in_metadata: Option<bool>,
}

impl RenderConfigBuilder {
    /// Sets the description separator.
    pub fn with_describe_separator(mut self, separator: impl Into<String>) -> Self {
        self.describe_separator = Some(separator.into());
        self
    }

    /// Enables or disables the compiled pattern in metadata.
    pub fn with_pattern_in_metadata(mut self, include: bool) -> Self {
        self.include_pattern_in_metadata = Some(include);
        self
    }

    /// Builds the RenderConfig.
    pub fn build(self) -> RenderConfig {
        let defaults = RenderConfig::default();
        RenderConfig {
            describe_separator: self
                .describe_separator
                .unwrap_or(defaults.describe_separator),
            include_pattern_in_metadata: self
                .include_pattern_in_metadata
                .unwrap_or(defaults.include_pattern_in_metadata),
        }
    }
}
