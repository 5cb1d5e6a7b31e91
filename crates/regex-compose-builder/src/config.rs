//! Configuration types for the pattern builder.

use regex_compose::RenderConfig;

/// Default limit on nested builder closures.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Configuration for the pattern builder.
///
/// # Example
///
/// ```rust
/// use regex_compose_builder::{BuilderConfig, RenderConfig};
///
/// let config = BuilderConfig::builder()
///     .with_render(RenderConfig::builder().with_describe_separator(" and ").build())
///     .with_max_depth(8)
///     .build();
/// assert_eq!(config.max_depth, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Rendering of descriptions and metadata.
    pub render: RenderConfig,
    /// Maximum nesting of group, lookaround and alternative closures.
    pub max_depth: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BuilderConfig {
    /// Creates a new builder for BuilderConfig.
    pub fn builder() -> BuilderConfigBuilder {
        BuilderConfigBuilder::default()
    }
}

/// Builder for BuilderConfig.
#[derive(Debug, Clone, Default)]
pub struct BuilderConfigBuilder {
    render: Option<RenderConfig>,
    max_depth: Option<usize>,
}

impl BuilderConfigBuilder {
    /// Sets the render configuration.
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = Some(render);
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Builds the BuilderConfig.
    pub fn build(self) -> BuilderConfig {
        BuilderConfig {
            render: self.render.unwrap_or_default(),
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        }
    }
}
