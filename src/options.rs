//! Delimiter configuration
//!
//! Template sources normally use the engine's `{{` / `}}` variable
//! delimiters. A registration can override them, and the override travels
//! with the template: dynamic rebuilds reuse the delimiters captured at
//! registration time, never the engine defaults.

use minijinja::syntax::SyntaxConfig;

use crate::error::RenderResult;

pub const DEFAULT_LEFT_DELIMITER: &str = "{{";
pub const DEFAULT_RIGHT_DELIMITER: &str = "}}";

/// Per-registration template options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Left variable delimiter
    pub left_delimiter: String,
    /// Right variable delimiter
    pub right_delimiter: String,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            left_delimiter: DEFAULT_LEFT_DELIMITER.to_string(),
            right_delimiter: DEFAULT_RIGHT_DELIMITER.to_string(),
        }
    }
}

impl TemplateOptions {
    /// Options with custom variable delimiters
    pub fn delims(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left_delimiter: left.into(),
            right_delimiter: right.into(),
        }
    }

    /// Whether these options are the engine defaults
    pub fn is_default(&self) -> bool {
        self.left_delimiter == DEFAULT_LEFT_DELIMITER && self.right_delimiter == DEFAULT_RIGHT_DELIMITER
    }

    /// Resolve into an engine syntax configuration
    ///
    /// Delimiter validation (empty or overlapping markers) happens here,
    /// so a bad override fails at registration rather than deep inside a
    /// render call.
    pub(crate) fn syntax(&self) -> RenderResult<SyntaxConfig> {
        if self.is_default() {
            return Ok(SyntaxConfig::default());
        }
        let syntax = SyntaxConfig::builder()
            .variable_delimiters(self.left_delimiter.clone(), self.right_delimiter.clone())
            .build()?;
        Ok(syntax)
    }
}
