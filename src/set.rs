//! Parsed template sets
//!
//! A [`TemplateSet`] is the unit a registry stores (static mode) or rebuilds
//! (dynamic mode): an owned engine environment holding every parsed source
//! fragment, plus the name of the root template execution starts from.

use minijinja::{Environment, Value};
use serde::Serialize;
use tracing::debug;

use crate::error::RenderResult;

/// One or more parsed template fragments with a designated root
#[derive(Debug, Clone)]
pub struct TemplateSet {
    /// Engine environment owning the parsed fragments
    env: Environment<'static>,
    /// Name of the template execution starts from
    root: String,
}

impl TemplateSet {
    pub(crate) fn new(env: Environment<'static>, root: String) -> Self {
        Self { env, root }
    }

    /// Name of the root template
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Render the root template with the given data
    pub fn render<S: Serialize>(&self, data: S) -> RenderResult<String> {
        debug!(root = %self.root, "TemplateSet::render: called");
        let tmpl = self.env.get_template(&self.root)?;
        Ok(tmpl.render(data)?)
    }

    /// Render a single fragment of the set
    ///
    /// A fragment is either a sibling template parsed into the same set
    /// (for multi-file sets, addressed by file base name) or a named block
    /// of the root template.
    pub fn render_fragment<S: Serialize>(&self, fragment: &str, data: S) -> RenderResult<String> {
        debug!(root = %self.root, %fragment, "TemplateSet::render_fragment: called");
        if let Ok(tmpl) = self.env.get_template(fragment) {
            return Ok(tmpl.render(data)?);
        }
        let tmpl = self.env.get_template(&self.root)?;
        let mut state = tmpl.eval_to_state(data)?;
        Ok(state.render_block(fragment)?)
    }

    /// Render `fragment` of the set if one is given, the root otherwise
    pub(crate) fn render_addressed(&self, fragment: Option<&str>, data: Value) -> RenderResult<String> {
        match fragment {
            Some(fragment) => self.render_fragment(fragment, data),
            None => self.render(data),
        }
    }
}

/// Split a render target into its registry key and optional fragment
pub(crate) fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('#') {
        Some((key, fragment)) => (key, Some(fragment)),
        None => (target, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_target_plain() {
        assert_eq!(split_target("index"), ("index", None));
    }

    #[test]
    fn test_split_target_fragment() {
        assert_eq!(split_target("index#item"), ("index", Some("item")));
    }
}
