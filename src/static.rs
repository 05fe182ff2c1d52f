//! Static registry
//!
//! Parses every template once at registration and serves the cached parse
//! for the process lifetime. On-disk edits after startup are invisible;
//! that staleness is the point of this mode. Duplicate names are rejected,
//! since a second registration would silently shadow whatever the first
//! call site expects to render.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use include_dir::Dir;
use minijinja::Value;
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::options::TemplateOptions;
use crate::renderer::Renderer;
use crate::set::{split_target, TemplateSet};
use crate::source::{self, FuncMap};

/// Eager-parse registry: name to parsed template set
#[derive(Debug, Default)]
pub struct StaticRender {
    sets: HashMap<String, Arc<TemplateSet>>,
}

impl StaticRender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Insert a set, rejecting empty and duplicate names
    fn insert(&mut self, name: &str, set: TemplateSet) -> RenderResult<Arc<TemplateSet>> {
        if name.is_empty() {
            return Err(RenderError::EmptyName);
        }
        if self.sets.contains_key(name) {
            return Err(RenderError::Duplicate(name.to_string()));
        }
        debug!(%name, root = %set.root(), "StaticRender::insert: registering template");
        let set = Arc::new(set);
        self.sets.insert(name.to_string(), Arc::clone(&set));
        Ok(set)
    }
}

impl Renderer for StaticRender {
    fn add(&mut self, name: &str, set: TemplateSet) -> RenderResult<()> {
        self.insert(name, set)?;
        Ok(())
    }

    fn add_from_files(&mut self, name: &str, files: Vec<PathBuf>) -> RenderResult<Arc<TemplateSet>> {
        let set = source::from_files(&files, &FuncMap::new(), &TemplateOptions::default())?;
        self.insert(name, set)
    }

    fn add_from_glob(&mut self, name: &str, pattern: &str) -> RenderResult<Arc<TemplateSet>> {
        let set = source::from_glob(pattern, &FuncMap::new(), &TemplateOptions::default())?;
        self.insert(name, set)
    }

    fn add_from_embedded(
        &mut self,
        name: &str,
        dir: &'static Dir<'static>,
        files: Vec<String>,
    ) -> RenderResult<Arc<TemplateSet>> {
        let set = source::from_embedded(dir, &files, &FuncMap::new(), &TemplateOptions::default())?;
        self.insert(name, set)
    }

    fn add_from_embedded_with_funcs(
        &mut self,
        name: &str,
        funcs: FuncMap,
        dir: &'static Dir<'static>,
        files: Vec<String>,
    ) -> RenderResult<Arc<TemplateSet>> {
        let set = source::from_embedded(dir, &files, &funcs, &TemplateOptions::default())?;
        self.insert(name, set)
    }

    fn add_from_string(&mut self, name: &str, source: &str) -> RenderResult<Arc<TemplateSet>> {
        let set = source::from_strings(name, &[source.to_string()], &FuncMap::new(), &TemplateOptions::default())?;
        self.insert(name, set)
    }

    fn add_from_strings_with_funcs(
        &mut self,
        name: &str,
        funcs: FuncMap,
        sources: Vec<String>,
    ) -> RenderResult<Arc<TemplateSet>> {
        self.add_from_strings_with_funcs_and_options(name, funcs, TemplateOptions::default(), sources)
    }

    fn add_from_strings_with_funcs_and_options(
        &mut self,
        name: &str,
        funcs: FuncMap,
        options: TemplateOptions,
        sources: Vec<String>,
    ) -> RenderResult<Arc<TemplateSet>> {
        let set = source::from_strings(name, &sources, &funcs, &options)?;
        self.insert(name, set)
    }

    fn add_from_files_with_funcs(
        &mut self,
        name: &str,
        funcs: FuncMap,
        files: Vec<PathBuf>,
    ) -> RenderResult<Arc<TemplateSet>> {
        self.add_from_files_with_funcs_and_options(name, funcs, TemplateOptions::default(), files)
    }

    fn add_from_files_with_funcs_and_options(
        &mut self,
        name: &str,
        funcs: FuncMap,
        options: TemplateOptions,
        files: Vec<PathBuf>,
    ) -> RenderResult<Arc<TemplateSet>> {
        let set = source::from_files(&files, &funcs, &options)?;
        self.insert(name, set)
    }

    fn render(&self, name: &str, data: Value) -> RenderResult<String> {
        debug!(%name, "StaticRender::render: called");
        let (key, fragment) = split_target(name);
        let set = self
            .sets
            .get(key)
            .ok_or_else(|| RenderError::NotFound(key.to_string()))?;
        set.render_addressed(fragment, data)
    }
}
