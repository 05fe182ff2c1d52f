//! Shared registry contract
//!
//! Both registries implement [`Renderer`], so application code picks a mode
//! once at startup and stays implementation-agnostic everywhere else.

use std::path::PathBuf;
use std::sync::Arc;

use include_dir::Dir;
use minijinja::Value;
use tracing::debug;

use crate::dynamic::DynamicRender;
use crate::error::RenderResult;
use crate::options::TemplateOptions;
use crate::r#static::StaticRender;
use crate::set::TemplateSet;
use crate::source::FuncMap;

/// Capability contract shared by the static and dynamic registries
///
/// Every `add_from_*` variant registers under `name` and hands back the
/// parsed set for optional direct use. `render` accepts a plain registry
/// key or a `key#fragment` address selecting a single fragment of the set.
pub trait Renderer {
    /// Register an already-built template set
    fn add(&mut self, name: &str, set: TemplateSet) -> RenderResult<()>;

    /// Register a set parsed from a list of files
    fn add_from_files(&mut self, name: &str, files: Vec<PathBuf>) -> RenderResult<Arc<TemplateSet>>;

    /// Register a set parsed from every file matching a glob pattern
    fn add_from_glob(&mut self, name: &str, pattern: &str) -> RenderResult<Arc<TemplateSet>>;

    /// Register a set parsed from files embedded in the binary
    fn add_from_embedded(
        &mut self,
        name: &str,
        dir: &'static Dir<'static>,
        files: Vec<String>,
    ) -> RenderResult<Arc<TemplateSet>>;

    /// Register a set parsed from embedded files, with injected functions
    fn add_from_embedded_with_funcs(
        &mut self,
        name: &str,
        funcs: FuncMap,
        dir: &'static Dir<'static>,
        files: Vec<String>,
    ) -> RenderResult<Arc<TemplateSet>>;

    /// Register a set parsed from one inline body
    fn add_from_string(&mut self, name: &str, source: &str) -> RenderResult<Arc<TemplateSet>>;

    /// Register a set combined from inline bodies, with injected functions
    fn add_from_strings_with_funcs(
        &mut self,
        name: &str,
        funcs: FuncMap,
        sources: Vec<String>,
    ) -> RenderResult<Arc<TemplateSet>>;

    /// Like [`Renderer::add_from_strings_with_funcs`] with delimiter options
    fn add_from_strings_with_funcs_and_options(
        &mut self,
        name: &str,
        funcs: FuncMap,
        options: TemplateOptions,
        sources: Vec<String>,
    ) -> RenderResult<Arc<TemplateSet>>;

    /// Register a set parsed from files, with injected functions
    fn add_from_files_with_funcs(
        &mut self,
        name: &str,
        funcs: FuncMap,
        files: Vec<PathBuf>,
    ) -> RenderResult<Arc<TemplateSet>>;

    /// Like [`Renderer::add_from_files_with_funcs`] with delimiter options
    fn add_from_files_with_funcs_and_options(
        &mut self,
        name: &str,
        funcs: FuncMap,
        options: TemplateOptions,
        files: Vec<PathBuf>,
    ) -> RenderResult<Arc<TemplateSet>>;

    /// Render the named template (or `name#fragment`) with the given data
    fn render(&self, name: &str, data: Value) -> RenderResult<String>;
}

/// Registry operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Parse once at registration, serve the cached parse forever
    Static,
    /// Store construction recipes, re-parse from source on every render
    Dynamic,
}

impl RenderMode {
    /// Pick a mode from a debug flag: debug builds re-parse, release serves
    /// the startup parse
    pub fn from_debug(debug: bool) -> Self {
        if debug { Self::Dynamic } else { Self::Static }
    }
}

/// Create a registry for the given mode
pub fn new_renderer(mode: RenderMode) -> Box<dyn Renderer + Send + Sync> {
    debug!(?mode, "new_renderer: called");
    match mode {
        RenderMode::Static => Box::new(StaticRender::new()),
        RenderMode::Dynamic => Box::new(DynamicRender::new()),
    }
}
