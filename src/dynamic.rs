//! Dynamic registry
//!
//! Stores a construction recipe per template instead of a parsed set, and
//! re-executes the recipe on every render call. Edits to the backing files
//! show up on the next request without a restart, at full parse cost per
//! call. Development mode only; the static registry is the production path.
//!
//! Re-registering a name silently replaces the previous recipe (last write
//! wins), unlike the static registry's duplicate rejection.

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

/// Construction recipe for one registered template
///
/// One case per registration variant, each carrying the original arguments
/// so the parse can be re-executed at render time with the same functions
/// and delimiters it was registered with.
#[derive(Debug)]
pub enum TemplateBuilder {
    /// Already-built set handed in via `add`; rebuilds return it as-is
    Prebuilt { set: Arc<TemplateSet> },
    /// List of template files
    Files { files: Vec<PathBuf>, options: TemplateOptions },
    /// Glob pattern, re-expanded on every rebuild
    Glob { pattern: String, options: TemplateOptions },
    /// Subset of an embedded directory
    Embedded {
        dir: &'static Dir<'static>,
        files: Vec<String>,
        options: TemplateOptions,
    },
    /// Embedded subset with injected functions
    EmbeddedWithFuncs {
        dir: &'static Dir<'static>,
        files: Vec<String>,
        funcs: FuncMap,
        options: TemplateOptions,
    },
    /// One inline body, rooted at the registry key
    Inline { source: String, options: TemplateOptions },
    /// Inline bodies with injected functions, rooted at the registry key
    StringsWithFuncs {
        sources: Vec<String>,
        funcs: FuncMap,
        options: TemplateOptions,
    },
    /// File list with injected functions
    FilesWithFuncs {
        files: Vec<PathBuf>,
        funcs: FuncMap,
        options: TemplateOptions,
    },
}

impl TemplateBuilder {
    /// Execute the recipe, producing a fresh set
    ///
    /// `key` is the registry name the recipe is stored under; inline
    /// variants root their template at it.
    fn build(&self, key: &str) -> RenderResult<Arc<TemplateSet>> {
        debug!(%key, kind = self.kind(), "TemplateBuilder::build: rebuilding template");
        match self {
            Self::Prebuilt { set } => Ok(Arc::clone(set)),
            Self::Files { files, options } => {
                Ok(Arc::new(source::from_files(files, &FuncMap::new(), options)?))
            }
            Self::Glob { pattern, options } => {
                Ok(Arc::new(source::from_glob(pattern, &FuncMap::new(), options)?))
            }
            Self::Embedded { dir, files, options } => {
                Ok(Arc::new(source::from_embedded(dir, files, &FuncMap::new(), options)?))
            }
            Self::EmbeddedWithFuncs { dir, files, funcs, options } => {
                Ok(Arc::new(source::from_embedded(dir, files, funcs, options)?))
            }
            Self::Inline { source, options } => Ok(Arc::new(source::from_strings(
                key,
                std::slice::from_ref(source),
                &FuncMap::new(),
                options,
            )?)),
            Self::StringsWithFuncs { sources, funcs, options } => {
                Ok(Arc::new(source::from_strings(key, sources, funcs, options)?))
            }
            Self::FilesWithFuncs { files, funcs, options } => {
                Ok(Arc::new(source::from_files(files, funcs, options)?))
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Prebuilt { .. } => "prebuilt",
            Self::Files { .. } => "files",
            Self::Glob { .. } => "glob",
            Self::Embedded { .. } => "embedded",
            Self::EmbeddedWithFuncs { .. } => "embedded-with-funcs",
            Self::Inline { .. } => "inline",
            Self::StringsWithFuncs { .. } => "strings-with-funcs",
            Self::FilesWithFuncs { .. } => "files-with-funcs",
        }
    }
}

/// Reparse-per-render registry: name to construction recipe
#[derive(Debug, Default)]
pub struct DynamicRender {
    builders: HashMap<String, TemplateBuilder>,
}

impl DynamicRender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered recipes
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Store a recipe and build it once so registration-time errors surface
    /// immediately; the built set is returned but never cached.
    fn register(&mut self, name: &str, builder: TemplateBuilder) -> RenderResult<Arc<TemplateSet>> {
        if name.is_empty() {
            return Err(RenderError::EmptyName);
        }
        debug!(%name, kind = builder.kind(), "DynamicRender::register: storing recipe");
        let set = builder.build(name)?;
        self.builders.insert(name.to_string(), builder);
        Ok(set)
    }
}

impl Renderer for DynamicRender {
    fn add(&mut self, name: &str, set: TemplateSet) -> RenderResult<()> {
        self.register(name, TemplateBuilder::Prebuilt { set: Arc::new(set) })?;
        Ok(())
    }

    fn add_from_files(&mut self, name: &str, files: Vec<PathBuf>) -> RenderResult<Arc<TemplateSet>> {
        self.register(
            name,
            TemplateBuilder::Files {
                files,
                options: TemplateOptions::default(),
            },
        )
    }

    fn add_from_glob(&mut self, name: &str, pattern: &str) -> RenderResult<Arc<TemplateSet>> {
        self.register(
            name,
            TemplateBuilder::Glob {
                pattern: pattern.to_string(),
                options: TemplateOptions::default(),
            },
        )
    }

    fn add_from_embedded(
        &mut self,
        name: &str,
        dir: &'static Dir<'static>,
        files: Vec<String>,
    ) -> RenderResult<Arc<TemplateSet>> {
        self.register(
            name,
            TemplateBuilder::Embedded {
                dir,
                files,
                options: TemplateOptions::default(),
            },
        )
    }

    fn add_from_embedded_with_funcs(
        &mut self,
        name: &str,
        funcs: FuncMap,
        dir: &'static Dir<'static>,
        files: Vec<String>,
    ) -> RenderResult<Arc<TemplateSet>> {
        self.register(
            name,
            TemplateBuilder::EmbeddedWithFuncs {
                dir,
                files,
                funcs,
                options: TemplateOptions::default(),
            },
        )
    }

    fn add_from_string(&mut self, name: &str, source: &str) -> RenderResult<Arc<TemplateSet>> {
        self.register(
            name,
            TemplateBuilder::Inline {
                source: source.to_string(),
                options: TemplateOptions::default(),
            },
        )
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
        self.register(name, TemplateBuilder::StringsWithFuncs { sources, funcs, options })
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
        self.register(name, TemplateBuilder::FilesWithFuncs { files, funcs, options })
    }

    fn render(&self, name: &str, data: Value) -> RenderResult<String> {
        debug!(%name, "DynamicRender::render: called");
        let (key, fragment) = split_target(name);
        let builder = self
            .builders
            .get(key)
            .ok_or_else(|| RenderError::NotFound(key.to_string()))?;
        let set = builder.build(key)?;
        set.render_addressed(fragment, data)
    }
}
