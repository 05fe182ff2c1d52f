//! Template source parsing
//!
//! Shared construction layer behind both registries. Every `add_from_*`
//! variant funnels into one of these builders, so the static registry's
//! eager parse and the dynamic registry's rebuild-on-render produce
//! identical [`TemplateSet`]s from identical arguments.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use include_dir::Dir;
use minijinja::{Environment, Value};
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::options::TemplateOptions;
use crate::set::TemplateSet;

/// Name-to-function mapping injected into a template set
///
/// Values are engine values, typically produced with
/// [`Value::from_function`]; they are reapplied verbatim on every dynamic
/// rebuild.
pub type FuncMap = HashMap<String, Value>;

/// Fresh environment with the crate's baseline settings applied
///
/// Trailing newlines are kept so file-backed sets render their sources
/// verbatim.
fn base_env(funcs: &FuncMap, options: &TemplateOptions) -> RenderResult<Environment<'static>> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_syntax(options.syntax()?);
    for (name, value) in funcs {
        env.add_global(name.clone(), value.clone());
    }
    Ok(env)
}

/// Base name of a path, used as the template name inside a set
fn template_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Parse a list of files into one set
///
/// Each file is parsed under its base name; the set's root is the first
/// file's base name, the entry point the engine starts execution from.
pub(crate) fn from_files(files: &[PathBuf], funcs: &FuncMap, options: &TemplateOptions) -> RenderResult<TemplateSet> {
    debug!(count = files.len(), "source::from_files: called");
    if files.is_empty() {
        return Err(RenderError::NoSources);
    }
    let mut env = base_env(funcs, options)?;
    for path in files {
        let body = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        env.add_template_owned(template_name(path), body)?;
    }
    let root = template_name(&files[0]);
    Ok(TemplateSet::new(env, root))
}

/// Expand a glob pattern and parse every match into one set
///
/// A pattern matching zero files is an error; a silently empty set would
/// only fail later, at render time, far from the bad pattern.
pub(crate) fn from_glob(pattern: &str, funcs: &FuncMap, options: &TemplateOptions) -> RenderResult<TemplateSet> {
    debug!(%pattern, "source::from_glob: called");
    let entries = glob::glob(pattern).map_err(|source| RenderError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => files.push(path),
            Err(err) => {
                let path = err.path().to_path_buf();
                return Err(RenderError::Io {
                    path,
                    source: err.into_error(),
                });
            }
        }
    }
    if files.is_empty() {
        return Err(RenderError::EmptyGlob(pattern.to_string()));
    }
    debug!(matched = files.len(), "source::from_glob: expanded pattern");
    from_files(&files, funcs, options)
}

/// Parse a subset of an embedded directory into one set
///
/// The directory is compiled into the binary with [`include_dir`], the
/// packaged-binary analog of reading template files from disk.
pub(crate) fn from_embedded(
    dir: &Dir<'static>,
    files: &[String],
    funcs: &FuncMap,
    options: &TemplateOptions,
) -> RenderResult<TemplateSet> {
    debug!(count = files.len(), "source::from_embedded: called");
    if files.is_empty() {
        return Err(RenderError::NoSources);
    }
    let mut env = base_env(funcs, options)?;
    for path in files {
        let file = dir
            .get_file(path)
            .ok_or_else(|| RenderError::MissingEmbedded(path.clone()))?;
        let body = file
            .contents_utf8()
            .ok_or_else(|| RenderError::InvalidUtf8(path.clone()))?;
        env.add_template_owned(template_name(Path::new(path)), body.to_string())?;
    }
    let root = template_name(Path::new(&files[0]));
    Ok(TemplateSet::new(env, root))
}

/// Parse one or more literal bodies into a set rooted at `root`
///
/// Bodies are combined in order into a single root template; trailing
/// fragments typically carry macro or block definitions used by the first.
pub(crate) fn from_strings(
    root: &str,
    sources: &[String],
    funcs: &FuncMap,
    options: &TemplateOptions,
) -> RenderResult<TemplateSet> {
    debug!(%root, count = sources.len(), "source::from_strings: called");
    if sources.is_empty() {
        return Err(RenderError::NoSources);
    }
    let mut env = base_env(funcs, options)?;
    env.add_template_owned(root.to_string(), sources.concat())?;
    Ok(TemplateSet::new(env, root.to_string()))
}
