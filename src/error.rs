//! Registry error types
//!
//! Every failure in the crate surfaces as a [`RenderError`]. There is no
//! retry or partial-success path; callers decide whether a failure is fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from registry construction and rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template name cannot be empty")]
    EmptyName,

    #[error("template {0} already exists")]
    Duplicate(String),

    #[error("template {0} not found")]
    NotFound(String),

    #[error("no template sources given")]
    NoSources,

    #[error("glob {0} matched no files")]
    EmptyGlob(String),

    #[error("invalid glob pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("embedded template {0} not found")]
    MissingEmbedded(String),

    #[error("embedded template {0} is not valid UTF-8")]
    InvalidUtf8(String),

    #[error(transparent)]
    Engine(#[from] minijinja::Error),
}

/// Result alias used across the registry API
pub type RenderResult<T> = Result<T, RenderError>;
