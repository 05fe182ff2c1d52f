//! Multitemplate - dual-mode template registry
//!
//! A registry mapping logical names to parsed [MiniJinja] template sets,
//! with two operating modes behind one [`Renderer`] trait:
//!
//! - **Static**: every template is parsed once at registration and the
//!   parse is served for the process lifetime. The production mode.
//! - **Dynamic**: the registry stores the construction recipe (files, glob,
//!   embedded dir, inline bodies, functions, delimiters) and re-parses it
//!   on every render call, so on-disk edits show up without a restart. The
//!   development mode.
//!
//! # Core Concepts
//!
//! - **One Contract**: call sites depend on [`Renderer`] and pick a mode
//!   once at startup via [`new_renderer`]
//! - **Recipes, Not Caches**: dynamic mode never caches a parse; freshness
//!   is traded for per-call parse cost
//! - **Typed Failures**: every configuration, parse, and lookup failure is
//!   a [`RenderError`], never an abort
//!
//! # Example
//!
//! ```
//! use multitemplate::{new_renderer, RenderMode, Renderer};
//! use minijinja::context;
//!
//! let mut templates = new_renderer(RenderMode::Static);
//! templates.add_from_string("greet", "Welcome to {{ name }} template").unwrap();
//! let body = templates.render("greet", context! { name => "index" }).unwrap();
//! assert_eq!(body, "Welcome to index template");
//! ```
//!
//! # Modules
//!
//! - [`r#static`] - eager-parse registry
//! - [`dynamic`] - reparse-per-render registry and its recipe enum
//! - [`renderer`] - the shared trait and mode selection
//! - [`source`] - the parse layer both registries share
//!
//! [MiniJinja]: https://docs.rs/minijinja

pub mod dynamic;
pub mod error;
pub mod options;
pub mod renderer;
pub mod set;
pub mod source;

// Note: 'static' is a reserved keyword, so we use r#static
#[path = "static.rs"]
pub mod r#static;

// Re-export commonly used types
pub use dynamic::{DynamicRender, TemplateBuilder};
pub use error::{RenderError, RenderResult};
pub use options::{TemplateOptions, DEFAULT_LEFT_DELIMITER, DEFAULT_RIGHT_DELIMITER};
pub use r#static::StaticRender;
pub use renderer::{new_renderer, RenderMode, Renderer};
pub use set::TemplateSet;
pub use source::FuncMap;

// The engine is part of the public surface (render data, injected
// functions), so reexport it for callers.
pub use minijinja;
pub use minijinja::{context, Value};
