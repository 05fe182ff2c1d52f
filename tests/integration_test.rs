//! Integration tests for the multitemplate registries
//!
//! These tests verify end-to-end behavior of both registry modes through
//! the shared Renderer contract.

use std::fs;
use std::path::PathBuf;

use include_dir::{include_dir, Dir};
use minijinja::{context, Value};
use multitemplate::{
    new_renderer, DynamicRender, FuncMap, RenderError, RenderMode, Renderer, StaticRender, TemplateOptions,
};
use serde::Serialize;
use tempfile::TempDir;

static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/tests/templates");

fn shout_funcs() -> FuncMap {
    let mut funcs = FuncMap::new();
    funcs.insert(
        "shout".to_string(),
        Value::from_function(|input: String| input.to_uppercase()),
    );
    funcs
}

/// Write the two-file article fixture into `dir`, returning both paths
fn write_article_fixture(dir: &TempDir) -> (PathBuf, PathBuf) {
    let base = dir.path().join("base.html");
    let article = dir.path().join("article.html");
    fs::write(&base, "<p>{{ title }}</p>\n{% include \"article.html\" %}").expect("Failed to write base.html");
    fs::write(&article, "Hi, this is article template\n").expect("Failed to write article.html");
    (base, article)
}

// =============================================================================
// Static Registry Tests
// =============================================================================

#[test]
fn test_static_inline_string_end_to_end() {
    let mut r = StaticRender::new();
    r.add_from_string("greet", "Welcome to {{ name }} template")
        .expect("Failed to add template");

    let body = r.render("greet", context! { name => "index" }).expect("Failed to render");
    assert_eq!(body, "Welcome to index template");
}

#[test]
fn test_static_multiple_files_end_to_end() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (base, article) = write_article_fixture(&dir);

    let mut r = StaticRender::new();
    r.add_from_files("index", vec![base, article]).expect("Failed to add template");

    let body = r
        .render("index", context! { title => "Test Multiple Template" })
        .expect("Failed to render");
    assert_eq!(body, "<p>Test Multiple Template</p>\nHi, this is article template\n");
}

#[test]
fn test_static_matches_direct_engine_output() {
    let source = "Welcome to {{ name }} template";

    let mut env = minijinja::Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template("greet", source).expect("Failed to add template");
    let direct = env
        .get_template("greet")
        .unwrap()
        .render(context! { name => "index" })
        .expect("Failed to render directly");

    let mut r = StaticRender::new();
    r.add_from_string("greet", source).expect("Failed to add template");
    let via_registry = r.render("greet", context! { name => "index" }).expect("Failed to render");

    assert_eq!(via_registry, direct);
}

#[test]
fn test_static_duplicate_name_rejected() {
    let mut r = StaticRender::new();
    r.add_from_string("greet", "one").expect("Failed to add template");

    let err = r.add_from_string("greet", "two").unwrap_err();
    assert!(matches!(err, RenderError::Duplicate(name) if name == "greet"));
    // the original registration is untouched
    assert_eq!(r.render("greet", context! {}).unwrap(), "one");
}

#[test]
fn test_static_stale_after_file_edit() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("page.html");
    fs::write(&path, "version one\n").expect("Failed to write template");

    let mut r = StaticRender::new();
    r.add_from_files("page", vec![path.clone()]).expect("Failed to add template");
    assert_eq!(r.render("page", context! {}).unwrap(), "version one\n");

    fs::write(&path, "version two\n").expect("Failed to rewrite template");
    // parsed once at registration; the edit must not show up
    assert_eq!(r.render("page", context! {}).unwrap(), "version one\n");
}

#[test]
fn test_static_glob() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("a.html"), "A{% include \"b.html\" %}").expect("Failed to write a.html");
    fs::write(dir.path().join("b.html"), "B").expect("Failed to write b.html");

    let mut r = StaticRender::new();
    let pattern = format!("{}/*.html", dir.path().display());
    r.add_from_glob("pages", &pattern).expect("Failed to add glob");

    assert_eq!(r.render("pages", context! {}).unwrap(), "AB");
}

#[test]
fn test_static_glob_zero_matches() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pattern = format!("{}/*.html", dir.path().display());

    let mut r = StaticRender::new();
    let err = r.add_from_glob("pages", &pattern).unwrap_err();
    assert!(matches!(err, RenderError::EmptyGlob(_)));
}

#[test]
fn test_static_funcs() {
    let mut r = StaticRender::new();
    r.add_from_strings_with_funcs("loud", shout_funcs(), vec!["{{ shout(name) }}!".to_string()])
        .expect("Failed to add template");

    assert_eq!(r.render("loud", context! { name => "quiet" }).unwrap(), "QUIET!");
}

// =============================================================================
// Delimiter Override Tests
// =============================================================================

#[test]
fn test_custom_delimiters_render() {
    let mut r = StaticRender::new();
    r.add_from_strings_with_funcs_and_options(
        "greet",
        FuncMap::new(),
        TemplateOptions::delims("<%", "%>"),
        vec!["Welcome to <% name %> template".to_string()],
    )
    .expect("Failed to add template");

    let body = r.render("greet", context! { name => "index" }).unwrap();
    assert_eq!(body, "Welcome to index template");
}

#[test]
fn test_custom_delimiter_body_is_literal_under_defaults() {
    let mut r = StaticRender::new();
    r.add_from_string("greet", "Welcome to <% name %> template")
        .expect("Failed to add template");

    // under default delimiters the markers are plain text
    let body = r.render("greet", context! { name => "index" }).unwrap();
    assert_eq!(body, "Welcome to <% name %> template");
}

#[test]
fn test_dynamic_rebuild_keeps_registration_delimiters() {
    let mut r = DynamicRender::new();
    r.add_from_strings_with_funcs_and_options(
        "greet",
        FuncMap::new(),
        TemplateOptions::delims("<%", "%>"),
        vec!["Welcome to <% name %> template".to_string()],
    )
    .expect("Failed to add template");

    // every render call re-parses; the captured delimiters must be reused
    for _ in 0..2 {
        let body = r.render("greet", context! { name => "index" }).unwrap();
        assert_eq!(body, "Welcome to index template");
    }
}

// =============================================================================
// Fragment Addressing Tests
// =============================================================================

#[test]
fn test_fragment_block_addressing() {
    let mut r = StaticRender::new();
    r.add_from_string("index", "header|{% block item %}the item{% endblock %}|footer")
        .expect("Failed to add template");

    assert_eq!(
        r.render("index", context! {}).unwrap(),
        "header|the item|footer"
    );
    assert_eq!(r.render("index#item", context! {}).unwrap(), "the item");
}

#[test]
fn test_fragment_sibling_file_addressing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (base, article) = write_article_fixture(&dir);

    let mut r = StaticRender::new();
    r.add_from_files("index", vec![base, article]).expect("Failed to add template");

    assert_eq!(
        r.render("index#article.html", context! {}).unwrap(),
        "Hi, this is article template\n"
    );
}

#[test]
fn test_dynamic_fragment_addressing() {
    let mut r = DynamicRender::new();
    r.add_from_string("index", "{% block item %}fresh item{% endblock %}")
        .expect("Failed to add template");

    assert_eq!(r.render("index#item", context! {}).unwrap(), "fresh item");
}

// =============================================================================
// Dynamic Registry Tests
// =============================================================================

#[test]
fn test_dynamic_fresh_after_file_edit() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("page.html");
    fs::write(&path, "version one\n").expect("Failed to write template");

    let mut r = DynamicRender::new();
    r.add_from_files("page", vec![path.clone()]).expect("Failed to add template");
    assert_eq!(r.render("page", context! {}).unwrap(), "version one\n");

    fs::write(&path, "version two\n").expect("Failed to rewrite template");
    // reparsed per render; the edit shows up immediately
    assert_eq!(r.render("page", context! {}).unwrap(), "version two\n");
}

#[test]
fn test_dynamic_reinsert_replaces() {
    let mut r = DynamicRender::new();
    r.add_from_string("greet", "first").expect("Failed to add template");
    r.add_from_string("greet", "second").expect("Failed to re-add template");

    assert_eq!(r.render("greet", context! {}).unwrap(), "second");
}

#[test]
fn test_dynamic_render_after_file_removed() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("page.html");
    fs::write(&path, "here today\n").expect("Failed to write template");

    let mut r = DynamicRender::new();
    r.add_from_files("page", vec![path.clone()]).expect("Failed to add template");
    fs::remove_file(&path).expect("Failed to remove template");

    // the rebuild hits the missing file and reports it
    let err = r.render("page", context! {}).unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }));
}

#[test]
fn test_dynamic_funcs_survive_rebuild() {
    let mut r = DynamicRender::new();
    r.add_from_strings_with_funcs("loud", shout_funcs(), vec!["{{ shout(name) }}".to_string()])
        .expect("Failed to add template");

    for _ in 0..2 {
        assert_eq!(r.render("loud", context! { name => "hi" }).unwrap(), "HI");
    }
}

// =============================================================================
// Lookup Contract Tests
// =============================================================================

#[test]
fn test_missing_name_reported_identically() {
    let static_err = StaticRender::new().render("ghost", context! {}).unwrap_err();
    let dynamic_err = DynamicRender::new().render("ghost", context! {}).unwrap_err();

    assert!(matches!(static_err, RenderError::NotFound(ref name) if name == "ghost"));
    assert!(matches!(dynamic_err, RenderError::NotFound(ref name) if name == "ghost"));
    assert_eq!(static_err.to_string(), dynamic_err.to_string());
}

// =============================================================================
// Embedded Directory Tests
// =============================================================================

#[test]
fn test_embedded_static_and_dynamic() {
    for mode in [RenderMode::Static, RenderMode::Dynamic] {
        let mut r = new_renderer(mode);
        r.add_from_embedded("hello", &TEMPLATES, vec!["hello.html".to_string()])
            .expect("Failed to add embedded template");

        let body = r.render("hello", context! { name => "index" }).unwrap();
        assert_eq!(body, "Hello index from embedded\n");
    }
}

#[test]
fn test_embedded_with_funcs() {
    let mut r = StaticRender::new();
    r.add_from_embedded_with_funcs("loud", shout_funcs(), &TEMPLATES, vec!["loud.html".to_string()])
        .expect("Failed to add embedded template");

    assert_eq!(r.render("loud", context! { name => "soft" }).unwrap(), "SOFT\n");
}

#[test]
fn test_embedded_missing_file() {
    let mut r = StaticRender::new();
    let err = r
        .add_from_embedded("nope", &TEMPLATES, vec!["nope.html".to_string()])
        .unwrap_err();
    assert!(matches!(err, RenderError::MissingEmbedded(path) if path == "nope.html"));
}

// =============================================================================
// Mode Selection Tests
// =============================================================================

#[test]
fn test_mode_selected_once_call_sites_agnostic() {
    fn register_and_render(r: &mut (dyn Renderer + Send + Sync)) -> String {
        r.add_from_string("greet", "Welcome to {{ name }} template")
            .expect("Failed to add template");
        r.render("greet", context! { name => "index" }).expect("Failed to render")
    }

    let mut debug = new_renderer(RenderMode::from_debug(true));
    let mut release = new_renderer(RenderMode::from_debug(false));

    assert_eq!(register_and_render(debug.as_mut()), "Welcome to index template");
    assert_eq!(register_and_render(release.as_mut()), "Welcome to index template");
}

// =============================================================================
// Data Payload Tests
// =============================================================================

#[test]
fn test_serialize_payloads() {
    #[derive(Serialize)]
    struct Page {
        name: String,
    }

    let mut r = StaticRender::new();
    let set = r
        .add_from_string("greet", "Welcome to {{ name }} template")
        .expect("Failed to add template");

    // direct set rendering takes any Serialize payload
    let from_struct = set
        .render(Page {
            name: "index".to_string(),
        })
        .unwrap();

    // the trait boundary takes an engine Value
    let from_json = r
        .render("greet", Value::from_serialize(serde_json::json!({ "name": "index" })))
        .unwrap();

    assert_eq!(from_struct, "Welcome to index template");
    assert_eq!(from_json, from_struct);
}
