//! Embedded minijinja templates for the form page and the downloadable document.
//!
//! Templates are compiled into the binary and parsed once on first use. Their `.html` names turn
//! on HTML auto-escaping, so user input and model output are always escaped on interpolation.

use minijinja::Environment;
use serde::Serialize;
use std::sync::LazyLock;

pub const DOCUMENT: &str = "document.html";
pub const INDEX: &str = "index.html";

static TEMPLATES: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.add_template(DOCUMENT, include_str!("../templates/document.html"))
        .expect("document template must parse");
    env.add_template(INDEX, include_str!("../templates/index.html"))
        .expect("index template must parse");
    env
});

pub fn render<S: Serialize>(name: &str, context: S) -> Result<String, minijinja::Error> {
    TEMPLATES.get_template(name)?.render(context)
}
