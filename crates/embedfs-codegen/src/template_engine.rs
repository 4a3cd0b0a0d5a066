//! Template engine for source generation using Handlebars.
//!
//! Wraps Handlebars with the built-in snapshot template registered, strict
//! mode on, and HTML escaping off (the output is Rust source, not markup).
//!
//! # Examples
//!
//! ```
//! use embedfs_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "// {{who}} & co").unwrap();
//! assert_eq!(engine.render("greeting", &json!({"who": "a<b>"})).unwrap(), "// a<b> & co");
//! ```

use handlebars::Handlebars;
use embedfs_core::{Error, Result};
use serde::Serialize;

/// Name of the built-in template that renders a whole snapshot module.
pub const SNAPSHOT_TEMPLATE: &str = "snapshot";

/// Template engine for source generation.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates an engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderFailed`] if a built-in template does not parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_template_string(
                SNAPSHOT_TEMPLATE,
                include_str!("../templates/snapshot.rs.hbs"),
            )
            .map_err(|e| Error::RenderFailed {
                message: format!("failed to register snapshot template: {e}"),
            })?;

        Ok(Self { handlebars })
    }

    /// Renders a registered template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderFailed`] if the template is unknown, the
    /// context is missing a variable, or serialization fails.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::RenderFailed {
                message: format!("template {template_name} failed: {e}"),
            })
    }

    /// Registers an additional template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderFailed`] if the template does not parse.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::RenderFailed {
                message: format!("failed to register template {name}: {e}"),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_template_registered() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.has_template(SNAPSHOT_TEMPLATE));
        assert!(!engine.has_template("missing"));
    }

    #[test]
    fn test_strict_mode_rejects_missing_variable() {
        let mut engine = TemplateEngine::new().unwrap();
        engine.register_template_string("t", "{{absent}}").unwrap();
        let err = engine.render("t", &json!({})).unwrap_err();
        assert!(matches!(err, Error::RenderFailed { .. }));
    }

    #[test]
    fn test_no_html_escaping() {
        let mut engine = TemplateEngine::new().unwrap();
        engine.register_template_string("t", "b\"{{x}}\"").unwrap();
        let out = engine.render("t", &json!({"x": "\"q\" <&>"})).unwrap();
        assert_eq!(out, "b\"\"q\" <&>\"");
    }

    #[test]
    fn test_unknown_template() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.render("nope", &json!({})).is_err());
    }

    #[test]
    fn test_invalid_template_rejected() {
        let mut engine = TemplateEngine::new().unwrap();
        assert!(engine.register_template_string("bad", "{{#each}}").is_err());
    }
}
