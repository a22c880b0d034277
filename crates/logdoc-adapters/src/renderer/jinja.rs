//! Template engine backed by `minijinja`.
//!
//! One environment is built per render, with the run's resolver as its
//! loader, so `{% include %}`, `{% import %}` and `{% extends %}` follow the
//! same relative-reference rules as input documents.
//!
//! Template context:
//!
//! | name            | value                                            |
//! |-----------------|--------------------------------------------------|
//! | `doc`           | source root element                              |
//! | `package_name`  | domain name                                      |
//! | `accesslevel`   | `public` or `protected`                          |
//! | `locale`        | bundle locale (per-locale artifacts)             |
//! | `log_file`      | root definition name (per-locale artifacts)      |
//!
//! Elements render as `{ kind, name, attrs, children, nodes, text }`. Extras:
//! the `document(name)` function loads another input document, the
//! `elements(name)` filter selects child elements and `quoted` turns
//! character data into a double-quoted string literal.

use std::collections::BTreeMap;
use std::sync::Arc;

use logdoc_core::{
    application::{
        ApplicationError,
        ports::{ContentResolver, TemplateEngine},
    },
    domain::{TemplateParams, XmlDocument},
    error::LogdocResult,
};
use minijinja::{AutoEscape, Environment, Error, ErrorKind, Value};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct MiniJinjaEngine;

impl MiniJinjaEngine {
    pub fn new() -> Self {
        Self
    }

    fn environment(&self, resolver: Arc<dyn ContentResolver>) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_: &str| AutoEscape::None);

        let loader = Arc::clone(&resolver);
        env.set_loader(move |name: &str| {
            loader
                .resolve_template(name)
                .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
        });

        env.add_function("document", move |name: &str| -> Result<Value, Error> {
            let doc = resolver
                .load_document(name)
                .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;
            Ok(Value::from_serialize(doc.root()))
        });
        env.add_filter("elements", elements);
        env.add_filter("quoted", quoted);
        env
    }
}

impl TemplateEngine for MiniJinjaEngine {
    #[instrument(skip(self, source, params, resolver), fields(document = source.name()))]
    fn render(
        &self,
        template: &str,
        source: &XmlDocument,
        params: &TemplateParams,
        resolver: Arc<dyn ContentResolver>,
    ) -> LogdocResult<String> {
        let env = self.environment(resolver);

        let tmpl = env
            .get_template(template)
            .map_err(|e| ApplicationError::TemplateConfiguration {
                template: template.to_string(),
                reason: describe(&e),
            })?;

        let mut context: BTreeMap<String, Value> = params
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect();
        context.insert("doc".into(), Value::from_serialize(source.root()));

        let output = tmpl
            .render(&context)
            .map_err(|e| ApplicationError::TemplateExecution {
                template: template.to_string(),
                reason: describe(&e),
            })?;

        debug!(bytes = output.len(), "Template rendered");
        Ok(output)
    }
}

/// `{{ doc | elements("group") }}`: child elements with the given name.
fn elements(value: Value, name: &str) -> Result<Vec<Value>, Error> {
    let children = value.get_attr("children")?;
    if children.is_undefined() || children.is_none() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for child in children.try_iter()? {
        let matches = child
            .get_attr("name")
            .ok()
            .is_some_and(|n| n.as_str() == Some(name));
        if matches {
            out.push(child);
        }
    }
    Ok(out)
}

/// Double-quoted literal with `\` and `"` escaped and whitespace runs
/// collapsed to one space.
fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut in_space = false;
    for c in value.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn describe(e: &Error) -> String {
    let mut reason = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    reason
}
