//! Built-in templates, compiled into the binary.

use logdoc_core::{application::ports::TemplateStore, domain::RelativeRef, error::LogdocResult};

/// Logical path and source of every built-in template.
const BUILTIN: &[(&str, &str)] = &[
    (
        "templates/_header.jinja",
        include_str!("../../templates/_header.jinja"),
    ),
    (
        "templates/_java.jinja",
        include_str!("../../templates/_java.jinja"),
    ),
    (
        "templates/log_to_Log_java.jinja",
        include_str!("../../templates/log_to_Log_java.jinja"),
    ),
    (
        "templates/log_to_TranslationBundle_java.jinja",
        include_str!("../../templates/log_to_TranslationBundle_java.jinja"),
    ),
    (
        "templates/translation-bundle_to_java.jinja",
        include_str!("../../templates/translation-bundle_to_java.jinja"),
    ),
    (
        "templates/slf4j/log_to_Log_java.jinja",
        include_str!("../../templates/slf4j/log_to_Log_java.jinja"),
    ),
];

/// Read-only store over the built-in template set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateStore;

impl EmbeddedTemplateStore {
    pub fn new() -> Self {
        Self
    }

    /// Number of built-in templates.
    pub fn len(&self) -> usize {
        BUILTIN.len()
    }

    pub fn is_empty(&self) -> bool {
        BUILTIN.is_empty()
    }
}

impl TemplateStore for EmbeddedTemplateStore {
    fn load(&self, path: &RelativeRef) -> LogdocResult<Option<String>> {
        Ok(BUILTIN
            .iter()
            .find(|(name, _)| *name == path.as_str())
            .map(|(_, source)| (*source).to_string()))
    }

    fn list(&self) -> LogdocResult<Vec<String>> {
        let mut names: Vec<String> = BUILTIN.iter().map(|(n, _)| (*n).to_string()).collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_artifact_template_is_built_in() {
        let store = EmbeddedTemplateStore::new();
        for path in [
            "templates/log_to_Log_java.jinja",
            "templates/log_to_TranslationBundle_java.jinja",
            "templates/translation-bundle_to_java.jinja",
            "templates/slf4j/log_to_Log_java.jinja",
        ] {
            let reference = RelativeRef::parse(path).unwrap();
            assert!(store.load(&reference).unwrap().is_some(), "{path}");
        }
    }

    #[test]
    fn unknown_template_is_none() {
        let reference = RelativeRef::parse("templates/nope.jinja").unwrap();
        assert_eq!(EmbeddedTemplateStore.load(&reference).unwrap(), None);
    }
}
