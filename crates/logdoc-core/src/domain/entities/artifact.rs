//! Generated artifacts and the template parameters bound for each.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::value_objects::{Locale, Target};

/// Root of the logical template namespace.
pub const TEMPLATE_ROOT: &str = "templates";

/// Extension of every template in the logical namespace.
pub const TEMPLATE_EXTENSION: &str = "jinja";

/// Logical path of a template, optionally inside a target directory:
/// `templates/<name>.jinja` or `templates/<target>/<name>.jinja`.
pub fn template_path(target: Option<&Target>, name: &str) -> String {
    match target {
        Some(t) => format!("{TEMPLATE_ROOT}/{t}/{name}.{TEMPLATE_EXTENSION}"),
        None => format!("{TEMPLATE_ROOT}/{name}.{TEMPLATE_EXTENSION}"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    /// `Log.java`, from `log.xml`.
    LogClass,
    /// `TranslationBundle.java`, from `log.xml`.
    TranslationBundleClass,
    /// `TranslationBundle_<locale>.java`, from that locale's bundle.
    LocaleBundleClass(Locale),
}

impl ArtifactKind {
    fn template_name(&self) -> &'static str {
        match self {
            Self::LogClass => "log_to_Log_java",
            Self::TranslationBundleClass => "log_to_TranslationBundle_java",
            Self::LocaleBundleClass(_) => "translation-bundle_to_java",
        }
    }

    fn output_file(&self) -> String {
        match self {
            Self::LogClass => "Log.java".into(),
            Self::TranslationBundleClass => "TranslationBundle.java".into(),
            Self::LocaleBundleClass(locale) => format!("TranslationBundle_{locale}.java"),
        }
    }

    /// The bundle locale whose document is the transform input, or `None`
    /// when the root definition is.
    pub fn source_locale(&self) -> Option<&Locale> {
        match self {
            Self::LocaleBundleClass(locale) => Some(locale),
            _ => None,
        }
    }
}

/// String parameters bound by name for one template invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateParams(BTreeMap<String, String>);

impl TemplateParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One planned output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    kind: ArtifactKind,
    template: String,
    output_file: String,
    params: TemplateParams,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, target: Option<&Target>, params: TemplateParams) -> Self {
        let template = template_path(target, kind.template_name());
        let output_file = kind.output_file();
        Self {
            kind,
            template,
            output_file,
            params,
        }
    }

    pub fn kind(&self) -> &ArtifactKind {
        &self.kind
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    pub fn params(&self) -> &TemplateParams {
        &self.params
    }
}
