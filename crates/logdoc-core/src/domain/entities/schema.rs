//! Declarative document schemas.
//!
//! A schema names the root element and lists one rule per element: which
//! attributes it declares (with a value type), which children may appear and
//! how often, and whether it may carry character data. Schemas are loaded
//! once at start-up (see `SchemaSet`) and are immutable afterwards.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::domain::entities::document::{XmlDocument, XmlElement};
use crate::domain::error::DomainError;

/// Name of the schema that validates `log.xml`.
pub const LOG_SCHEMA: &str = "log";
/// Name of the schema that validates `translation-bundle-<locale>.xml`.
pub const TRANSLATION_BUNDLE_SCHEMA: &str = "translation-bundle";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Schema {
    pub name: String,
    pub root: String,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementRule>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementRule {
    pub name: String,
    #[serde(default, rename = "attribute")]
    pub attributes: Vec<AttributeRule>,
    #[serde(default, rename = "child")]
    pub children: Vec<ChildRule>,
    /// Non-whitespace character data allowed.
    #[serde(default)]
    pub text: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttributeRule {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: AttributeType,
    #[serde(default)]
    pub required: bool,
    /// Closed set of accepted values, checked after the type.
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChildRule {
    pub name: String,
    #[serde(default)]
    pub min: u32,
    #[serde(default)]
    pub max: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    #[default]
    String,
    Boolean,
    Namespace,
    Locale,
    Identifier,
    /// Letters, digits and `_` only; safe to splice into generated names.
    Symbol,
    /// A `Symbol` that does not start with a digit.
    Variable,
    Integer,
}

impl AttributeType {
    fn check(self, value: &str) -> Result<(), &'static str> {
        let ident_start = |c: char| c.is_ascii_alphabetic() || c == '_';
        let ident_char = |c: char| c.is_ascii_alphanumeric() || c == '_';

        let ok = match self {
            Self::String => true,
            Self::Boolean => matches!(value, "true" | "false"),
            Self::Namespace => {
                !value.is_empty()
                    && value.split('.').all(|seg| {
                        seg.chars().next().is_some_and(ident_start) && seg.chars().all(ident_char)
                    })
            }
            Self::Locale => {
                let mut parts = value.split('_');
                let language = parts.next().unwrap_or_default();
                language.len() >= 2
                    && language.chars().all(|c| c.is_ascii_alphabetic())
                    && parts.all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric()))
            }
            Self::Identifier => {
                !value.is_empty()
                    && value
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
                    && !value.starts_with('.')
            }
            Self::Symbol => !value.is_empty() && value.chars().all(ident_char),
            Self::Variable => {
                value.chars().next().is_some_and(ident_start) && value.chars().all(ident_char)
            }
            Self::Integer => value.parse::<i64>().is_ok(),
        };

        if ok {
            Ok(())
        } else {
            Err(match self {
                Self::String => "invalid string",
                Self::Boolean => "expected 'true' or 'false'",
                Self::Namespace => "expected a dotted namespace like 'org.example'",
                Self::Locale => "expected a locale like 'en' or 'en_US'",
                Self::Identifier => "expected letters, digits, '_', '-' or '.'",
                Self::Symbol => "expected letters, digits or '_'",
                Self::Variable => "expected a name of letters, digits or '_' not starting with a digit",
                Self::Integer => "expected an integer",
            })
        }
    }
}

impl Schema {
    pub fn rule(&self, element: &str) -> Option<&ElementRule> {
        self.elements.iter().find(|r| r.name == element)
    }

    /// Internal consistency: the root has a rule, rule names are unique and
    /// every child named by a rule has its own rule.
    pub fn check_consistency(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for rule in &self.elements {
            if !seen.insert(rule.name.as_str()) {
                return Err(format!("duplicate rule for element <{}>", rule.name));
            }
        }

        if self.rule(&self.root).is_none() {
            return Err(format!("no rule for root element <{}>", self.root));
        }

        for rule in &self.elements {
            for child in &rule.children {
                if !seen.contains(child.name.as_str()) {
                    return Err(format!(
                        "<{}> allows child <{}> which has no rule",
                        rule.name, child.name
                    ));
                }
                if child.max.is_some_and(|max| max < child.min) {
                    return Err(format!(
                        "<{}>/<{}> has max < min",
                        rule.name, child.name
                    ));
                }
            }
        }

        Ok(())
    }

    /// Validate a document, collecting every violation.
    pub fn validate(&self, document: &XmlDocument) -> Result<(), DomainError> {
        let mut violations = Vec::new();
        let root = document.root();

        if root.name() != self.root {
            violations.push(format!(
                "/{}: root element must be <{}>",
                root.name(),
                self.root
            ));
        } else {
            self.validate_element(root, &format!("/{}", root.name()), &mut violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::SchemaViolation {
                schema: self.name.clone(),
                document: document.name().to_string(),
                violations,
            })
        }
    }

    fn validate_element(&self, element: &XmlElement, path: &str, out: &mut Vec<String>) {
        let Some(rule) = self.rule(element.name()) else {
            out.push(format!("{path}: element <{}> is not declared", element.name()));
            return;
        };

        for attr in &rule.attributes {
            match element.attribute(&attr.name) {
                None if attr.required => {
                    out.push(format!("{path}: missing required attribute '{}'", attr.name))
                }
                None => {}
                Some(value) => {
                    if let Err(reason) = attr.kind.check(value) {
                        out.push(format!("{path}/@{}: '{value}': {reason}", attr.name));
                    } else if let Some(allowed) = &attr.values {
                        if !allowed.iter().any(|a| a == value) {
                            out.push(format!(
                                "{path}/@{}: '{value}' is not one of [{}]",
                                attr.name,
                                allowed.join(", ")
                            ));
                        }
                    }
                }
            }
        }

        for name in element.attributes().keys() {
            if !rule.attributes.iter().any(|a| &a.name == name) {
                out.push(format!("{path}: undeclared attribute '{name}'"));
            }
        }

        if !rule.text && element.has_significant_text() {
            out.push(format!("{path}: character data is not allowed here"));
        }

        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for child in element.child_elements() {
            let child_path = format!("{path}/{}", child.name());
            if rule.children.iter().any(|c| c.name == child.name()) {
                *counts.entry(child.name()).or_default() += 1;
                self.validate_element(child, &child_path, out);
            } else {
                out.push(format!(
                    "{child_path}: <{}> is not allowed inside <{}>",
                    child.name(),
                    element.name()
                ));
            }
        }

        for child in &rule.children {
            let n = counts.get(child.name.as_str()).copied().unwrap_or(0);
            if n < child.min {
                out.push(format!(
                    "{path}: expected at least {} <{}>, found {n}",
                    child.min, child.name
                ));
            }
            if let Some(max) = child.max {
                if n > max {
                    out.push(format!(
                        "{path}: expected at most {max} <{}>, found {n}",
                        child.name
                    ));
                }
            }
        }
    }
}

/// The two schemas every run needs, loaded once at process start and then
/// passed by reference to the definition loader.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaSet {
    log: Schema,
    translation_bundle: Schema,
}

impl SchemaSet {
    pub fn new(log: Schema, translation_bundle: Schema) -> Self {
        Self {
            log,
            translation_bundle,
        }
    }

    pub fn log(&self) -> &Schema {
        &self.log
    }

    pub fn translation_bundle(&self) -> &Schema {
        &self.translation_bundle
    }
}
