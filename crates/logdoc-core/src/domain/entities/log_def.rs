use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    entities::{
        artifact::{Artifact, ArtifactKind, TemplateParams},
        document::{XmlDocument, XmlElement},
    },
    error::DomainError,
    value_objects::{AccessLevel, DomainName, Locale, Target},
};

/// Element names of the root definition.
pub mod tags {
    pub const TRANSLATION_BUNDLE: &str = "translation-bundle";
    pub const GROUP: &str = "group";
    pub const ENTRY: &str = "entry";
}

/// Log definition for one domain, read from `log.xml` and its companion
/// translation bundles.
///
/// Built once per run by the definition loader and never mutated. The
/// source document is kept so every artifact derived from it reuses the
/// same parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LogDef {
    domain_name: DomainName,
    access_level: AccessLevel,
    source: XmlDocument,
    translation_bundles: BTreeMap<Locale, XmlDocument>,
    groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: String,
    pub level: Option<String>,
}

impl LogDef {
    /// Locales declared by `<translation-bundle locale="…"/>` children of the
    /// root element, in document order.
    pub fn declared_locales(source: &XmlDocument) -> Result<Vec<Locale>, DomainError> {
        let mut locales: Vec<Locale> = Vec::new();

        for decl in source.root().elements_named(tags::TRANSLATION_BUNDLE) {
            let raw = decl
                .attribute("locale")
                .ok_or_else(|| DomainError::MissingAttribute {
                    element: tags::TRANSLATION_BUNDLE.into(),
                    attribute: "locale".into(),
                })?;
            let locale: Locale = raw.parse()?;

            if locales.contains(&locale) {
                return Err(DomainError::DuplicateLocale {
                    locale: locale.to_string(),
                    document: source.name().to_string(),
                });
            }
            locales.push(locale);
        }

        Ok(locales)
    }

    /// Domain and access level from the root element's `domain` and
    /// `public` attributes.
    pub fn identity(source: &XmlDocument) -> Result<(DomainName, AccessLevel), DomainError> {
        let root = source.root();
        let domain_name = DomainName::parse(root.attribute("domain").unwrap_or_default())?;
        let access_level = AccessLevel::from_public_attribute(root.attribute("public"));
        Ok((domain_name, access_level))
    }

    /// Assemble the model from an already loaded (and, in strict mode,
    /// validated) root document and its bundles.
    pub fn assemble(
        source: XmlDocument,
        translation_bundles: BTreeMap<Locale, XmlDocument>,
    ) -> Result<Self, DomainError> {
        let (domain_name, access_level) = Self::identity(&source)?;
        let groups = parse_groups(source.root());

        Ok(Self {
            domain_name,
            access_level,
            source,
            translation_bundles,
            groups,
        })
    }

    pub fn domain_name(&self) -> &DomainName {
        &self.domain_name
    }

    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    pub fn is_public(&self) -> bool {
        self.access_level.is_public()
    }

    pub fn source(&self) -> &XmlDocument {
        &self.source
    }

    pub fn translation_bundle(&self, locale: &Locale) -> Option<&XmlDocument> {
        self.translation_bundles.get(locale)
    }

    /// Locales with a loaded bundle, ordered by key.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.translation_bundles.keys()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// The fixed fan-out for one run: the log class, the generic translation
    /// bundle class, then one class per locale.
    pub fn plan_artifacts(&self, target: Option<&Target>) -> Vec<Artifact> {
        let base = TemplateParams::new()
            .with("package_name", self.domain_name.as_str())
            .with("accesslevel", self.access_level.as_str());

        let mut artifacts = vec![
            Artifact::new(ArtifactKind::LogClass, target, base.clone()),
            Artifact::new(ArtifactKind::TranslationBundleClass, None, base.clone()),
        ];

        for locale in self.locales() {
            let params = base
                .clone()
                .with("locale", locale.as_str())
                .with("log_file", "log.xml");
            artifacts.push(Artifact::new(
                ArtifactKind::LocaleBundleClass(locale.clone()),
                None,
                params,
            ));
        }

        artifacts
    }
}

fn parse_groups(root: &XmlElement) -> Vec<Group> {
    root.elements_named(tags::GROUP)
        .map(|g| Group {
            id: g.attribute("id").unwrap_or_default().to_string(),
            name: g.attribute("name").unwrap_or_default().to_string(),
            entries: g
                .elements_named(tags::ENTRY)
                .map(|e| Entry {
                    id: e.attribute("id").unwrap_or_default().to_string(),
                    level: e.attribute("level").map(str::to_string),
                })
                .collect(),
        })
        .collect()
}
