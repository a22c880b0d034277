//! In-memory port fakes shared by the service unit tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::ApplicationError;
use crate::application::ports::{Filesystem, MarkupParser, TemplateStore};
use crate::domain::{
    AttributeRule, AttributeType, ChildRule, ElementRule, LOG_SCHEMA, RelativeRef, Schema,
    SchemaSet, TRANSLATION_BUNDLE_SCHEMA, XmlDocument, XmlElement,
};
use crate::error::LogdocResult;

#[derive(Default)]
struct FsState {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    read_only: BTreeSet<PathBuf>,
}

#[derive(Clone, Default)]
pub struct FakeFilesystem {
    state: Arc<Mutex<FsState>>,
}

impl FakeFilesystem {
    pub fn new() -> Self {
        Self::default().with_dir("/")
    }

    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for ancestor in path.as_ref().ancestors() {
                if !ancestor.as_os_str().is_empty() {
                    state.dirs.insert(ancestor.to_path_buf());
                }
            }
        }
        self
    }

    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        let this = match path.parent() {
            Some(parent) => self.with_dir(parent),
            None => self,
        };
        this.state
            .lock()
            .unwrap()
            .files
            .insert(path.to_path_buf(), content.to_string());
        this
    }

    pub fn read_only(self, path: impl AsRef<Path>) -> Self {
        self.state
            .lock()
            .unwrap()
            .read_only
            .insert(path.as_ref().to_path_buf());
        self
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) {
        self.state.lock().unwrap().files.remove(path.as_ref());
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.state.lock().unwrap().dirs.contains(path.as_ref())
    }

    pub fn file_count(&self) -> usize {
        self.state.lock().unwrap().files.len()
    }
}

impl Filesystem for FakeFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.dirs.contains(path) || state.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }

    fn is_readable(&self, path: &Path) -> bool {
        self.is_dir(path)
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.is_dir(path) && !self.state.lock().unwrap().read_only.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> LogdocResult<()> {
        let mut state = self.state.lock().unwrap();
        for ancestor in path.ancestors() {
            if state.files.contains_key(ancestor) {
                return Err(ApplicationError::io(
                    path,
                    "create directory",
                    std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file in the way"),
                )
                .into());
            }
        }
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                state.dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> LogdocResult<String> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::NotFound {
                    path: path.to_path_buf(),
                }
                .into()
            })
    }

    fn write_file(&self, path: &Path, content: &str) -> LogdocResult<()> {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

/// Returns canned trees by document name; text starting with `!` is
/// treated as malformed.
#[derive(Clone, Default)]
pub struct FakeParser {
    documents: HashMap<String, XmlElement>,
}

impl FakeParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, name: &str, root: XmlElement) -> Self {
        self.documents.insert(name.to_string(), root);
        self
    }
}

impl MarkupParser for FakeParser {
    fn parse(&self, name: &str, text: &str) -> LogdocResult<XmlDocument> {
        if text.starts_with('!') {
            return Err(ApplicationError::Parse {
                document: name.to_string(),
                reason: "malformed".into(),
            }
            .into());
        }
        let root = self.documents.get(name).cloned().ok_or_else(|| ApplicationError::Parse {
            document: name.to_string(),
            reason: "no fixture".into(),
        })?;
        Ok(XmlDocument::new(name, root))
    }
}

#[derive(Clone, Default)]
pub struct FakeTemplates {
    sources: BTreeMap<String, String>,
}

impl FakeTemplates {
    pub fn with(mut self, path: &str, source: &str) -> Self {
        self.sources.insert(path.to_string(), source.to_string());
        self
    }
}

impl TemplateStore for FakeTemplates {
    fn load(&self, path: &RelativeRef) -> LogdocResult<Option<String>> {
        Ok(self.sources.get(path.as_str()).cloned())
    }

    fn list(&self) -> LogdocResult<Vec<String>> {
        Ok(self.sources.keys().cloned().collect())
    }
}

/// A `log.xml` root for tests: domain, optional public flag, locales and
/// one group with two entries.
pub fn log_root(domain: &str, public: Option<&str>, locales: &[&str]) -> XmlElement {
    let mut root = XmlElement::new("log").with_attribute("domain", domain);
    if let Some(public) = public {
        root.set_attribute("public", public);
    }
    for locale in locales {
        root.push_child(XmlElement::new("translation-bundle").with_attribute("locale", *locale));
    }
    root.push_child(
        XmlElement::new("group")
            .with_attribute("id", "lifespan")
            .with_attribute("name", "Lifespan")
            .with_child(XmlElement::new("entry").with_attribute("id", "1000"))
            .with_child(XmlElement::new("entry").with_attribute("id", "1001")),
    );
    root
}

/// Filesystem and parser fixtures for a definition directory holding
/// `log.xml` and one bundle per locale.
pub fn definition(
    dir: &str,
    root: XmlElement,
    locales: &[&str],
) -> (FakeFilesystem, FakeParser) {
    let mut fs = FakeFilesystem::new().with_file(format!("{dir}/log.xml"), "<log/>");
    let mut parser = FakeParser::new().with_document("log.xml", root);
    for locale in locales {
        let name = format!("translation-bundle-{locale}.xml");
        fs = fs.with_file(format!("{dir}/{name}"), "<translation-bundle/>");
        parser = parser.with_document(
            &name,
            XmlElement::new("translation-bundle").with_child(
                XmlElement::new("translation")
                    .with_attribute("entry", "1000")
                    .with_text("Started"),
            ),
        );
    }
    (fs, parser)
}

fn attr(name: &str, kind: AttributeType, required: bool) -> AttributeRule {
    AttributeRule {
        name: name.into(),
        kind,
        required,
        values: None,
    }
}

fn child(name: &str, min: u32) -> ChildRule {
    ChildRule {
        name: name.into(),
        min,
        max: None,
    }
}

fn element(name: &str, attributes: Vec<AttributeRule>, children: Vec<ChildRule>) -> ElementRule {
    ElementRule {
        name: name.into(),
        attributes,
        children,
        text: false,
    }
}

/// A cut-down pair of schemas matching the fixtures above.
pub fn schemas() -> SchemaSet {
    let log = Schema {
        name: LOG_SCHEMA.into(),
        root: "log".into(),
        elements: vec![
            element(
                "log",
                vec![
                    attr("domain", AttributeType::Namespace, true),
                    attr("public", AttributeType::Boolean, false),
                ],
                vec![child("translation-bundle", 0), child("group", 0)],
            ),
            element(
                "translation-bundle",
                vec![attr("locale", AttributeType::Locale, true)],
                vec![],
            ),
            element(
                "group",
                vec![
                    attr("id", AttributeType::Identifier, true),
                    attr("name", AttributeType::String, true),
                ],
                vec![child("entry", 1)],
            ),
            element(
                "entry",
                vec![
                    attr("id", AttributeType::Identifier, true),
                    attr("level", AttributeType::String, false),
                ],
                vec![],
            ),
        ],
    };
    let bundle = Schema {
        name: TRANSLATION_BUNDLE_SCHEMA.into(),
        root: "translation-bundle".into(),
        elements: vec![
            element("translation-bundle", vec![], vec![child("translation", 0)]),
            ElementRule {
                text: true,
                ..element(
                    "translation",
                    vec![attr("entry", AttributeType::Identifier, true)],
                    vec![],
                )
            },
        ],
    };
    SchemaSet::new(log, bundle)
}
