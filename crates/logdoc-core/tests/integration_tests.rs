//! Integration tests for logdoc-core, driven through the public API with
//! in-memory ports.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use logdoc_core::application::ApplicationError;
use logdoc_core::domain::{
    AttributeRule, AttributeType, ChildRule, ElementRule, RelativeRef, TRANSLATION_BUNDLE_SCHEMA,
};
use logdoc_core::prelude::*;

// ============================================================================
// Ports
// ============================================================================

#[derive(Clone, Default)]
struct MemFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl MemFs {
    fn with_dir(self, path: &str) -> Self {
        let mut dirs = self.dirs.lock().unwrap();
        for a in Path::new(path).ancestors() {
            dirs.insert(a.to_path_buf());
        }
        drop(dirs);
        self
    }

    fn with_file(self, path: &str, content: &str) -> Self {
        let this = self.with_dir(Path::new(path).parent().unwrap().to_str().unwrap());
        this.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.into());
        this
    }

    fn snapshot(&self) -> BTreeMap<PathBuf, String> {
        self.files.lock().unwrap().clone()
    }
}

impl Filesystem for MemFs {
    fn exists(&self, path: &Path) -> bool {
        self.is_dir(path) || self.files.lock().unwrap().contains_key(path)
    }
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }
    fn is_readable(&self, path: &Path) -> bool {
        self.is_dir(path)
    }
    fn is_writable(&self, path: &Path) -> bool {
        self.is_dir(path)
    }
    fn create_dir_all(&self, path: &Path) -> LogdocResult<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for a in path.ancestors() {
            dirs.insert(a.to_path_buf());
        }
        Ok(())
    }
    fn read_to_string(&self, path: &Path) -> LogdocResult<String> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            ApplicationError::NotFound {
                path: path.to_path_buf(),
            }
            .into()
        })
    }
    fn write_file(&self, path: &Path, content: &str) -> LogdocResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.into());
        Ok(())
    }
}

/// Canned trees keyed by file text.
#[derive(Default)]
struct CannedParser(HashMap<String, XmlElement>);

impl MarkupParser for CannedParser {
    fn parse(&self, name: &str, text: &str) -> LogdocResult<XmlDocument> {
        self.0
            .get(text)
            .cloned()
            .map(|root| XmlDocument::new(name, root))
            .ok_or_else(|| {
                ApplicationError::Parse {
                    document: name.into(),
                    reason: "unexpected text".into(),
                }
                .into()
            })
    }
}

struct NoTemplates;

impl TemplateStore for NoTemplates {
    fn load(&self, _: &RelativeRef) -> LogdocResult<Option<String>> {
        Ok(None)
    }
    fn list(&self) -> LogdocResult<Vec<String>> {
        Ok(vec![])
    }
}

/// Writes the bound parameters, plus the root definition's domain fetched
/// back through the resolver for locale artifacts.
struct ParamsEngine;

impl TemplateEngine for ParamsEngine {
    fn render(
        &self,
        template: &str,
        source: &XmlDocument,
        params: &TemplateParams,
        resolver: Arc<dyn ContentResolver>,
    ) -> LogdocResult<String> {
        let mut out = format!("// {template} ({})\n", source.root().name());
        for (k, v) in params.iter() {
            out.push_str(&format!("{k}={v}\n"));
        }
        if let Some(log_file) = params.get("log_file") {
            let log = resolver.load_document(log_file)?;
            out.push_str(&format!(
                "domain={}\n",
                log.root().attribute("domain").unwrap_or_default()
            ));
        }
        Ok(out)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn schemas() -> SchemaSet {
    let attr = |name: &str, kind, required| AttributeRule {
        name: name.into(),
        kind,
        required,
        values: None,
    };
    let child = |name: &str| ChildRule {
        name: name.into(),
        min: 0,
        max: None,
    };
    let element = |name: &str, attributes, children| ElementRule {
        name: name.into(),
        attributes,
        children,
        text: false,
    };

    let log = Schema {
        name: "log".into(),
        root: "log".into(),
        elements: vec![
            element(
                "log",
                vec![
                    attr("domain", AttributeType::Namespace, true),
                    attr("public", AttributeType::Boolean, false),
                ],
                vec![child("translation-bundle"), child("group")],
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
                vec![child("entry")],
            ),
            element("entry", vec![attr("id", AttributeType::Identifier, true)], vec![]),
        ],
    };
    let bundle = Schema {
        name: TRANSLATION_BUNDLE_SCHEMA.into(),
        root: "translation-bundle".into(),
        elements: vec![element("translation-bundle", vec![], vec![])],
    };
    SchemaSet::new(log, bundle)
}

fn group(id: &str, entries: &[&str]) -> XmlElement {
    entries.iter().fold(
        XmlElement::new("group")
            .with_attribute("id", id)
            .with_attribute("name", id),
        |g, e| g.with_child(XmlElement::new("entry").with_attribute("id", *e)),
    )
}

/// `org.znerd`, locales en_US and fr_FR, two groups with three entries.
fn znerd(public: Option<&str>) -> (MemFs, CannedParser) {
    let mut log = XmlElement::new("log").with_attribute("domain", "org.znerd");
    if let Some(p) = public {
        log.set_attribute("public", p);
    }
    let log = log
        .with_child(XmlElement::new("translation-bundle").with_attribute("locale", "en_US"))
        .with_child(XmlElement::new("translation-bundle").with_attribute("locale", "fr_FR"))
        .with_child(group("lifespan", &["1000", "1001"]))
        .with_child(group("errors", &["2000"]));

    let mut parser = CannedParser::default();
    parser.0.insert("LOG".into(), log);
    parser
        .0
        .insert("BUNDLE".into(), XmlElement::new("translation-bundle"));

    let fs = MemFs::default()
        .with_dir("/work/out")
        .with_file("/work/defs/log.xml", "LOG")
        .with_file("/work/defs/translation-bundle-en_US.xml", "BUNDLE")
        .with_file("/work/defs/translation-bundle-fr_FR.xml", "BUNDLE");
    (fs, parser)
}

fn generator(fs: &MemFs, parser: CannedParser) -> Generator {
    Generator::new(
        Arc::new(fs.clone()),
        Arc::new(parser),
        Arc::new(NoTemplates),
        Arc::new(ParamsEngine),
        Arc::new(schemas()),
    )
}

fn run(fs: &MemFs, parser: CannedParser) -> LogdocResult<GenerationReport> {
    generator(fs, parser).generate(
        Path::new("/work/defs"),
        Some(Path::new("/work/out")),
        &GenerateOptions::default(),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn znerd_scenario_produces_four_files() {
    let (fs, parser) = znerd(None);
    let report = run(&fs, parser).unwrap();

    assert_eq!(report.files.len(), 4);
    assert_eq!(report.groups, 2);
    assert_eq!(report.entries, 3);
    for file in &report.files {
        assert_eq!(file.parent(), Some(Path::new("/work/out/org/znerd")));
    }

    let files = fs.snapshot();
    let en = &files[Path::new("/work/out/org/znerd/TranslationBundle_en_US.java")];
    assert!(en.contains("(translation-bundle)"));
    assert!(en.contains("locale=en_US"));
    assert!(en.contains("domain=org.znerd"));
}

#[test]
fn repeated_runs_are_identical() {
    let (fs, parser) = znerd(Some("true"));
    run(&fs, parser).unwrap();
    let first = fs.snapshot();

    let (_, parser) = znerd(Some("true"));
    run(&fs, parser).unwrap();
    assert_eq!(first, fs.snapshot());
}

#[test]
fn public_flag_controls_access_level() {
    for (public, expected) in [
        (Some("true"), "accesslevel=public"),
        (Some("false"), "accesslevel=protected"),
        (None, "accesslevel=protected"),
    ] {
        let (fs, parser) = znerd(public);
        let report = run(&fs, parser).unwrap();
        let files = fs.snapshot();
        for path in &report.files {
            assert!(files[path].contains(expected), "{public:?} {path:?}");
        }
    }
}

#[test]
fn missing_bundle_fails_before_any_output() {
    let (fs, parser) = znerd(None);
    fs.files
        .lock()
        .unwrap()
        .remove(Path::new("/work/defs/translation-bundle-fr_FR.xml"));
    let before = fs.snapshot();

    let err = run(&fs, parser).unwrap_err();
    assert!(matches!(
        err,
        LogdocError::Application(ApplicationError::NotFound { .. })
    ));
    assert_eq!(before, fs.snapshot());
    assert!(!fs.is_dir(Path::new("/work/out/org")));
}
