//! Transformer - applies one template and writes one artifact.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{ContentResolver, Filesystem, TemplateEngine},
    },
    domain::{TemplateParams, XmlDocument},
    error::LogdocResult,
};

pub struct Transformer {
    filesystem: Arc<dyn Filesystem>,
    engine: Arc<dyn TemplateEngine>,
}

impl Transformer {
    pub fn new(filesystem: Arc<dyn Filesystem>, engine: Arc<dyn TemplateEngine>) -> Self {
        Self { filesystem, engine }
    }

    /// Render `template` against `source` and write the result to
    /// `output_dir/output_file`, replacing any existing file.
    ///
    /// The output is rendered completely before anything touches the
    /// filesystem; a template failure leaves the destination as it was.
    #[instrument(
        skip(self, source, params, resolver),
        fields(template = %template, output = %output_dir.join(output_file).display())
    )]
    pub fn apply_template(
        &self,
        source: &XmlDocument,
        template: &str,
        output_dir: &Path,
        output_file: &str,
        params: &TemplateParams,
        resolver: Arc<dyn ContentResolver>,
    ) -> LogdocResult<PathBuf> {
        debug!(
            source = source.name(),
            params = ?params.iter().collect::<Vec<_>>(),
            "Applying template"
        );

        let content = self.engine.render(template, source, params, resolver)?;

        self.ensure_output_dir(output_dir)?;
        let path = output_dir.join(output_file);
        self.filesystem.write_file(&path, &content)?;

        debug!(bytes = content.len(), "Artifact written");
        Ok(path)
    }

    /// Create `dir` and its ancestors when absent. Idempotent.
    fn ensure_output_dir(&self, dir: &Path) -> LogdocResult<()> {
        if self.filesystem.exists(dir) {
            if !self.filesystem.is_dir(dir) {
                return Err(ApplicationError::OutputPathConflict {
                    path: dir.to_path_buf(),
                }
                .into());
            }
            return Ok(());
        }
        self.filesystem.create_dir_all(dir)
    }
}
