pub mod artifact;
pub mod common;
pub mod document;
pub mod log_def;
pub mod schema;

pub use crate::domain::DomainError;
pub use artifact::{Artifact, ArtifactKind, TemplateParams};
pub use document::{XmlDocument, XmlElement, XmlNode};
pub use log_def::{Entry, Group, LogDef};
pub use schema::{Schema, SchemaSet};
