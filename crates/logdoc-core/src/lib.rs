//! Logdoc Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Logdoc, a
//! definition-driven code generator: a `log.xml` definition plus one
//! translation bundle per locale go in, log and translation-bundle classes
//! come out.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           logdoc-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (Generator, DefinitionLoader, Resolver) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, MarkupParser, Templates)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     logdoc-adapters (Infrastructure)    │
//! │ (LocalFilesystem, XmlParser, MiniJinja) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │     (LogDef, Schema, Artifact plan)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logdoc_core::prelude::*;
//!
//! // Schemas are loaded once, at start-up.
//! let schemas = Arc::new(schema_set);
//!
//! let generator = Generator::new(filesystem, parser, templates, engine, schemas);
//! let report = generator.generate(
//!     "src/main/logdoc".as_ref(),
//!     Some("target/generated-sources".as_ref()),
//!     &GenerateOptions::default(),
//! )?;
//! println!("{} files", report.files.len());
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ContentResolver, DefinitionLoader, Filesystem, GenerateOptions, GenerationReport,
        Generator, LoadOptions, MarkupParser, Resolver, TemplateEngine, TemplateStore,
    };
    pub use crate::domain::{
        AccessLevel, DomainName, LogDef, Locale, Schema, SchemaSet, Target, TemplateParams,
        XmlDocument, XmlElement,
    };
    pub use crate::error::{LogdocError, LogdocResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
