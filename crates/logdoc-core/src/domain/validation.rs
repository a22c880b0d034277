use crate::domain::{
    entities::{XmlDocument, schema::Schema},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    /// Check the document's root element name, independent of any schema.
    pub fn validate_root(document: &XmlDocument, expected: &str) -> Result<(), DomainError> {
        let found = document.root().name();
        if found == expected {
            Ok(())
        } else {
            Err(DomainError::UnexpectedRoot {
                document: document.name().to_string(),
                expected: expected.to_string(),
                found: found.to_string(),
            })
        }
    }

    pub fn validate_document(schema: &Schema, document: &XmlDocument) -> Result<(), DomainError> {
        schema.validate(document)
    }

    pub fn validate_schema(schema: &Schema) -> Result<(), String> {
        schema.check_consistency()
    }
}
