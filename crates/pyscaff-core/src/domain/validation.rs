use crate::domain::{
    entities::{ProjectStructure, Template},
    error::DomainError,
};

/// Centralized validation of the scaffolding model.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
