use crate::domain::{error::DomainError, template::TemplateDraft};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    /// Name and layout type are required for every template.
    pub fn validate_draft(draft: &TemplateDraft) -> Result<(), DomainError> {
        draft.validate()
    }

    /// Private saves additionally require the top category level.
    pub fn validate_private_draft(draft: &TemplateDraft) -> Result<(), DomainError> {
        draft.validate()?;
        if draft.category.big().is_none() {
            return Err(DomainError::MissingRequiredField {
                field: "category_big",
            });
        }
        Ok(())
    }
}
