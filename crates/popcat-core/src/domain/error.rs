// ============================================================================
// domain/error.rs - REQUEST VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// Every variant is a rejected request: the caller supplied something the
/// catalog cannot accept. All of them surface as `INVALID_REQUEST`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Required fields
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("At least one template image is required")]
    EmptyFileList,

    // ========================================================================
    // Uploaded files
    // ========================================================================
    #[error("File '{file_name}' is empty")]
    EmptyFile { file_name: String },

    #[error("Uploaded file has no usable name")]
    InvalidFileName,

    #[error("File '{file_name}' is not an image (content type: {content_type})")]
    NotAnImage {
        file_name: String,
        content_type: String,
    },

    #[error(
        "File '{file_name}' is too large (max: {max_megabytes}MB, actual: {:.2}MB)",
        as_megabytes(.size_bytes)
    )]
    FileTooLarge {
        file_name: String,
        max_megabytes: u64,
        size_bytes: u64,
    },

    // ========================================================================
    // Parsing
    // ========================================================================
    #[error("Invalid template scope '{0}' (expected common or private)")]
    InvalidScope(String),
}

fn as_megabytes(bytes: &u64) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("Provide a non-blank value for '{}'", field),
                "Whitespace-only values are treated as missing".into(),
            ],
            Self::EmptyFileList => vec![
                "Pass one or more image files to publish".into(),
                "Example: popcat publish --name \"Spring Sale\" --layout-type VERTICAL a.jpg b.jpg"
                    .into(),
            ],
            Self::NotAnImage { content_type, .. } => vec![
                format!("'{}' is not an image type", content_type),
                "Upload a JPEG, PNG, GIF or WebP file".into(),
            ],
            Self::FileTooLarge { max_megabytes, .. } => vec![
                format!("Files must be at most {}MB", max_megabytes),
                "Resize or recompress the image and try again".into(),
            ],
            Self::EmptyFile { .. } | Self::InvalidFileName => vec![
                "Check that the file exists and is readable".into(),
            ],
            Self::InvalidScope(_) => vec!["Use 'common' or 'private'".into()],
        }
    }

    /// All domain errors are rejected requests.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::InvalidRequest
    }
}
