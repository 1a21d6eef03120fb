//! Error handling for the popcat CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use popcat_core::error::CatalogError;

// Re-export so callers only need `use crate::error::*`.
pub use popcat_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that the core never saw.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A file named on the command line could not be read.
    #[error("Cannot read {path}")]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every item of a publish batch failed.
    #[error("No templates were created ({failed} of {total} files failed)")]
    BatchFailed { failed: usize, total: usize },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `popcat-core`.
    #[error("{0}")]
    Core(#[from] CatalogError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::UnreadableInput { path, .. } => vec![
                format!("Check that '{}' exists and is readable", path.display()),
                "Paths are resolved relative to the current directory".into(),
            ],

            Self::BatchFailed { .. } => vec![
                "Only image files (image/*) are accepted".into(),
                "Check the per-file errors listed above".into(),
                "Large files may exceed uploads.max_megabytes".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check your config file (popcat config path)".into(),
                "Use 'popcat init' to create a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::UnreadableInput { .. } => ErrorCategory::UserError,
            Self::BatchFailed { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Unauthenticated => ErrorCategory::Unauthenticated,
                CoreCategory::Forbidden => ErrorCategory::Forbidden,
                CoreCategory::InvalidRequest => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Storage | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Catalog taxonomy code, when the error came from the core.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Core(core) => Some(core.code()),
            _ => None,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category        | Code |
    /// |-----------------|------|
    /// | Internal        |  1   |
    /// | User error      |  2   |
    /// | Not found       |  3   |
    /// | Configuration   |  4   |
    /// | Unauthenticated |  5   |
    /// | Forbidden       |  6   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Unauthenticated => 5,
            ErrorCategory::Forbidden => 6,
        }
    }

    fn headline(&self) -> String {
        match self.code() {
            Some(code) => format!("Error [{code}]:"),
            None => "Error:".to_string(),
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        // Error header
        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            self.headline().red().bold()
        ));

        // Main error message
        output.push_str(&format!("  {}\n", self.to_string().red()));

        // Error chain (if verbose)
        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        // Suggestions
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        // Hint to re-run with -v
        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\n{} {}\n", self.headline(), self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::Unauthenticated | ErrorCategory::Forbidden => {
                tracing::warn!("Access denied: {}", self)
            }
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// No actor was supplied.
    Unauthenticated,
    /// The actor may not perform the operation.
    Forbidden,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
///
/// Two concrete impls are provided:
/// - `Result<T, std::io::Error>` → `CliError::IoError`
/// - `Result<T, CatalogError>`   → `CliError::Core`
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, CatalogError> {
    /// Core errors already carry their own context; the message only goes
    /// to the debug log.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| {
            tracing::debug!(context = %f().into(), code = e.code(), "Catalog call failed");
            CliError::Core(e)
        })
    }
}
