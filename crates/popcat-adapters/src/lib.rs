//! Infrastructure adapters for popcat.
//!
//! This crate implements the ports defined in `popcat-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_store::{InMemoryTemplateStore, JsonFileTemplateStore};
