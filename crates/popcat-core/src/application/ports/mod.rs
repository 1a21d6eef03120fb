//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `popcat-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: asset file operations
//!   - `TemplateRepository`: catalog rows
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`TemplateCatalog`'s public methods, invoked from the CLI layer)

pub mod output;

pub use output::{Filesystem, TemplateRepository};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateRepository};
