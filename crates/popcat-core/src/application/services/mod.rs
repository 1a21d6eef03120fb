//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "publish a batch of common templates" or
//! "delete a template and its assets".

pub mod asset_store;
pub mod authorization;
pub mod catalog_service;

pub use asset_store::{AssetStore, sanitize_file_name, unique_file_name};
pub use authorization::AuthorizationGuard;
pub use catalog_service::{
    BatchItemOutcome, BatchOutcome, CatalogSettings, CreateCommonBatchRequest,
    DEFAULT_MAX_UPLOAD_MEGABYTES, DeleteOutcome, ListTemplatesRequest, SavePrivateOutcome,
    SavePrivateRequest, TemplateCatalog,
};
