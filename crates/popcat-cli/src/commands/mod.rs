//! Command handlers, one module per subcommand.
//!
//! Handlers share the wiring below: the catalog is assembled from
//! [`AppConfig`] on every invocation, and upload files are read into
//! [`UploadedFile`]s before they reach the core.

use std::path::Path;
use std::sync::Arc;

use popcat_adapters::{JsonFileTemplateStore, LocalFilesystem};
use popcat_core::prelude::*;
use tracing::debug;

use crate::{
    cli::{CategoryArgs, GlobalArgs, LayoutArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

pub mod categories;
pub mod completions;
pub mod config;
pub mod delete;
pub mod init;
pub mod list;
pub mod publish;
pub mod save;

/// Assemble a [`TemplateCatalog`] backed by the configured storage.
pub(crate) fn build_catalog(config: &AppConfig) -> CliResult<TemplateCatalog> {
    let repository = JsonFileTemplateStore::open(config.storage.catalog_file.clone())
        .with_cli_context(|| "Opening the catalog file")?;
    let assets = AssetStore::new(
        Arc::new(LocalFilesystem::new()),
        config.storage.upload_dir.clone(),
        &config.storage.url_prefix,
    );
    let guard = AuthorizationGuard::new(Arc::new(config.admin_set()));

    debug!(
        catalog = %config.storage.catalog_file.display(),
        uploads = %config.storage.upload_dir.display(),
        "Catalog wired"
    );

    Ok(TemplateCatalog::new(
        Arc::new(repository),
        assets,
        guard,
        config.catalog_settings(),
    ))
}

/// The acting store, if one was given. Blank ids count as absent.
pub(crate) fn actor(global: &GlobalArgs) -> Option<Actor> {
    global
        .actor
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(Actor::new)
}

/// Read a file from disk as an upload, guessing its content type from the
/// extension.
pub(crate) fn read_upload(path: &Path) -> CliResult<UploadedFile> {
    let bytes = std::fs::read(path).map_err(|source| CliError::UnreadableInput {
        path: path.to_path_buf(),
        source,
    })?;
    let content_type = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string());
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    debug!(path = %path.display(), size = bytes.len(), ?content_type, "Read upload");
    Ok(UploadedFile::new(name, content_type, bytes))
}

/// Inline layout JSON, or the contents of `--layout-file`.
pub(crate) fn read_layout(layout: &LayoutArgs) -> CliResult<Option<String>> {
    match (&layout.layout_json, &layout.layout_file) {
        (Some(json), _) => Ok(Some(json.clone())),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(Some)
            .with_cli_context(|| format!("Failed to read layout file '{}'", path.display())),
        (None, None) => Ok(None),
    }
}

impl From<&CategoryArgs> for CategoryPath {
    fn from(args: &CategoryArgs) -> Self {
        CategoryPath::new(
            args.big.clone(),
            args.mid.clone(),
            args.small.clone(),
            args.sub.clone(),
        )
    }
}

impl From<&CategoryArgs> for CategoryFilter {
    fn from(args: &CategoryArgs) -> Self {
        CategoryFilter::any()
            .big(args.big.clone())
            .mid(args.mid.clone())
            .small(args.small.clone())
            .sub(args.sub.clone())
    }
}
