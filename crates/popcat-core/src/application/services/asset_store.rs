//! Asset Store - uploaded image persistence.
//!
//! Files are written under a root directory with a generated name
//! `<YYYYMMDD>_<token>_<sanitized original name>` and addressed by
//! `<url_prefix>/<generated name>`.
//!
//! Uniqueness is probabilistic (date plus an 8-character random token).
//! A collision silently overwrites the earlier file; at catalog write
//! volumes this is an accepted risk.
//!
//! Deletion is best-effort: [`AssetStore::delete`] never fails, it logs and
//! reports `false`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::ports::Filesystem,
    domain::{DomainError, UploadedFile},
    error::CatalogResult,
};

const TOKEN_LEN: usize = 8;
const TOKEN_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Collision-resistant file persistence for template assets.
#[derive(Clone)]
pub struct AssetStore {
    filesystem: Arc<dyn Filesystem>,
    root: PathBuf,
    url_prefix: String,
}

impl AssetStore {
    /// `url_prefix` is joined to generated names with a single `/`.
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        root: impl Into<PathBuf>,
        url_prefix: impl Into<String>,
    ) -> Self {
        let url_prefix = url_prefix.into();
        Self {
            filesystem,
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// True iff the declared content type starts with `image/`.
    pub fn is_image(file: &UploadedFile) -> bool {
        file.content_type()
            .is_some_and(|content_type| content_type.starts_with("image/"))
    }

    /// Fails when the file is larger than `max_megabytes` MiB.
    pub fn validate_size(file: &UploadedFile, max_megabytes: u64) -> Result<(), DomainError> {
        if file.size() > max_megabytes.saturating_mul(BYTES_PER_MEGABYTE) {
            return Err(DomainError::FileTooLarge {
                file_name: file.display_name().to_string(),
                max_megabytes,
                size_bytes: file.size(),
            });
        }
        Ok(())
    }

    /// Image-type and size checks in one call.
    pub fn validate_image(file: &UploadedFile, max_megabytes: u64) -> Result<(), DomainError> {
        if !Self::is_image(file) {
            return Err(DomainError::NotAnImage {
                file_name: file.display_name().to_string(),
                content_type: file.content_type().unwrap_or("unknown").to_string(),
            });
        }
        Self::validate_size(file, max_megabytes)
    }

    /// Write the file under the root directory and return its URL.
    #[instrument(skip_all, fields(file = %file.display_name(), size = file.size()))]
    pub fn store(&self, file: &UploadedFile) -> CatalogResult<String> {
        if file.is_empty() {
            return Err(DomainError::EmptyFile {
                file_name: file.display_name().to_string(),
            }
            .into());
        }

        let original_name = file
            .original_name()
            .filter(|name| !name.is_empty())
            .ok_or(DomainError::InvalidFileName)?;

        let generated = unique_file_name(original_name, Local::now().date_naive());

        if !self.filesystem.exists(&self.root) {
            debug!(root = %self.root.display(), "Creating asset directory");
            self.filesystem
                .create_dir_all(&self.root)
                .inspect_err(|e| error!(error = %e, "Failed to create asset directory"))?;
        }

        let target = self.root.join(&generated);
        self.filesystem
            .write_file(&target, file.bytes())
            .inspect_err(|e| error!(error = %e, original = %original_name, "Failed to store asset"))?;

        info!(original = %original_name, path = %target.display(), "Asset stored");

        Ok(format!("{}/{}", self.url_prefix, generated))
    }

    /// Delete the asset a URL points at. Never fails.
    ///
    /// The file name is whatever follows the last `/` in `url`, resolved
    /// under the root directory.
    #[instrument(skip(self))]
    pub fn delete(&self, url: &str) -> bool {
        let Some(name) = file_name_from_url(url) else {
            warn!("Asset URL has no file name, nothing to delete");
            return false;
        };

        let path = self.root.join(name);
        if !self.filesystem.exists(&path) {
            warn!(path = %path.display(), "Asset to delete does not exist");
            return false;
        }

        match self.filesystem.remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "Asset deleted");
                true
            }
            Err(e) => {
                error!(error = %e, path = %path.display(), "Failed to delete asset");
                false
            }
        }
    }
}

/// Replace every character outside `[A-Za-z0-9가-힣._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric()
                || matches!(ch, '.' | '_' | '-')
                || ('\u{AC00}'..='\u{D7A3}').contains(&ch)
            {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// `<YYYYMMDD>_<token>_<sanitized original name>`.
pub fn unique_file_name(original_name: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}",
        date.format("%Y%m%d"),
        random_token(),
        sanitize_file_name(original_name)
    )
}

/// Eight base-62 characters drawn from the random bits of a v4 UUID.
fn random_token() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let base = TOKEN_ALPHABET.len() as u128;
    let mut token = String::with_capacity(TOKEN_LEN);
    for _ in 0..TOKEN_LEN {
        token.push(TOKEN_ALPHABET[(bits % base) as usize] as char);
        bits /= base;
    }
    token
}

fn file_name_from_url(url: &str) -> Option<&str> {
    let name = url.rsplit('/').next().unwrap_or(url);
    if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
        return None;
    }
    Some(name)
}
