//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the pieces it needs
//! (`CatalogSettings`, the admin id set, storage paths).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `POPCAT__<SECTION>__<KEY>`, e.g.
//!    `POPCAT__STORAGE__UPLOAD_DIR`; `POPCAT__ADMIN__IDS` is comma separated
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use popcat_core::{
    application::{CatalogSettings, DEFAULT_MAX_UPLOAD_MEGABYTES},
    domain::{AdminSet, DEFAULT_ADMIN_ID},
};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "POPCAT";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where assets and the catalog live.
    pub storage: StorageConfig,
    /// Who counts as an administrator.
    pub admin: AdminConfig,
    /// Upload limits.
    pub uploads: UploadConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub url_prefix: String,
    pub catalog_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Actor ids with admin rights, compared case-insensitively.
    pub ids: Vec<String>,
    /// Owner code stamped on common templates.
    pub owner_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_megabytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `human` or `json`; used when `--output-format` is left on auto.
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = Self::data_dir();
        Self {
            storage: StorageConfig {
                upload_dir: data_dir.join("uploads"),
                url_prefix: "/uploads/templates".into(),
                catalog_file: data_dir.join("catalog.json"),
            },
            admin: AdminConfig {
                ids: vec![DEFAULT_ADMIN_ID.into()],
                owner_code: DEFAULT_ADMIN_ID.into(),
            },
            uploads: UploadConfig {
                max_megabytes: DEFAULT_MAX_UPLOAD_MEGABYTES,
            },
            output: OutputConfig {
                no_color: false,
                format: "human".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the file, then the environment.
    ///
    /// `config_file` is the path the user passed via `--config` (or `None`
    /// to use the default location).  With `required` set, a missing
    /// explicit file is an error; the default location is always optional.
    pub fn load(config_file: Option<&PathBuf>, required: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), required),
            None => (Self::config_path(), false),
        };

        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("admin.ids")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.popcat.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "popcat", "popcat")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".popcat.toml"))
    }

    /// Where the config file for this invocation lives.
    pub fn resolve_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    fn data_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "popcat", "popcat")
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| Path::new("popcat-data").to_path_buf())
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            admin_owner: self.admin.owner_code.clone(),
            max_upload_megabytes: self.uploads.max_megabytes,
        }
    }

    pub fn admin_set(&self) -> AdminSet {
        AdminSet::new(&self.admin.ids)
    }
}
