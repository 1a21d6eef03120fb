//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{
        Arc, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

use popcat_core::{
    application::{ApplicationError, ports::Filesystem},
    error::CatalogResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep a handle after giving one to the
/// service under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
    read_only: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every mutating call fail, as a full or read-only disk would.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    pub fn file_count(&self) -> usize {
        self.inner.read().map(|inner| inner.files.len()).unwrap_or(0)
    }

    fn check_writable(&self, path: &Path) -> CatalogResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(ApplicationError::StorageFailed {
                path: path.to_path_buf(),
                reason: "Filesystem is read-only".into(),
            }
            .into());
        }
        Ok(())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> CatalogResult<()> {
        self.check_writable(path)?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> CatalogResult<()> {
        self.check_writable(path)?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::StorageFailed {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> CatalogResult<()> {
        self.check_writable(path)?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.files.remove(path).map(|_| ()).ok_or_else(|| {
            ApplicationError::StorageFailed {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }
}
