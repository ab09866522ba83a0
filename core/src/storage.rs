pub mod errors;

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use errors::StorageError;

/// Name of the storage directory, both locally and under the home directory
pub const DIRNAME: &str = ".kalendar";

/// Result of storage operation.
pub type StoreResult<T> = Result<T, StorageError>;

/// A local, synchronous key-value store holding string values.
pub trait Storage {
    /// Returns the value stored under `key`, or `None` when absent
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the value stored under `key`
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// In-memory storage, lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed storage. Every key lives in its own `<dir>/<key>.json` file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn item_path(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        let mut path = self.root.clone();
        path.push(format!("{key}.json"));
        Ok(path)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let mut string = String::new();
        File::open(&path)?.read_to_string(&mut string)?;
        Ok(Some(string))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.root.exists() && !self.root.is_dir() {
            return Err(StorageError::NotADirectory(self.root.clone()));
        }
        fs::create_dir_all(&self.root)?;
        let path = self.item_path(key)?;
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        file.write_all(value.as_bytes())?;
        file.flush()?;
        debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// Storage rooted at `<path>/.kalendar`
pub fn open_local(mut path: PathBuf) -> FileStorage {
    path.push(DIRNAME);
    FileStorage::new(path)
}

/// Storage at `<path>/.kalendar` if that directory already exists
pub fn try_open_local(mut path: PathBuf) -> Option<FileStorage> {
    path.push(DIRNAME);
    if path.exists() && path.is_dir() {
        Some(FileStorage::new(path))
    } else {
        None
    }
}

/// Storage rooted at `~/.kalendar`
pub fn open_global() -> StoreResult<FileStorage> {
    let mut path = home::home_dir().ok_or(StorageError::NoHome)?;
    path.push(DIRNAME);
    Ok(FileStorage::new(path))
}

/// Picks the storage location the way both front-ends do.
///
/// - `global` overrides everything
/// - otherwise `local` is used when given
/// - otherwise the working directory's `.kalendar` if present, else the global one
pub fn resolve(local: Option<PathBuf>, global: bool) -> StoreResult<FileStorage> {
    match (local, global) {
        (_, true) => open_global(),
        (Some(path), false) => Ok(open_local(path)),
        (None, false) => match try_open_local(std::env::current_dir()?) {
            Some(storage) => Ok(storage),
            None => open_global(),
        },
    }
}
