//! Binary object storage.
//!
//! Keys are `/`-separated relative paths such as `users/u1/cat.20.jpg`.
//! Listing is a plain string-prefix match over keys, so `a/b` also matches
//! `a/bc.jpg`.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use huevar_io::Format;

use crate::error::{Result, ServerError};

/// Bytes of one stored object with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object bytes.
    pub data: Vec<u8>,
    /// MIME type recorded on upload, or guessed from the key.
    pub content_type: String,
}

/// Key/value store for binary objects.
pub trait ObjectStore: Send + Sync {
    /// Stores `data` under `key`, replacing any previous object.
    fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<()>;

    /// Fetches an object. [`ServerError::NotFound`] if absent.
    fn get(&self, key: &str) -> Result<StoredObject>;

    /// Keys starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Removes an object. [`ServerError::NotFound`] if absent.
    fn delete(&self, key: &str) -> Result<()>;
}

/// Rejects keys that are empty, absolute, or contain `.`, `..` or empty
/// components.
pub fn validate_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key.contains('\\')
        || key.contains('\0')
        || key
            .split('/')
            .any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(ServerError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Filesystem-backed [`ObjectStore`] rooted at a directory.
///
/// Content types given on upload are remembered for the lifetime of the
/// process; afterwards they are guessed from the key's extension.
#[derive(Debug)]
pub struct FsObjectStore {
    root: PathBuf,
    content_types: RwLock<HashMap<String, String>>,
}

impl FsObjectStore {
    /// Opens (and creates if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), "opened object store");
        Ok(Self {
            root,
            content_types: RwLock::new(HashMap::new()),
        })
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    fn collect_keys(&self, dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                self.collect_keys(&path, prefix, out)?;
                continue;
            }
            let Ok(rel) = path.strip_prefix(&self.root) else {
                continue;
            };
            let key = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if key.starts_with(prefix) {
                out.push(key);
            }
        }
        Ok(())
    }

    /// Removes now-empty directories between `path` and the root.
    fn prune_empty_parents(&self, path: &Path) {
        let mut dir = path.parent();
        while let Some(d) = dir {
            if d == self.root || fs::remove_dir(d).is_err() {
                break;
            }
            dir = d.parent();
        }
    }
}

impl ObjectStore for FsObjectStore {
    fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, data)?;
        self.content_types
            .write()
            .map_err(|_| ServerError::internal("content type map lock poisoned"))?
            .insert(key.to_string(), content_type.to_string());
        tracing::trace!(key, bytes = data.len(), content_type, "stored object");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<StoredObject> {
        let path = self.path_for(key)?;
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ServerError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let content_type = self
            .content_types
            .read()
            .map_err(|_| ServerError::internal("content type map lock poisoned"))?
            .get(key)
            .cloned()
            .unwrap_or_else(|| Format::from_extension(key).content_type().to_string());
        Ok(StoredObject { data, content_type })
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        self.collect_keys(&self.root, prefix, &mut keys)?;
        keys.sort();
        Ok(keys)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ServerError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        self.content_types
            .write()
            .map_err(|_| ServerError::internal("content type map lock poisoned"))?
            .remove(key);
        self.prune_empty_parents(&path);
        tracing::trace!(key, "deleted object");
        Ok(())
    }
}
