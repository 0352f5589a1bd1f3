use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{anyhow, bail};
use bytes::Bytes;
use parking_lot::Mutex;

use crate::{FileInfo, FileSystem, filter_matches, standardize_path, split_with_wildcard};

struct MemoryFile {
    bytes: Bytes,
    modified: SystemTime,
}

#[derive(Default)]
struct MemoryTree {
    files: BTreeMap<String, MemoryFile>,
    directories: BTreeSet<String>,
}

impl MemoryTree {
    fn is_dir(&self, key: &str) -> bool {
        if key.is_empty() || self.directories.contains(key) {
            return true;
        }

        let prefix = format!("{}/", key);
        self.files.keys().any(|k| k.starts_with(&prefix))
    }
}

/// A file tree living in memory. Directories are implied by the files below them.
#[derive(Default)]
pub struct MemoryFileSystem {
    tree: Mutex<MemoryTree>,
}

#[inline]
fn key_of(path: &Path) -> String {
    let key = standardize_path(&path.to_string_lossy(), false);
    let key = key.strip_prefix("./").unwrap_or(&key);
    key.trim_end_matches('/').to_owned()
}

#[inline]
fn parent_of(key: &str) -> &str {
    key.rfind('/').map_or("", |i| &key[..i])
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a file, creating its parents.
    pub fn insert(&self, path: impl AsRef<Path>, bytes: impl Into<Bytes>) {
        let key = key_of(path.as_ref());
        self.tree.lock().files.insert(key, MemoryFile { bytes: bytes.into(), modified: SystemTime::now() });
    }

    /// Paths of every stored file, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.tree.lock().files.keys().map(PathBuf::from).collect()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_bytes(&self, path: &Path) -> anyhow::Result<Bytes> {
        self.tree.lock().files.get(&key_of(path))
            .map(|f| f.bytes.clone())
            .ok_or_else(|| anyhow!("Failed to read file {:?}: not found", path))
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
        let key = key_of(path);
        let mut tree = self.tree.lock();

        if tree.is_dir(&key) {
            bail!("Failed to write out file: {:?} is a directory", path);
        }
        if !tree.is_dir(parent_of(&key)) {
            bail!("Failed to write out file: {:?}, parent directory does not exist", path);
        }

        tree.files.insert(key, MemoryFile { bytes: Bytes::copy_from_slice(bytes), modified: SystemTime::now() });
        Ok(())
    }

    fn create_directory(&self, path: &Path) -> anyhow::Result<()> {
        let key = key_of(path);
        let mut tree = self.tree.lock();

        if tree.files.contains_key(&key) {
            bail!("{} is a file, not a directory!", path.display());
        }

        let mut current = key.as_str();
        while !current.is_empty() {
            tree.directories.insert(current.to_owned());
            current = parent_of(current);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let key = key_of(path);
        let tree = self.tree.lock();
        tree.files.contains_key(&key) || tree.is_dir(&key)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.tree.lock().is_dir(&key_of(path))
    }

    fn find_files(&self, pattern: &str) -> anyhow::Result<Vec<FileInfo>> {
        let (dir, file_pattern) = split_with_wildcard(pattern);
        // same form as the stored keys
        let dir = standardize_path(&dir, true);
        let dir = dir.strip_prefix("./").unwrap_or(&dir).to_owned();
        let tree = self.tree.lock();

        if !tree.is_dir(dir.trim_end_matches('/')) {
            bail!("Search directory {} does not exist!", dir);
        }

        let files = tree.files.iter()
            .filter(|(key, _)| key.starts_with(&dir))
            .map(|(key, file)| FileInfo {
                path: PathBuf::from(key),
                size: file.bytes.len() as u64,
                modified: Some(file.modified),
            })
            .collect();

        Ok(filter_matches(files, &dir, &file_pattern))
    }
}
