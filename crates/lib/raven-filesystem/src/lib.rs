//! File access for the tools, behind a trait so that drivers can run against memory in tests.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use bytes::Bytes;

mod wildcard;
mod native;
mod memory;

pub use wildcard::{standardize_path, split_with_wildcard, wildcard_match};
pub use native::NativeFileSystem;
pub use memory::MemoryFileSystem;

/// A file found by [`FileSystem::find_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Path with `/` separators, prefixed by the directory part of the search pattern.
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

pub trait FileSystem: Send + Sync {
    fn read_bytes(&self, path: &Path) -> anyhow::Result<Bytes>;

    /// Create or truncate `path`. The parent directory must exist.
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> anyhow::Result<()>;

    /// Create `path` and all its missing parents. Existing directories are fine.
    fn create_directory(&self, path: &Path) -> anyhow::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Recursively collect files matching `pattern`, sorted by path.
    ///
    /// The directory part of the pattern ends at the last `/` before the first `*`.
    /// Everything under it is walked, and a file is kept when its whole path
    /// matches the pattern, `*` matching across `/` as well.
    fn find_files(&self, pattern: &str) -> anyhow::Result<Vec<FileInfo>>;
}

/// Keep the files matching `dir/file_pattern`, then sort them.
pub(crate) fn filter_matches(mut files: Vec<FileInfo>, dir: &str, file_pattern: &str) -> Vec<FileInfo> {
    if file_pattern != "*" {
        let filter = format!("{}{}", dir, file_pattern);
        files.retain(|f| wildcard_match(&standardize_path(&f.path.to_string_lossy(), false), &filter));
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}
