use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use bytes::Bytes;
use walkdir::{DirEntry, WalkDir};

use crate::{FileInfo, FileSystem, filter_matches, standardize_path, split_with_wildcard};

/// The real disk, through `std::fs`.
#[derive(Debug, Default, Copy, Clone)]
pub struct NativeFileSystem;

#[inline]
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

impl FileSystem for NativeFileSystem {
    fn read_bytes(&self, path: &Path) -> anyhow::Result<Bytes> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read file {:?}", path))?;
        Ok(Bytes::from(bytes))
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write out file: {:?}", path))
    }

    fn create_directory(&self, path: &Path) -> anyhow::Result<()> {
        if path.is_file() {
            bail!("{} is a file, not a directory!", path.display());
        }
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn find_files(&self, pattern: &str) -> anyhow::Result<Vec<FileInfo>> {
        let (dir, file_pattern) = split_with_wildcard(pattern);
        let dir = standardize_path(&dir, true);
        let root = if dir.is_empty() { Path::new(".") } else { Path::new(&dir) };

        if !root.is_dir() {
            bail!("Search directory {} does not exist!", root.display());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).into_iter().filter_entry(|e| !is_hidden(e)) {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", root))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or_else(|_| entry.path());
            let path = format!("{}{}", dir, standardize_path(&relative.to_string_lossy(), false));

            let metadata = entry.metadata().ok();
            files.push(FileInfo {
                path: PathBuf::from(path),
                size: metadata.as_ref().map_or(0, |m| m.len()),
                modified: metadata.and_then(|m| m.modified().ok()),
            });
        }

        log::trace!("{} files under {:?} before filtering with {:?}", files.len(), root, file_pattern);
        Ok(filter_matches(files, &dir, &file_pattern))
    }
}
