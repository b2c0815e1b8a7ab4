// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

pub mod mock;

/// Snapshot of the metadata the host caches for a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactMeta {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

/// Abstract filesystem interface.
///
/// Discovery, executable lookup and artifact refresh all go through this so
/// tests can run against [`mock::MockFileSystem`].
pub trait FileSystem: Send + Sync + Debug {
    /// Write `contents`, creating missing parent directories.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    /// True for a symbolic link itself, whatever it points at.
    fn is_symlink(&self, path: &Path) -> bool;
    fn metadata(&self, path: &Path) -> Result<ArtifactMeta>;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }
        fs::write(path, contents).with_context(|| format!("writing to file {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn metadata(&self, path: &Path) -> Result<ArtifactMeta> {
        let meta = fs::metadata(path).with_context(|| format!("reading metadata of {:?}", path))?;
        if !meta.is_file() {
            anyhow::bail!("{:?} is not a regular file", path);
        }
        Ok(ArtifactMeta {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        // Stable order keeps discovery deterministic across platforms.
        entries.sort();
        Ok(entries)
    }
}
