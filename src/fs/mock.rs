// src/fs/mock.rs

use super::{ArtifactMeta, FileSystem};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(Vec<String>), // child names, insertion order
    Link(PathBuf),
}

const MAX_LINK_HOPS: usize = 8;

/// In-memory tree used by discovery and lookup tests.
///
/// Clones share the same tree, so a fake compiler can "write" output that a
/// test later inspects.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            files: Arc::new(Mutex::new(files)),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = key(path.as_ref());
        let mut files = self.files.lock().unwrap();
        files.insert(path.clone(), MockEntry::File(content.into()));
        Self::link_into_parent(&mut files, &path);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = key(path.as_ref());
        let mut files = self.files.lock().unwrap();
        Self::ensure_dir_entry(&mut files, &path);
    }

    /// Add a symbolic link at `path` pointing to `target`.
    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl AsRef<Path>) {
        let path = key(path.as_ref());
        let mut files = self.files.lock().unwrap();
        files.insert(path.clone(), MockEntry::Link(key(target.as_ref())));
        Self::link_into_parent(&mut files, &path);
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = key(path.as_ref());
        let path = path.as_path();
        let mut files = self.files.lock().unwrap();
        files.remove(path);
        let parent = parent_or_root(path);
        if let (Some(MockEntry::Dir(children)), Some(name)) = (
            files.get_mut(parent),
            path.file_name().and_then(|n| n.to_str()),
        ) {
            children.retain(|c| c != name);
        }
    }

    fn link_into_parent(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let parent = parent_or_root(path);
        if parent == path {
            return;
        }
        Self::ensure_dir_entry(files, parent);
        if let (Some(MockEntry::Dir(children)), Some(name)) = (
            files.get_mut(parent),
            path.file_name().and_then(|n| n.to_str()),
        ) {
            if !children.iter().any(|c| c == name) {
                children.push(name.to_string());
            }
        }
    }

    fn ensure_dir_entry(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        if files.contains_key(path) {
            return;
        }
        files.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
        Self::link_into_parent(files, path);
    }
}

/// Relative paths are anchored at "." so `src/a.less` and `./src/a.less`
/// name the same entry.
fn key(path: &Path) -> PathBuf {
    match path.components().next() {
        Some(Component::CurDir) | Some(Component::RootDir) | Some(Component::Prefix(_)) => {
            path.to_path_buf()
        }
        _ => Path::new(".").join(path),
    }
}

/// Follow links until a file or directory (or nothing) is reached.
fn resolve<'a>(files: &'a HashMap<PathBuf, MockEntry>, path: &Path) -> Option<&'a MockEntry> {
    let mut entry = files.get(&key(path))?;
    for _ in 0..MAX_LINK_HOPS {
        match entry {
            MockEntry::Link(target) => entry = files.get(target)?,
            other => return Some(other),
        }
    }
    None
}

fn parent_or_root(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => path,
    }
}

impl FileSystem for MockFileSystem {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.add_file(path, contents);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_dir(path);
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(resolve(&files, path), Some(MockEntry::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(resolve(&files, path), Some(MockEntry::Dir(_)))
    }

    fn is_symlink(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(files.get(&key(path)), Some(MockEntry::Link(_)))
    }

    fn metadata(&self, path: &Path) -> Result<ArtifactMeta> {
        let files = self.files.lock().unwrap();
        match resolve(&files, path) {
            Some(MockEntry::File(content)) => Ok(ArtifactMeta {
                len: content.len() as u64,
                modified: None,
            }),
            Some(_) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let files = self.files.lock().unwrap();
        match resolve(&files, path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }
}
