// src/gate/discover.rs

//! Depth-first candidate walk used by the `Discover` mapping.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, trace};

use crate::fs::FileSystem;
use crate::types::SOURCE_EXTENSION;
use crate::watch::patterns::ExcludeSet;

/// Lazy, finite walk over the files of a project tree.
///
/// Yields project-relative paths in pre-order, skipping anything matched by
/// the exclude set (excluded directories are not entered). Symlinked
/// directories are never entered either, so a link back to an ancestor
/// cannot make the walk revisit the tree. A fresh walk can
/// be started at any time with [`CandidateWalk::new`]; the walk itself holds
/// no cached state beyond its own stack.
pub struct CandidateWalk<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
    exclude: &'a ExcludeSet,
    stack: Vec<PathBuf>,
}

impl<'a> CandidateWalk<'a> {
    pub fn new(fs: &'a dyn FileSystem, root: &'a Path, exclude: &'a ExcludeSet) -> Self {
        Self {
            fs,
            root,
            exclude,
            stack: vec![root.to_path_buf()],
        }
    }

    fn relative(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(self.root).ok().map(Path::to_path_buf)
    }
}

impl Iterator for CandidateWalk<'_> {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.stack.pop() {
            let rel = self.relative(&path)?;
            let rel_str = rel.to_string_lossy().replace('\\', "/");

            if !rel_str.is_empty() && self.exclude.is_excluded(&rel_str) {
                trace!(path = %rel_str, "skipping excluded path");
                continue;
            }

            if self.fs.is_dir(&path) {
                if path != self.root && self.fs.is_symlink(&path) {
                    trace!(path = %rel_str, "not following directory symlink");
                    continue;
                }
                let mut children = match self.fs.read_dir(&path) {
                    Ok(children) => children,
                    Err(err) => return Some(Err(err)),
                };
                // Reverse so the first entry is popped first.
                children.reverse();
                self.stack.extend(children);
            } else if self.fs.is_file(&path) {
                return Some(Ok(rel));
            }
        }
        None
    }
}

/// Find the first `<root_name>.less` under `root`, as a project-relative path.
///
/// Returns `Ok(None)` when the walk finishes without a match.
pub fn find_root_source(
    fs: &dyn FileSystem,
    root: &Path,
    exclude: &ExcludeSet,
    root_name: &str,
) -> Result<Option<PathBuf>> {
    let wanted = format!("{root_name}.{SOURCE_EXTENSION}");
    let mut visited = 0usize;

    for candidate in CandidateWalk::new(fs, root, exclude) {
        let candidate = candidate?;
        visited += 1;
        if candidate.file_name().and_then(|n| n.to_str()) == Some(wanted.as_str()) {
            debug!(path = ?candidate, visited, "discovered root stylesheet");
            return Ok(Some(candidate));
        }
    }

    debug!(root = ?root, visited, wanted = %wanted, "no root stylesheet found");
    Ok(None)
}
