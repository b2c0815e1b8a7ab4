// src/exec/refresh.rs

//! Host-side view of generated artifacts.
//!
//! After a successful compile the host is asked to refresh its cached
//! metadata for the destination file only (never its directory).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::{LessgateError, Result};
use crate::fs::{ArtifactMeta, FileSystem};

/// Receives "this artifact changed" notifications.
pub trait ArtifactHost: Send {
    fn refresh(&mut self, artifact: &Path) -> Result<()>;
}

/// Default host: keeps an in-memory metadata cache keyed by artifact path
/// and re-reads the entry on every refresh.
#[derive(Debug)]
pub struct MetadataHost {
    fs: Arc<dyn FileSystem>,
    cache: HashMap<PathBuf, ArtifactMeta>,
}

impl MetadataHost {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            cache: HashMap::new(),
        }
    }

    /// Last metadata recorded for `artifact`, if it was ever refreshed.
    pub fn cached(&self, artifact: &Path) -> Option<ArtifactMeta> {
        self.cache.get(artifact).copied()
    }

    /// Drop the cached entry for an artifact.
    pub fn invalidate(&mut self, artifact: &Path) {
        if self.cache.remove(artifact).is_some() {
            debug!("invalidated artifact cache for {:?}", artifact);
        }
    }
}

impl ArtifactHost for MetadataHost {
    fn refresh(&mut self, artifact: &Path) -> Result<()> {
        self.invalidate(artifact);
        let meta = self.fs.metadata(artifact).map_err(|e| LessgateError::Refresh {
            path: artifact.to_path_buf(),
            reason: format!("{e:#}"),
        })?;
        debug!(path = ?artifact, len = meta.len, "artifact refreshed");
        self.cache.insert(artifact.to_path_buf(), meta);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn refresh_records_new_metadata() {
        let fs = MockFileSystem::new();
        fs.add_file("/p/out/app.css", "a{}");
        let mut host = MetadataHost::new(Arc::new(fs.clone()));

        host.refresh(Path::new("/p/out/app.css")).unwrap();
        assert_eq!(host.cached(Path::new("/p/out/app.css")).map(|m| m.len), Some(3));

        fs.add_file("/p/out/app.css", "a{color:red}");
        host.refresh(Path::new("/p/out/app.css")).unwrap();
        assert_eq!(host.cached(Path::new("/p/out/app.css")).map(|m| m.len), Some(12));
    }

    #[test]
    fn missing_artifact_is_refresh_error_and_clears_cache() {
        let fs = MockFileSystem::new();
        fs.add_file("/p/app.css", "");
        let mut host = MetadataHost::new(Arc::new(fs.clone()));
        host.refresh(Path::new("/p/app.css")).unwrap();

        fs.remove("/p/app.css");
        let err = host.refresh(Path::new("/p/app.css")).unwrap_err();
        assert!(matches!(err, LessgateError::Refresh { .. }));
        assert!(host.cached(Path::new("/p/app.css")).is_none());
    }
}
