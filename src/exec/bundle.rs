// src/exec/bundle.rs

//! Compiler bundle shipped inside the binary.
//!
//! `node` cannot compile LESS on its own; it runs this script with the
//! source and destination paths. The script is written out once per
//! version so node can load it from disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::errors::Result;
use crate::fs::FileSystem;

pub const COMPILER_BUNDLE: &str = include_str!("../../assets/compile.js");

pub const BUNDLE_FILE_NAME: &str = concat!("lessgate-compile-", env!("CARGO_PKG_VERSION"), ".js");

/// Where [`install_bundle`] puts the script by default.
pub fn default_bundle_dir() -> PathBuf {
    std::env::temp_dir().join("lessgate")
}

/// Write the bundle into `dir` unless an identical copy is already there.
pub fn install_bundle(fs: &dyn FileSystem, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(BUNDLE_FILE_NAME);
    let up_to_date = fs
        .metadata(&path)
        .is_ok_and(|meta| meta.len == COMPILER_BUNDLE.len() as u64);
    if up_to_date {
        return Ok(path);
    }

    fs.write(&path, COMPILER_BUNDLE.as_bytes())
        .with_context(|| format!("installing compiler bundle to {:?}", path))?;
    debug!(path = ?path, "installed compiler bundle");
    Ok(path)
}
