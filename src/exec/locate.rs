// src/exec/locate.rs

//! Search-path lookup for the compiler executable.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{LessgateError, Result};
use crate::fs::FileSystem;

/// Platform conventions that affect executable lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFlavor {
    Windows,
    MacOs,
    Unix,
}

impl OsFlavor {
    pub fn current() -> Self {
        if cfg!(windows) {
            OsFlavor::Windows
        } else if cfg!(target_os = "macos") {
            OsFlavor::MacOs
        } else {
            OsFlavor::Unix
        }
    }

    fn path_separator(self) -> char {
        match self {
            OsFlavor::Windows => ';',
            OsFlavor::MacOs | OsFlavor::Unix => ':',
        }
    }

    /// A directory GUI-launched processes often miss from their `PATH`.
    fn extra_probe_dir(self) -> Option<&'static str> {
        match self {
            OsFlavor::MacOs => Some("/usr/local/bin"),
            OsFlavor::Windows | OsFlavor::Unix => None,
        }
    }
}

/// `node` -> `node.exe` on Windows; unchanged elsewhere or when already
/// suffixed.
pub fn executable_file_name(program: &str, flavor: OsFlavor) -> String {
    match flavor {
        OsFlavor::Windows if !program.to_ascii_lowercase().ends_with(".exe") => {
            format!("{program}.exe")
        }
        _ => program.to_string(),
    }
}

/// Directories to probe, in order: the search path, the platform's extra
/// directory (if not already listed), then configured extras.
pub fn search_dirs(search_path: Option<&OsStr>, flavor: OsFlavor, extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = search_path
        .map(|value| {
            value
                .to_string_lossy()
                .split(flavor.path_separator())
                .filter(|entry| !entry.is_empty())
                .map(PathBuf::from)
                .collect()
        })
        .unwrap_or_default();

    let probes = flavor
        .extra_probe_dir()
        .map(PathBuf::from)
        .into_iter()
        .chain(extra.iter().cloned());
    for dir in probes {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// Find `program` in the search path. No process is spawned.
pub fn locate_executable(
    fs: &dyn FileSystem,
    program: &str,
    search_path: Option<&OsStr>,
    flavor: OsFlavor,
    extra: &[PathBuf],
) -> Result<PathBuf> {
    // An explicit path skips the search entirely.
    let as_path = Path::new(program);
    if as_path.components().count() > 1 {
        if fs.is_file(as_path) {
            return Ok(as_path.to_path_buf());
        }
        return Err(LessgateError::ToolNotFound {
            program: program.to_string(),
            searched: 0,
        });
    }

    let file_name = executable_file_name(program, flavor);
    let dirs = search_dirs(search_path, flavor, extra);

    for dir in &dirs {
        let candidate = dir.join(&file_name);
        if fs.is_file(&candidate) {
            debug!(path = ?candidate, "located compiler executable");
            return Ok(candidate);
        }
    }

    Err(LessgateError::ToolNotFound {
        program: file_name,
        searched: dirs.len(),
    })
}

/// [`locate_executable`] against the process environment's `PATH`.
pub fn locate_in_environment(fs: &dyn FileSystem, program: &str, extra: &[PathBuf]) -> Result<PathBuf> {
    let path_var = std::env::var_os("PATH");
    locate_executable(fs, program, path_var.as_deref(), OsFlavor::current(), extra)
}
