// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! None of these are retried; each aborts the current build cycle.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LessgateError {
    /// No usable source/destination mapping, or an invalid config value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Discovery mode found no `<root_name>.less` in the project tree.
    #[error("No '{root_name}.less' found under {root:?}")]
    NotFound { root_name: String, root: PathBuf },

    /// The compiler executable is absent from every searched directory.
    #[error("Could not find '{program}' in {searched} search directories")]
    ToolNotFound { program: String, searched: usize },

    /// The process failed to start, exited unsuccessfully, or waiting failed.
    #[error("Compiler invocation '{program}' failed for {source_path:?}: {reason}")]
    Invocation {
        program: String,
        source_path: PathBuf,
        reason: String,
    },

    /// The compiler ran longer than the configured limit and was killed.
    #[error("Compiling {source_path:?} timed out after {after:?}")]
    Timeout { source_path: PathBuf, after: Duration },

    /// Compile succeeded but the destination could not be refreshed.
    #[error("Could not refresh {path:?}: {reason}")]
    Refresh { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, LessgateError>;
