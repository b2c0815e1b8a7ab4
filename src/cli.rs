// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `lessgate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lessgate",
    version,
    about = "Recompile LESS stylesheets to CSS when they change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// The directory containing it is the project root. If the file does not
    /// exist, built-in defaults are used (discover `app.less`, run `node`).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Run a single build cycle, then exit. Exits non-zero if it failed.
    #[arg(long)]
    pub once: bool,

    /// Make the first cycle a full build instead of an incremental one.
    #[arg(long)]
    pub full: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LESSGATE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the work items and compiler, but run nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::parse_from(["lessgate"]);
        assert_eq!(args.config, PathBuf::from("Lessgate.toml"));
        assert!(!args.once && !args.full && !args.dry_run);
        assert!(args.log_level.is_none());
    }

    #[test]
    fn flags_parse() {
        let args = CliArgs::parse_from([
            "lessgate",
            "--config",
            "web/Lessgate.toml",
            "--once",
            "--full",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.config, PathBuf::from("web/Lessgate.toml"));
        assert!(args.once && args.full);
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}
