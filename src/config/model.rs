// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::gate::SourceMapping;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// executable = "lessc"
/// bundled_compiler = false
/// timeout = "60s"
///
/// [source]
/// mode = "list"
/// sources = "styles/site.less,styles/admin.less"
/// out_dir = "public/css"
///
/// [watch]
/// exclude = ["node_modules/**"]
/// ```
///
/// Every section is optional. With no `[source]` the project falls back to
/// discovering `app.less`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub source: SourceSection,

    #[serde(default)]
    pub watch: WatchSection,
}

/// `[config]` section: how the external compiler is located and run.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Program name searched for on `PATH` (platform suffix added on Windows).
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Compiler bundle handed to the executable ahead of the two paths.
    #[serde(default)]
    pub script: Option<PathBuf>,

    /// With no `script`, pass the compiler bundle shipped with lessgate.
    /// Turn off for executables such as `lessc` that take the two paths
    /// directly.
    #[serde(default = "default_bundled_compiler")]
    pub bundled_compiler: bool,

    /// Directories probed after the search path.
    #[serde(default)]
    pub extra_search_dirs: Vec<PathBuf>,

    /// Upper bound for a single compile, e.g. `"60s"`.
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Window used to batch filesystem events into one change-set.
    #[serde(default = "default_debounce")]
    pub debounce: String,
}

fn default_executable() -> String {
    "node".to_string()
}

fn default_bundled_compiler() -> bool {
    true
}

fn default_timeout() -> String {
    "60s".to_string()
}

fn default_debounce() -> String {
    "200ms".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            script: None,
            bundled_compiler: default_bundled_compiler(),
            extra_search_dirs: Vec::new(),
            timeout: default_timeout(),
            debounce: default_debounce(),
        }
    }
}

/// `[source]` section. The `mode` tag selects exactly one mapping policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SourceSection {
    /// Scan the project for `<root_name>.less`.
    Discover {
        #[serde(default = "default_root_name")]
        root_name: String,
    },
    /// Delimiter-separated sources, optionally redirected into `out_dir`.
    List {
        #[serde(default)]
        sources: Option<String>,
        #[serde(default = "default_delimiter")]
        delimiter: String,
        #[serde(default)]
        out_dir: Option<PathBuf>,
    },
    /// One source, one destination, both verbatim.
    Pair {
        #[serde(default)]
        source: Option<PathBuf>,
        #[serde(default)]
        destination: Option<PathBuf>,
    },
}

fn default_root_name() -> String {
    "app".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

impl Default for SourceSection {
    fn default() -> Self {
        SourceSection::Discover {
            root_name: default_root_name(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Glob patterns (relative to the project root) ignored by both the
    /// watcher and the discovery scan.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_exclude() -> Vec<String> {
    vec!["node_modules/**".to_string(), ".git/**".to_string()]
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
        }
    }
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>`, so durations are
/// already parsed and the source mapping is in its typed form.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub mapping: SourceMapping,
    pub exclude: Vec<String>,
    pub timeout: Duration,
    pub debounce: Duration,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        mapping: SourceMapping,
        exclude: Vec<String>,
        timeout: Duration,
        debounce: Duration,
    ) -> Self {
        Self {
            config,
            mapping,
            exclude,
            timeout,
            debounce,
        }
    }
}
