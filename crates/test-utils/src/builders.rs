#![allow(dead_code)]

use std::path::PathBuf;

use lessgate::config::{ConfigFile, RawConfigFile, SourceSection};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    /// Defaults: discover `app.less`, run `node`.
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn discover(mut self, root_name: &str) -> Self {
        self.config.source = SourceSection::Discover {
            root_name: root_name.to_string(),
        };
        self
    }

    pub fn list(mut self, sources: &str, out_dir: Option<&str>) -> Self {
        self.config.source = SourceSection::List {
            sources: Some(sources.to_string()),
            delimiter: ",".to_string(),
            out_dir: out_dir.map(PathBuf::from),
        };
        self
    }

    pub fn pair(mut self, source: Option<&str>, destination: Option<&str>) -> Self {
        self.config.source = SourceSection::Pair {
            source: source.map(PathBuf::from),
            destination: destination.map(PathBuf::from),
        };
        self
    }

    pub fn executable(mut self, name: &str) -> Self {
        self.config.config.executable = name.to_string();
        self
    }

    pub fn script(mut self, path: &str) -> Self {
        self.config.config.script = Some(PathBuf::from(path));
        self
    }

    pub fn bundled_compiler(mut self, enabled: bool) -> Self {
        self.config.config.bundled_compiler = enabled;
        self
    }

    pub fn timeout(mut self, value: &str) -> Self {
        self.config.config.timeout = value.to_string();
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.config.watch.exclude.push(pattern.to_string());
        self
    }

    pub fn no_excludes(mut self) -> Self {
        self.config.watch.exclude.clear();
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
