// src/exec/invoker.rs

//! Pluggable compile backend.
//!
//! The runtime hands each [`WorkItem`] to a `CompileInvoker` and awaits it
//! before moving on to the next one.
//!
//! - [`ProcessInvoker`] is the production implementation: it locates the
//!   executable, runs it, then refreshes the destination through an
//!   [`ArtifactHost`].
//! - Tests provide their own invoker that records work items instead of
//!   spawning processes.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::exec::bundle::install_bundle;
use crate::exec::locate::locate_in_environment;
use crate::exec::refresh::{ArtifactHost, MetadataHost};
use crate::exec::runner::{run_compiler, CompileCommand};
use crate::fs::FileSystem;
use crate::types::WorkItem;

/// Trait abstracting how a single work item is compiled.
pub trait CompileInvoker: Send {
    /// Compile one item. Resolves once the compiler has exited and the
    /// destination has been refreshed.
    fn compile<'a>(
        &'a mut self,
        item: &'a WorkItem,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Settings [`ProcessInvoker`] needs, separated from the rest of the config.
#[derive(Debug, Clone)]
pub struct InvokerSettings {
    pub executable: String,
    /// Compiler bundle location, injected rather than looked up globally.
    pub script: Option<PathBuf>,
    /// Fill an empty `script` with the bundled compiler.
    pub bundled_compiler: bool,
    pub extra_search_dirs: Vec<PathBuf>,
    pub timeout: Duration,
}

impl InvokerSettings {
    /// Relative script paths are taken relative to the project root.
    pub fn from_config(cfg: &ConfigFile, root: &Path) -> Self {
        Self {
            executable: cfg.config.executable.clone(),
            script: cfg.config.script.as_ref().map(|s| root.join(s)),
            bundled_compiler: cfg.config.bundled_compiler,
            extra_search_dirs: cfg.config.extra_search_dirs.clone(),
            timeout: cfg.timeout,
        }
    }

    /// Install the bundled compiler into `dir` and use it, unless a script
    /// is configured or the bundle is turned off.
    pub fn with_bundled_compiler(mut self, fs: &dyn FileSystem, dir: &Path) -> Result<Self> {
        if self.script.is_none() && self.bundled_compiler {
            self.script = Some(install_bundle(fs, dir)?);
        }
        Ok(self)
    }
}

/// Runs the external compiler as an OS process, one item at a time.
pub struct ProcessInvoker<H: ArtifactHost = MetadataHost> {
    root: PathBuf,
    settings: InvokerSettings,
    fs: Arc<dyn FileSystem>,
    host: H,
}

impl ProcessInvoker<MetadataHost> {
    pub fn new(root: impl Into<PathBuf>, settings: InvokerSettings, fs: Arc<dyn FileSystem>) -> Self {
        let host = MetadataHost::new(Arc::clone(&fs));
        Self::with_host(root, settings, fs, host)
    }
}

impl<H: ArtifactHost> ProcessInvoker<H> {
    pub fn with_host(
        root: impl Into<PathBuf>,
        settings: InvokerSettings,
        fs: Arc<dyn FileSystem>,
        host: H,
    ) -> Self {
        Self {
            root: root.into(),
            settings,
            fs,
            host,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Locate the executable and build the absolute command line for `item`.
    ///
    /// Fails with `ToolNotFound` before anything is spawned.
    pub fn command_for(&self, item: &WorkItem) -> Result<CompileCommand> {
        let program = locate_in_environment(
            self.fs.as_ref(),
            &self.settings.executable,
            &self.settings.extra_search_dirs,
        )?;
        Ok(CompileCommand {
            program,
            script: self.settings.script.clone(),
            source: self.root.join(&item.source),
            destination: self.root.join(&item.destination),
        })
    }

    fn prepare_destination(&self, destination: &Path) -> Result<()> {
        if let Some(parent) = destination.parent() {
            if !self.fs.is_dir(parent) {
                debug!(dir = ?parent, "creating destination directory");
                self.fs.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl<H: ArtifactHost> CompileInvoker for ProcessInvoker<H> {
    fn compile<'a>(
        &'a mut self,
        item: &'a WorkItem,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let command = self.command_for(item)?;
            self.prepare_destination(&command.destination)?;
            run_compiler(&command, self.settings.timeout).await?;
            self.host.refresh(&command.destination)
        })
    }
}
