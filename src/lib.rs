// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod gate;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, ConfigFile, RawConfigFile};
use crate::engine::{BuildRequest, CoreRuntime, Runtime, RuntimeEvent, RuntimeOptions};
use crate::exec::{default_bundle_dir, locate_in_environment, InvokerSettings, ProcessInvoker};
use crate::fs::{FileSystem, RealFileSystem};
use crate::gate::ChangeGate;
use crate::types::BuildTrigger;
use crate::watch::ExcludeSet;

/// Load the project, then run the initial build and (unless `--once`)
/// keep rebuilding on stylesheet changes until Ctrl-C.
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone();
    let cfg = load_or_default(&config_path)?;
    let root = project_root(&config_path);
    info!(root = ?root, mode = cfg.mapping.mode_name(), "project loaded");

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let exclude = ExcludeSet::new(&cfg.exclude)?;
    let gate = ChangeGate::new(root.clone(), cfg.mapping.clone(), exclude.clone(), Arc::clone(&fs));
    let settings = InvokerSettings::from_config(&cfg, &root);

    if args.dry_run {
        print_dry_run(&cfg, &gate, &settings, fs.as_ref());
        return Ok(());
    }

    let settings = settings.with_bundled_compiler(fs.as_ref(), &default_bundle_dir())?;
    let invoker = ProcessInvoker::new(root.clone(), settings, Arc::clone(&fs));

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // Optional file watcher (disabled in --once mode).
    let _watcher_handle = if !args.once {
        Some(crate::watch::spawn_watcher(
            root.clone(),
            exclude,
            cfg.debounce,
            rt_tx.clone(),
        )?)
    } else {
        None
    };

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    // The first cycle has no baseline to diff against.
    let trigger = if args.full {
        BuildTrigger::Full
    } else {
        BuildTrigger::Incremental
    };
    rt_tx
        .send(RuntimeEvent::BuildRequested(BuildRequest::initial(trigger)))
        .await?;

    let options = RuntimeOptions {
        exit_when_idle: args.once,
    };
    let core = CoreRuntime::new(gate, options);
    let runtime = Runtime::new(core, rt_rx, invoker);
    runtime.run().await?;
    Ok(())
}

/// Load the config at `path`, or fall back to defaults when it is absent.
fn load_or_default(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        return Ok(load_and_validate(path)?);
    }
    debug!(path = ?path, "config file not found; using defaults");
    Ok(ConfigFile::try_from(RawConfigFile::default())?)
}

/// Figure out the project root.
///
/// - If the config path has a non-empty parent (e.g. "web/Lessgate.toml"),
///   we use that directory.
/// - If it's just a bare filename, we use the current working directory.
///
/// The result is made absolute so the compiler receives absolute paths.
fn project_root(config_path: &Path) -> PathBuf {
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    dir.canonicalize().unwrap_or(dir)
}

/// Simple dry-run output: mapping, compiler and resolved work items.
fn print_dry_run(cfg: &ConfigFile, gate: &ChangeGate, settings: &InvokerSettings, fs: &dyn FileSystem) {
    println!("lessgate dry-run");
    println!("  root: {}", gate.root().display());
    println!("  source mode: {}", cfg.mapping.mode_name());
    println!("  timeout: {:?}", cfg.timeout);

    match locate_in_environment(fs, &settings.executable, &settings.extra_search_dirs) {
        Ok(path) => println!("  compiler: {}", path.display()),
        Err(err) => println!("  compiler: {err}"),
    }
    match settings.script {
        Some(ref script) => println!("  script: {}", script.display()),
        None if settings.bundled_compiler => println!("  script: (bundled compiler)"),
        None => {}
    }
    println!();

    match gate.resolve_work_items() {
        Ok(items) => {
            println!("work items ({}):", items.len());
            for item in items {
                println!("  - {item}");
            }
        }
        Err(err) => println!("work items: {err}"),
    }

    debug!("dry-run complete (no execution)");
}
