// src/exec/runner.rs

//! Single compiler process run.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{LessgateError, Result};

/// Fully resolved compiler command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    pub program: PathBuf,
    pub script: Option<PathBuf>,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl CompileCommand {
    /// Positional arguments: `[script] source destination`.
    pub fn args(&self) -> Vec<&Path> {
        self.script
            .as_deref()
            .into_iter()
            .chain([self.source.as_path(), self.destination.as_path()])
            .collect()
    }
}

/// Run the compiler and wait for it to exit, killing it after `timeout`.
///
/// Only the exit status is observed. stdout is discarded; stderr is logged
/// at debug level so failures can be diagnosed with `--log-level debug`.
pub async fn run_compiler(command: &CompileCommand, timeout: Duration) -> Result<()> {
    let program = command.program.display().to_string();
    let invocation_error = |reason: String| LessgateError::Invocation {
        program: program.clone(),
        source_path: command.source.clone(),
        reason,
    };

    info!(
        program = %program,
        source = ?command.source,
        destination = ?command.destination,
        "starting compiler"
    );

    let mut cmd = Command::new(&command.program);
    cmd.args(command.args())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .map_err(|e| invocation_error(format!("failed to start: {e}")))?;

    if let Some(stderr) = child.stderr.take() {
        let source = command.source.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(source = ?source, "compiler stderr: {}", line);
            }
        });
    }

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) => {
            info!(
                source = ?command.source,
                exit_code = ?status.code(),
                success = status.success(),
                "compiler exited"
            );
            if status.success() {
                Ok(())
            } else {
                Err(invocation_error(format!("compiler exited with {status}")))
            }
        }
        Ok(Err(e)) => Err(invocation_error(format!("waiting for process failed: {e}"))),
        Err(_) => {
            warn!(source = ?command.source, ?timeout, "compiler timed out; killing process");
            if let Err(e) = child.kill().await {
                warn!(error = %e, "failed to kill timed-out compiler");
            }
            Err(LessgateError::Timeout {
                source_path: command.source.clone(),
                after: timeout,
            })
        }
    }
}
