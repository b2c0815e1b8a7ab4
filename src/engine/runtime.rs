// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::engine::core::CoreRuntime;
use crate::engine::queue::coalesce;
use crate::engine::{BuildRequest, CyclePlan, RuntimeEvent};
use crate::errors::Result;
use crate::exec::CompileInvoker;
use crate::gate::Gate;

/// Async shell around [`CoreRuntime`].
///
/// Reads events from the channel, lets the core plan each cycle, and hands
/// the planned work items to a [`CompileInvoker`] one at a time. A cycle
/// stops at its first failing item.
pub struct Runtime<G: Gate, I: CompileInvoker> {
    core: CoreRuntime<G>,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    invoker: I,
}

impl<G: Gate, I: CompileInvoker> fmt::Debug for Runtime<G, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("cycles", &self.core.cycles())
            .finish_non_exhaustive()
    }
}

impl<G: Gate, I: CompileInvoker> Runtime<G, I> {
    pub fn new(core: CoreRuntime<G>, event_rx: mpsc::Receiver<RuntimeEvent>, invoker: I) -> Self {
        Self {
            core,
            event_rx,
            invoker,
        }
    }

    /// Main event loop.
    ///
    /// In watch mode a failed cycle is logged and the loop waits for the next
    /// change. With `exit_when_idle` the first cycle's error is returned.
    pub async fn run(mut self) -> Result<()> {
        info!("lessgate runtime started");
        let exit_when_idle = self.core.options().exit_when_idle;

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            let (event, shutdown_pending) = match event {
                RuntimeEvent::BuildRequested(request) => {
                    let (merged, shutdown) = self.drain_pending(request);
                    (RuntimeEvent::BuildRequested(merged), shutdown)
                }
                other => (other, false),
            };

            debug!(?event, "runtime received event");

            let keep_running = match self.core.step(event) {
                Ok(step) => {
                    let outcome = match step.plan {
                        Some(plan) => self.execute_plan(plan).await,
                        None => Ok(()),
                    };
                    if let Err(err) = outcome {
                        if exit_when_idle {
                            return Err(err);
                        }
                        error!(error = %err, "build cycle failed");
                    }
                    step.keep_running
                }
                Err(err) => {
                    if exit_when_idle {
                        return Err(err);
                    }
                    error!(error = %err, "build cycle could not be planned");
                    true
                }
            };

            if !keep_running || shutdown_pending {
                info!("stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(())
    }

    /// Fold every build request already waiting in the channel into `first`.
    ///
    /// Returns whether a shutdown request was seen while draining.
    fn drain_pending(&mut self, first: BuildRequest) -> (BuildRequest, bool) {
        let mut merged = first;
        let mut folded = 0usize;
        while let Ok(next) = self.event_rx.try_recv() {
            match next {
                RuntimeEvent::BuildRequested(request) => {
                    merged = coalesce(merged, request);
                    folded += 1;
                }
                RuntimeEvent::ShutdownRequested => return (merged, true),
            }
        }
        if folded > 0 {
            debug!(folded, "coalesced pending build requests");
        }
        (merged, false)
    }

    async fn execute_plan(&mut self, plan: CyclePlan) -> Result<()> {
        if plan.items.is_empty() {
            debug!(cycle = plan.cycle, trigger = %plan.trigger, "nothing to rebuild");
            return Ok(());
        }

        info!(
            cycle = plan.cycle,
            trigger = %plan.trigger,
            items = plan.items.len(),
            "build cycle started"
        );

        for (index, item) in plan.items.iter().enumerate() {
            if let Err(err) = self.invoker.compile(item).await {
                let skipped = plan.items.len() - index - 1;
                warn!(
                    cycle = plan.cycle,
                    item = %item,
                    skipped,
                    "compile failed; aborting cycle"
                );
                return Err(err);
            }
            info!(cycle = plan.cycle, item = %item, "compiled");
        }

        info!(cycle = plan.cycle, "build cycle finished");
        Ok(())
    }
}
