// src/engine/mod.rs

//! Build-cycle engine.
//!
//! - [`core`]: synchronous state machine that turns build requests into
//!   cycle plans using a [`Gate`](crate::gate::Gate).
//! - [`queue`]: coalesces requests that piled up while a cycle was running.
//! - [`runtime`]: async shell that reads events from a channel and drives a
//!   [`CompileInvoker`](crate::exec::CompileInvoker) through each plan.

use crate::types::{BuildTrigger, ChangeSet, WorkList};

/// Request for one build cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub trigger: BuildTrigger,
    /// `None` when there is no baseline to diff against (first build).
    pub changes: Option<ChangeSet>,
}

impl BuildRequest {
    pub fn new(trigger: BuildTrigger, changes: Option<ChangeSet>) -> Self {
        Self { trigger, changes }
    }

    /// First build of a session: change-driven, no baseline.
    pub fn initial(trigger: BuildTrigger) -> Self {
        Self::new(trigger, None)
    }
}

/// Events flowing into the runtime from the watcher, startup and Ctrl-C.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    BuildRequested(BuildRequest),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// Stop after the first cycle (used for `--once`); a failed cycle then
    /// becomes the runtime's error.
    pub exit_when_idle: bool,
}

/// What one cycle should compile. An empty item list is a skipped cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePlan {
    pub cycle: u64,
    pub trigger: BuildTrigger,
    pub items: WorkList,
}

pub mod core;
pub mod queue;
pub mod runtime;

pub use core::{CoreRuntime, CoreStep};
pub use queue::coalesce;
pub use runtime::Runtime;
