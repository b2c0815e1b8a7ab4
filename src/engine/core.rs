// src/engine/core.rs

//! Core runtime state machine.
//!
//! Consumes [`RuntimeEvent`]s and produces a [`CoreStep`]: the plan for the
//! next cycle (if any) and whether the runtime should keep going. It owns
//! no channels and spawns nothing; the only IO is the gate's read-only
//! project scan.

use tracing::debug;

use crate::engine::{BuildRequest, CyclePlan, RuntimeEvent, RuntimeOptions};
use crate::errors::Result;
use crate::gate::Gate;

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub plan: Option<CyclePlan>,
    pub keep_running: bool,
}

#[derive(Debug)]
pub struct CoreRuntime<G: Gate> {
    gate: G,
    options: RuntimeOptions,
    cycles: u64,
}

impl<G: Gate> CoreRuntime<G> {
    pub fn new(gate: G, options: RuntimeOptions) -> Self {
        Self {
            gate,
            options,
            cycles: 0,
        }
    }

    pub fn options(&self) -> RuntimeOptions {
        self.options
    }

    /// Number of build requests handled so far (including skipped ones).
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Handle a single event.
    ///
    /// Errors from the gate (configuration, discovery) abort only this
    /// cycle; the caller decides whether that ends the runtime.
    pub fn step(&mut self, event: RuntimeEvent) -> Result<CoreStep> {
        match event {
            RuntimeEvent::BuildRequested(request) => self.plan_cycle(request),
            RuntimeEvent::ShutdownRequested => Ok(CoreStep {
                plan: None,
                keep_running: false,
            }),
        }
    }

    fn plan_cycle(&mut self, request: BuildRequest) -> Result<CoreStep> {
        self.cycles += 1;
        let cycle = self.cycles;
        debug!(
            cycle,
            trigger = %request.trigger,
            changes = request.changes.as_ref().map(|c| c.len()),
            "planning build cycle"
        );

        let items = self.gate.decide(request.trigger, request.changes.as_ref())?;

        Ok(CoreStep {
            plan: Some(CyclePlan {
                cycle,
                trigger: request.trigger,
                items,
            }),
            keep_running: !self.options.exit_when_idle,
        })
    }
}
