// src/engine/queue.rs

//! Coalescing of build requests that arrive while a cycle is running.
//!
//! Cycles run one at a time, so requests queue up in the runtime channel.
//! Rather than replaying each of them, the runtime merges everything pending
//! into a single request:
//!
//! - the strongest trigger wins (`Full` > `Incremental` > `Auto`);
//! - a missing change-set on either side means "no baseline", which wins;
//! - otherwise change events are concatenated in arrival order.

use crate::engine::BuildRequest;
use crate::types::BuildTrigger;

fn strength(trigger: BuildTrigger) -> u8 {
    match trigger {
        BuildTrigger::Auto => 0,
        BuildTrigger::Incremental => 1,
        BuildTrigger::Full => 2,
    }
}

/// Merge `later` into `earlier`.
pub fn coalesce(earlier: BuildRequest, later: BuildRequest) -> BuildRequest {
    let trigger = if strength(later.trigger) > strength(earlier.trigger) {
        later.trigger
    } else {
        earlier.trigger
    };

    let changes = match (earlier.changes, later.changes) {
        (Some(a), Some(b)) => Some(a.iter().chain(b.iter()).cloned().collect()),
        _ => None,
    };

    BuildRequest { trigger, changes }
}
