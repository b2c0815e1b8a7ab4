// src/watch/mod.rs

//! File watching.
//!
//! Turns filesystem notifications into batched [`ChangeSet`](crate::types::ChangeSet)s.
//! It does not decide whether a batch matters; that is the gate's job.

pub mod events;
pub mod patterns;
pub mod watcher;

pub use events::{relative_to_root, to_change_events};
pub use patterns::ExcludeSet;
pub use watcher::{spawn_watcher, WatcherHandle};
