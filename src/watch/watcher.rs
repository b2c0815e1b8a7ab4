// src/watch/watcher.rs

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::{BuildRequest, RuntimeEvent};
use crate::types::{BuildTrigger, ChangeSet};
use crate::watch::events::to_change_events;
use crate::watch::patterns::ExcludeSet;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive; dropping the handle
/// stops watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch `root` recursively and send `BuildRequested { Auto, Some(set) }`
/// for every batch of changes.
///
/// Events arriving within `debounce` of each other end up in the same
/// change-set. Batches that are empty after filtering are dropped here;
/// whether a non-empty batch is relevant is left to the gate.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    exclude: ExcludeSet,
    debounce: Duration,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or(root);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    eprintln!("lessgate: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("lessgate: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    tokio::spawn(async move {
        while let Some(first) = event_rx.recv().await {
            let mut batch: ChangeSet = to_change_events(&root, &first, &exclude).into();

            // Keep collecting until the tree has been quiet for `debounce`.
            while let Ok(Some(next)) = tokio::time::timeout(debounce, event_rx.recv()).await {
                for change in to_change_events(&root, &next, &exclude) {
                    batch.push(change);
                }
            }

            if batch.is_empty() {
                continue;
            }

            debug!(events = batch.len(), "forwarding change batch");
            let request = BuildRequest::new(BuildTrigger::Auto, Some(batch));
            if let Err(err) = runtime_tx.send(RuntimeEvent::BuildRequested(request)).await {
                warn!("failed to send build request: {err}");
                // Runtime is gone; nothing left to feed.
                return;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}
