// src/watch/events.rs

//! Translation of raw `notify` events into project-relative change events.

use std::path::{Path, PathBuf};

use notify::event::{EventKind, ModifyKind};
use notify::Event;

use crate::types::{ChangeEvent, ChangeKind};
use crate::watch::patterns::ExcludeSet;

/// Map a notify event kind onto our coarse kinds.
///
/// Access events and `Other`/`Any` notifications that carry no content
/// change are dropped.
pub fn change_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Added),
        EventKind::Remove(_) => Some(ChangeKind::Removed),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(ChangeKind::Changed),
        EventKind::Any => Some(ChangeKind::Changed),
        EventKind::Access(_) | EventKind::Other => None,
    }
}

/// Path of `path` relative to `root`, if it lies under it.
///
/// Tries a plain prefix strip first, then canonicalizes both sides (which
/// helps where the watcher reports a differently-prefixed absolute path for
/// the same directory, e.g. `/private/var` on macOS). Removed files cannot be
/// canonicalized, so their parent is canonicalized instead.
pub fn relative_to_root(root: &Path, path: &Path) -> Option<PathBuf> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(rel.to_path_buf());
    }

    let root_canon = root.canonicalize().ok()?;
    let path_canon = path.canonicalize().ok().or_else(|| {
        let parent = path.parent()?.canonicalize().ok()?;
        Some(parent.join(path.file_name()?))
    })?;
    path_canon
        .strip_prefix(&root_canon)
        .ok()
        .map(Path::to_path_buf)
}

/// Convert one notify event into zero or more change events.
pub fn to_change_events(root: &Path, event: &Event, exclude: &ExcludeSet) -> Vec<ChangeEvent> {
    let Some(kind) = change_kind(&event.kind) else {
        return Vec::new();
    };

    event
        .paths
        .iter()
        .filter_map(|path| relative_to_root(root, path))
        .filter(|rel| {
            let rel_str = rel.to_string_lossy().replace('\\', "/");
            !rel_str.is_empty() && !exclude.is_excluded(&rel_str)
        })
        .map(|rel| ChangeEvent::new(rel, kind))
        .collect()
}
