// src/types.rs

//! Value types shared by the gate, the invoker and the runtime.
//!
//! Everything here is constructed fresh for each build cycle; nothing is
//! carried between cycles.

use std::fmt;
use std::path::{Path, PathBuf};

/// File extension of stylesheet sources handled by the compiler.
pub const SOURCE_EXTENSION: &str = "less";

/// File extension of generated output.
pub const TARGET_EXTENSION: &str = "css";

/// Why a build cycle was started.
///
/// - `Auto`: background rebuild after files were saved (watch mode).
/// - `Incremental`: explicit incremental rebuild.
/// - `Full`: explicit full rebuild; never gated on changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildTrigger {
    Auto,
    Incremental,
    Full,
}

impl BuildTrigger {
    /// `Auto` and `Incremental` only rebuild when something relevant changed.
    pub fn is_change_driven(self) -> bool {
        matches!(self, BuildTrigger::Auto | BuildTrigger::Incremental)
    }
}

impl fmt::Display for BuildTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildTrigger::Auto => "auto",
            BuildTrigger::Incremental => "incremental",
            BuildTrigger::Full => "full",
        };
        f.write_str(s)
    }
}

/// Coarse kind of a filesystem notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Changed,
    Removed,
}

/// A single filesystem notification, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn changed(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ChangeKind::Changed)
    }

    /// Whether this event concerns a stylesheet source.
    pub fn is_stylesheet_source(&self) -> bool {
        is_stylesheet_source(&self.path)
    }
}

/// Ordered change notifications collected for one build cycle.
///
/// An absent change-set (no baseline yet) is modelled as
/// `Option<ChangeSet>::None` by callers, not as an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    events: Vec<ChangeEvent>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ChangeEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeEvent> {
        self.events.iter()
    }

    /// First event that touches a stylesheet source, if any.
    pub fn first_stylesheet_change(&self) -> Option<&ChangeEvent> {
        self.events.iter().find(|e| e.is_stylesheet_source())
    }
}

impl FromIterator<ChangeEvent> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = ChangeEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<ChangeEvent>> for ChangeSet {
    fn from(events: Vec<ChangeEvent>) -> Self {
        Self { events }
    }
}

/// A resolved `(source, destination)` pair ready for the external compiler.
///
/// Paths are project-relative unless the mapping configured absolute ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl WorkItem {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.source.display(),
            self.destination.display()
        )
    }
}

/// Work list produced by the gate for one cycle. Empty means "no rebuild".
pub type WorkList = Vec<WorkItem>;

/// Returns true if `path` has the stylesheet-source extension.
pub fn is_stylesheet_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == SOURCE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_less_extension_counts_as_source() {
        assert!(is_stylesheet_source(Path::new("src/app.less")));
        assert!(is_stylesheet_source(Path::new("deep/nested/theme.less")));
        assert!(!is_stylesheet_source(Path::new("src/app.css")));
        assert!(!is_stylesheet_source(Path::new("src/less")));
        assert!(!is_stylesheet_source(Path::new("src/app.less.bak")));
        assert!(!is_stylesheet_source(Path::new("README")));
    }

    #[test]
    fn trigger_display_matches_log_fields() {
        assert_eq!(BuildTrigger::Full.to_string(), "full");
        assert_eq!(BuildTrigger::Auto.to_string(), "auto");
        assert!(!BuildTrigger::Full.is_change_driven());
        assert!(BuildTrigger::Incremental.is_change_driven());
    }

    #[test]
    fn first_stylesheet_change_skips_other_files() {
        let set: ChangeSet = vec![
            ChangeEvent::changed("README.md"),
            ChangeEvent::new("styles/base.less", ChangeKind::Removed),
        ]
        .into();
        let hit = set.first_stylesheet_change().map(|e| e.path.clone());
        assert_eq!(hit, Some(PathBuf::from("styles/base.less")));
    }
}
