// src/gate/mod.rs

//! The change gate: "does this cycle need a rebuild, and of what?"
//!
//! - [`decide`] holds the trigger/change-set check.
//! - [`mapping`] derives destinations from sources for each mapping mode.
//! - [`discover`] walks the project tree for the `Discover` mode.
//!
//! The gate performs no writes and keeps nothing between cycles; callers
//! construct change-sets fresh for every cycle.

pub mod decide;
pub mod discover;
pub mod mapping;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{LessgateError, Result};
use crate::fs::FileSystem;
use crate::types::{BuildTrigger, ChangeSet, WorkItem, WorkList};
use crate::watch::patterns::ExcludeSet;

pub use decide::should_rebuild;
pub use discover::{find_root_source, CandidateWalk};
pub use mapping::{out_dir_destination, sibling_destination, SourceMapping};

/// Anything that can turn a build request into a work list.
///
/// An empty work list means "nothing to rebuild".
pub trait Gate: Send {
    fn decide(&self, trigger: BuildTrigger, changes: Option<&ChangeSet>) -> Result<WorkList>;
}

/// Default [`Gate`] over a project directory and a single mapping policy.
#[derive(Debug, Clone)]
pub struct ChangeGate {
    root: PathBuf,
    mapping: SourceMapping,
    exclude: ExcludeSet,
    fs: Arc<dyn FileSystem>,
}

impl ChangeGate {
    pub fn new(
        root: impl Into<PathBuf>,
        mapping: SourceMapping,
        exclude: ExcludeSet,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            root: root.into(),
            mapping,
            exclude,
            fs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mapping(&self) -> &SourceMapping {
        &self.mapping
    }

    /// Resolve the work list for the active mapping, regardless of changes.
    pub fn resolve_work_items(&self) -> Result<Vec<WorkItem>> {
        let items = match &self.mapping {
            SourceMapping::Discover { root_name } => {
                let source =
                    find_root_source(self.fs.as_ref(), &self.root, &self.exclude, root_name)?
                        .ok_or_else(|| LessgateError::NotFound {
                            root_name: root_name.clone(),
                            root: self.root.clone(),
                        })?;
                let destination = sibling_destination(&source);
                vec![WorkItem::new(source, destination)]
            }
            SourceMapping::List { sources, out_dir } => {
                mapping::list_work_items(sources, out_dir.as_deref())?
            }
            SourceMapping::Pair {
                source,
                destination,
            } => vec![mapping::pair_work_item(
                source.as_deref(),
                destination.as_deref(),
            )?],
        };

        debug!(
            mode = self.mapping.mode_name(),
            count = items.len(),
            "resolved work items"
        );
        Ok(items)
    }
}

impl Gate for ChangeGate {
    fn decide(&self, trigger: BuildTrigger, changes: Option<&ChangeSet>) -> Result<WorkList> {
        if !should_rebuild(trigger, changes) {
            return Ok(WorkList::new());
        }
        let items = self.resolve_work_items()?;
        info!(%trigger, count = items.len(), "rebuild scheduled");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::types::ChangeEvent;

    fn gate(fs: &MockFileSystem, mapping: SourceMapping) -> ChangeGate {
        ChangeGate::new(".", mapping, ExcludeSet::empty(), Arc::new(fs.clone()))
    }

    #[test]
    fn incremental_app_less_change_resolves_sibling_css() {
        let fs = MockFileSystem::new();
        fs.add_file("src/app.less", "body {}");
        let g = gate(
            &fs,
            SourceMapping::Discover {
                root_name: "app".to_string(),
            },
        );

        let changes: ChangeSet = vec![ChangeEvent::changed("src/app.less")].into();
        let work = g.decide(BuildTrigger::Incremental, Some(&changes)).unwrap();
        assert_eq!(work, vec![WorkItem::new("src/app.less", "src/app.css")]);
    }

    #[test]
    fn unrelated_change_skips_resolution_entirely() {
        // No app.less exists: resolving would fail, so an Ok(empty) proves
        // the gate never got that far.
        let fs = MockFileSystem::new();
        let g = gate(
            &fs,
            SourceMapping::Discover {
                root_name: "app".to_string(),
            },
        );
        let changes: ChangeSet = vec![ChangeEvent::changed("src/readme.md")].into();
        let work = g.decide(BuildTrigger::Incremental, Some(&changes)).unwrap();
        assert!(work.is_empty());
    }

    #[test]
    fn discovery_without_root_file_is_not_found() {
        let fs = MockFileSystem::new();
        fs.add_file("src/theme.less", "");
        let g = gate(
            &fs,
            SourceMapping::Discover {
                root_name: "app".to_string(),
            },
        );
        let err = g.decide(BuildTrigger::Full, None).unwrap_err();
        assert!(matches!(err, LessgateError::NotFound { root_name, .. } if root_name == "app"));
    }

    #[test]
    fn pair_without_destination_is_configuration_error() {
        let fs = MockFileSystem::new();
        let g = gate(
            &fs,
            SourceMapping::Pair {
                source: Some(PathBuf::from("a.less")),
                destination: None,
            },
        );
        assert!(matches!(
            g.decide(BuildTrigger::Full, None),
            Err(LessgateError::ConfigError(_))
        ));
    }
}
