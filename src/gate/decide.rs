// src/gate/decide.rs

use tracing::debug;

use crate::types::{BuildTrigger, ChangeSet};

/// Decide whether a build cycle has anything to do.
///
/// - `Full` always rebuilds.
/// - A change-driven trigger with no change-set has no baseline to compare
///   against (first build), so it rebuilds.
/// - Otherwise rebuild iff some event touches a stylesheet source. An empty
///   change-set therefore never rebuilds.
pub fn should_rebuild(trigger: BuildTrigger, changes: Option<&ChangeSet>) -> bool {
    if !trigger.is_change_driven() {
        return true;
    }

    let Some(changes) = changes else {
        debug!(%trigger, "no change-set (first build); rebuilding");
        return true;
    };

    match changes.first_stylesheet_change() {
        Some(event) => {
            debug!(%trigger, path = ?event.path, "stylesheet change detected");
            true
        }
        None => {
            debug!(%trigger, events = changes.len(), "no stylesheet changes; skipping");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChangeEvent, ChangeKind};

    #[test]
    fn full_ignores_changes() {
        assert!(should_rebuild(BuildTrigger::Full, None));
        assert!(should_rebuild(BuildTrigger::Full, Some(&ChangeSet::new())));
        let docs: ChangeSet = vec![ChangeEvent::changed("docs/index.md")].into();
        assert!(should_rebuild(BuildTrigger::Full, Some(&docs)));
    }

    #[test]
    fn first_build_rebuilds_for_change_driven_triggers() {
        assert!(should_rebuild(BuildTrigger::Auto, None));
        assert!(should_rebuild(BuildTrigger::Incremental, None));
    }

    #[test]
    fn empty_change_set_does_not_rebuild() {
        assert!(!should_rebuild(BuildTrigger::Auto, Some(&ChangeSet::new())));
        assert!(!should_rebuild(BuildTrigger::Incremental, Some(&ChangeSet::new())));
    }

    #[test]
    fn removed_stylesheet_still_counts() {
        let set: ChangeSet = vec![ChangeEvent::new("src/old.less", ChangeKind::Removed)].into();
        assert!(should_rebuild(BuildTrigger::Auto, Some(&set)));
    }
}
