use std::path::PathBuf;

use proptest::prelude::*;

use lessgate::gate::mapping::list_work_items;
use lessgate::gate::{out_dir_destination, should_rebuild, sibling_destination};
use lessgate::types::{BuildTrigger, ChangeEvent, ChangeKind, ChangeSet};

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}"
}

fn non_less_ext() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("css".to_string()),
        Just("md".to_string()),
        Just("js".to_string()),
        Just("lessx".to_string()),
        Just("LESS".to_string()),
    ]
}

fn kind() -> impl Strategy<Value = ChangeKind> {
    prop_oneof![
        Just(ChangeKind::Added),
        Just(ChangeKind::Changed),
        Just(ChangeKind::Removed),
    ]
}

fn path_with_ext(ext: impl Strategy<Value = String>) -> impl Strategy<Value = PathBuf> {
    (proptest::collection::vec(segment(), 0..4), segment(), ext).prop_map(|(dirs, stem, ext)| {
        let mut p: PathBuf = dirs.into_iter().collect();
        p.push(format!("{stem}.{ext}"));
        p
    })
}

fn unrelated_events() -> impl Strategy<Value = Vec<ChangeEvent>> {
    proptest::collection::vec(
        (path_with_ext(non_less_ext()), kind()).prop_map(|(p, k)| ChangeEvent::new(p, k)),
        0..8,
    )
}

proptest! {
    #[test]
    fn any_stylesheet_event_triggers_rebuild(
        before in unrelated_events(),
        after in unrelated_events(),
        source in path_with_ext(Just("less".to_string())),
        k in kind(),
    ) {
        let mut events = before;
        events.push(ChangeEvent::new(source, k));
        events.extend(after);
        let set: ChangeSet = events.into();

        prop_assert!(should_rebuild(BuildTrigger::Incremental, Some(&set)));
        prop_assert!(should_rebuild(BuildTrigger::Auto, Some(&set)));
    }

    #[test]
    fn no_stylesheet_event_means_no_rebuild(events in unrelated_events()) {
        let set: ChangeSet = events.into();
        prop_assert!(!should_rebuild(BuildTrigger::Incremental, Some(&set)));
        prop_assert!(!should_rebuild(BuildTrigger::Auto, Some(&set)));
        prop_assert!(should_rebuild(BuildTrigger::Full, Some(&set)));
    }

    #[test]
    fn order_does_not_change_decision(events in unrelated_events(), extra in path_with_ext(Just("less".to_string()))) {
        let mut events = events;
        events.push(ChangeEvent::changed(extra));
        let forward: ChangeSet = events.iter().cloned().collect();
        let backward: ChangeSet = events.into_iter().rev().collect();
        prop_assert_eq!(
            should_rebuild(BuildTrigger::Incremental, Some(&forward)),
            should_rebuild(BuildTrigger::Incremental, Some(&backward))
        );
    }

    #[test]
    fn extension_replacement_is_idempotent(source in path_with_ext(Just("less".to_string()))) {
        let once = sibling_destination(&source);
        prop_assert_eq!(sibling_destination(&once), once.clone());
        prop_assert_eq!(once.parent(), source.parent());
        prop_assert_eq!(once.extension().and_then(|e| e.to_str()), Some("css"));
    }

    #[test]
    fn out_dir_basename_ignores_source_depth(
        source in path_with_ext(Just("less".to_string())),
        out in segment(),
    ) {
        let dest = out_dir_destination(&source, &PathBuf::from(&out)).unwrap();
        let out_path = PathBuf::from(&out);
        prop_assert_eq!(dest.parent(), Some(out_path.as_path()));
        prop_assert_eq!(dest.file_stem(), source.file_stem());

        let items = list_work_items(std::slice::from_ref(&source), Some(PathBuf::from(&out).as_path())).unwrap();
        prop_assert_eq!(&items[0].destination, &dest);
        prop_assert_eq!(&items[0].source, &source);
    }
}
