mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::tempdir;
use tokio::sync::mpsc;
use tokio::time::timeout;

use lessgate::engine::RuntimeEvent;
use lessgate::types::BuildTrigger;
use lessgate::watch::{spawn_watcher, ExcludeSet};

type TestResult = Result<(), Box<dyn Error>>;

const DEBOUNCE: Duration = Duration::from_millis(400);

#[tokio::test]
async fn saves_within_window_arrive_as_one_change_set() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("styles"))?;

    let (tx, mut rx) = mpsc::channel(8);
    let _watcher = spawn_watcher(dir.path(), ExcludeSet::empty(), DEBOUNCE, tx)?;

    fs::write(dir.path().join("styles/app.less"), "@import 'vars';")?;
    fs::write(dir.path().join("styles/vars.less"), "@c: red;")?;

    let event = timeout(Duration::from_secs(5), rx.recv())
        .await?
        .ok_or("watcher channel closed")?;
    let request = match event {
        RuntimeEvent::BuildRequested(request) => request,
        other => panic!("Expected BuildRequested, got: {:?}", other),
    };
    assert_eq!(request.trigger, BuildTrigger::Auto);

    let changes = request.changes.ok_or("auto build without a change-set")?;
    let paths: Vec<PathBuf> = changes.iter().map(|c| c.path.clone()).collect();
    assert!(paths.contains(&PathBuf::from("styles/app.less")), "{paths:?}");
    assert!(paths.contains(&PathBuf::from("styles/vars.less")), "{paths:?}");

    // Both saves were folded into the batch above.
    assert!(timeout(DEBOUNCE * 3, rx.recv()).await.is_err());
    Ok(())
}

#[tokio::test]
async fn batch_of_only_excluded_paths_is_dropped() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("node_modules/widget"))?;

    let exclude = ExcludeSet::new(&["node_modules/**".to_string()])?;
    let (tx, mut rx) = mpsc::channel(8);
    let _watcher = spawn_watcher(dir.path(), exclude, DEBOUNCE, tx)?;

    fs::write(dir.path().join("node_modules/widget/theme.less"), "")?;

    assert!(timeout(DEBOUNCE * 4, rx.recv()).await.is_err());
    Ok(())
}
