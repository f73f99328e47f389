//! The async facade must agree with the blocking queries.

mod common;

use common::{setup_clone, setup_scenario_repo, setup_test_repo};
use futures::future::join_all;
use gitstate::{AsyncInspector, Inspector, InspectorConfig, RevCount};
use tempfile::TempDir;

#[tokio::test]
async fn test_async_check_scenario() {
    let temp_dir = TempDir::new().unwrap();
    setup_scenario_repo(temp_dir.path());
    let inspector = AsyncInspector::new(temp_dir.path());

    let report = inspector.check().await.unwrap();
    assert_eq!(report.branch.as_deref(), Some("main"));
    assert_eq!(report.remote_branch, None);
    assert_eq!(report.ahead, RevCount::Indeterminate);
    assert_eq!(report.behind, RevCount::Indeterminate);
    assert_eq!(report.dirty, 2);
    assert_eq!(report.untracked, 1);
    assert_eq!(report.stashes, 1);

    assert_eq!(report, Inspector::new(temp_dir.path()).check().unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_queries_match_blocking() {
    let origin = TempDir::new().unwrap();
    let clone = TempDir::new().unwrap();
    setup_clone(origin.path(), clone.path());

    let inspector = AsyncInspector::new(clone.path());
    let blocking = inspector.blocking();

    assert_eq!(inspector.branch().await.unwrap(), blocking.branch().unwrap());
    assert_eq!(
        inspector.remote_branch().await.unwrap(),
        blocking.remote_branch().unwrap()
    );
    assert_eq!(inspector.ahead().await.unwrap(), RevCount::Count(0));
    assert_eq!(inspector.behind().await.unwrap(), RevCount::Count(0));
    assert_eq!(inspector.commit().await.unwrap(), blocking.commit().unwrap());
    assert_eq!(inspector.message().await.unwrap(), "Initial commit");
    assert_eq!(inspector.stashes().await.unwrap(), 0);
    assert_eq!(inspector.dirty().await.unwrap(), 0);
    assert_eq!(inspector.untracked().await.unwrap(), 0);
}

#[tokio::test]
async fn test_concurrent_checks_on_many_repositories() {
    let dirs: Vec<TempDir> = (0..3).map(|_| TempDir::new().unwrap()).collect();
    for dir in &dirs {
        setup_scenario_repo(dir.path());
    }

    let inspectors: Vec<AsyncInspector> = dirs.iter().map(|d| AsyncInspector::new(d.path())).collect();
    let reports = join_all(inspectors.iter().map(|i| i.check())).await;

    for report in reports {
        let report = report.unwrap();
        assert_eq!(report.dirty, 2);
        assert_eq!(report.stashes, 1);
    }
}

#[tokio::test]
async fn test_async_errors_propagate() {
    let temp_dir = TempDir::new().unwrap();
    setup_test_repo(temp_dir.path());
    let inspector = AsyncInspector::with_config(
        temp_dir.path(),
        InspectorConfig::default().with_max_output_size(4),
    );

    assert!(inspector.branch().await.unwrap_err().is_output_too_large());
    assert!(inspector.check().await.unwrap_err().is_output_too_large());

    let not_a_repo = TempDir::new().unwrap();
    let inspector = AsyncInspector::new(not_a_repo.path());
    assert!(inspector.status().await.is_err());
    assert!(inspector.check().await.is_err());
}

#[test]
fn test_async_without_macro_runtime() {
    let temp_dir = TempDir::new().unwrap();
    setup_test_repo(temp_dir.path());
    let inspector = AsyncInspector::new(temp_dir.path());

    let message = tokio_test::block_on(inspector.message()).unwrap();
    assert_eq!(message, "Initial commit");
}
