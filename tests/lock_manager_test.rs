//! Integration tests for the file-based lock manager under concurrent workers

#![allow(clippy::all, clippy::unwrap_used, clippy::expect_used)]
//!
//! Every worker gets its own `LockManager` over a shared temp directory, the
//! way separate test processes share the stand's lock directory.

use niffler_e2e::{HarnessError, LockError, LockManager, LockSettings, LockSpec};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Barrier;

fn worker(dir: &TempDir) -> LockManager {
    LockManager::new(LockSettings {
        dir: dir.path().to_path_buf(),
        poll_interval: Duration::from_millis(5),
        timeout: Some(Duration::from_secs(10)),
    })
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_exclusive_lock_admits_one_worker_at_a_time() {
    let dir = TempDir::new().unwrap();
    let inside = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let manager = worker(&dir);
            let inside = inside.clone();
            let peak = peak.clone();
            tokio::spawn(async move {
                let spec = LockSpec::exclusive("delete_spendings");
                for _ in 0..3 {
                    let guard = manager.acquire(&spec).await.unwrap();
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    inside.fetch_sub(1, Ordering::SeqCst);
                    guard.release().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(peak.load(Ordering::SeqCst), 1);
    assert!(!dir.path().join("delete_spendings.lock").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_cleanup_lock_sets_up_once_and_tears_down_once() {
    let dir = TempDir::new().unwrap();
    let workers = 5;
    let setups = Arc::new(AtomicUsize::new(0));
    let teardowns = Arc::new(AtomicUsize::new(0));
    let joined = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|i| {
            let manager = worker(&dir);
            let setups = setups.clone();
            let teardowns = teardowns.clone();
            let joined = joined.clone();
            tokio::spawn(async move {
                let spec = LockSpec::exclusive("cleanup").with_data().shared();
                let guard = manager
                    .acquire_with(&spec, || async move {
                        setups.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok::<_, HarnessError>(format!("cleaned by worker {}", i))
                    })
                    .await
                    .unwrap();

                let data = guard.data().cloned().unwrap();
                let owner = guard.is_owner();

                // Nobody leaves before everyone has joined the same generation
                joined.wait().await;

                guard
                    .release_with(|marker: String| async move {
                        assert!(marker.starts_with("cleaned by worker"));
                        teardowns.fetch_add(1, Ordering::SeqCst);
                        Ok::<(), HarnessError>(())
                    })
                    .await
                    .unwrap();

                (data, owner)
            })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    assert_eq!(setups.load(Ordering::SeqCst), 1);
    assert_eq!(teardowns.load(Ordering::SeqCst), 1);
    assert_eq!(results.iter().filter(|(_, owner)| *owner).count(), 1);

    let first = &results[0].0;
    assert!(results.iter().all(|(data, _)| data == first));

    let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "lock files left behind: {:?}", leftovers);
}

#[tokio::test]
async fn test_failed_setup_frees_the_lock_for_the_next_worker() {
    let dir = TempDir::new().unwrap();
    let first = worker(&dir);
    let second = worker(&dir);
    let spec = LockSpec::exclusive("cleanup").with_data().shared();

    let err = first
        .acquire_with(&spec, || async {
            Err::<String, _>(HarnessError::Config("stand unreachable".to_string()))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::Config(_)));
    assert!(!dir.path().join("cleanup.lock").exists());

    let guard = second
        .acquire_with(&spec, || async { Ok::<_, HarnessError>("ok".to_string()) })
        .await
        .unwrap();
    assert!(guard.is_owner());
    guard.release().unwrap();
}

#[tokio::test]
async fn test_stale_lock_blocks_until_cleared() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("profile_name.lock"), "locked_by_crashed_worker").unwrap();

    let impatient = LockManager::new(LockSettings {
        dir: dir.path().to_path_buf(),
        poll_interval: Duration::from_millis(5),
        timeout: Some(Duration::from_millis(40)),
    })
    .unwrap();
    let spec = LockSpec::exclusive("profile_name");

    let err = impatient.acquire(&spec).await.unwrap_err();
    assert!(matches!(err, LockError::Timeout { .. }));

    let locks = impatient.list().unwrap();
    assert_eq!(locks.len(), 1);
    assert_eq!(locks[0].holder, "locked_by_crashed_worker");

    assert!(impatient.clear("profile_name"));
    let guard = impatient.acquire(&spec).await.unwrap();
    assert!(guard.is_owner());
    guard.release().unwrap();
}

#[tokio::test]
async fn test_list_reports_shared_holders() {
    let dir = TempDir::new().unwrap();
    let manager = worker(&dir);
    let spec = LockSpec::exclusive("cleanup").with_data().shared();

    let owner = manager
        .acquire_with(&spec, || async { Ok::<_, LockError>(42u32) })
        .await
        .unwrap();
    let joiner = manager
        .acquire_with(&spec, || async { Ok::<_, LockError>(0u32) })
        .await
        .unwrap();
    assert_eq!(joiner.data(), Some(&42));

    let locks = manager.list().unwrap();
    assert_eq!(locks.len(), 1);
    assert_eq!(locks[0].name, "cleanup");
    assert!(locks[0].has_data);
    assert_eq!(locks[0].count, Some(2));

    joiner.release().unwrap();
    owner.release().unwrap();
    assert!(manager.list().unwrap().is_empty());
}
