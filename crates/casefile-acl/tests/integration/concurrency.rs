//! Concurrent publication requests against one store.

use std::sync::Arc;

use casefile_acl::{AclStore, Error, Permissions, Protectable, Sketch};
use tokio::task::JoinSet;

use crate::common::{TestHarness, actor};

const TASKS: usize = 32;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_make_public_creates_one_entry() {
    let h = TestHarness::new();
    let sketch = Arc::new(Sketch::new(1, "alice", "Race"));

    let mut tasks = JoinSet::new();
    for _ in 0..TASKS {
        let policy = h.policy.clone();
        let sketch = Arc::clone(&sketch);
        tasks.spawn(async move { policy.make_public(&*sketch, &actor("alice")).await });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert!(h.policy.is_public(&*sketch).await.unwrap());
    assert_eq!(h.public_entry_count(&*sketch).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_publish_and_unpublish_never_duplicates() {
    let h = TestHarness::new();
    let sketch = Arc::new(Sketch::new(2, "alice", "Flip-flop"));

    let mut tasks = JoinSet::new();
    for i in 0..TASKS {
        let policy = h.policy.clone();
        let sketch = Arc::clone(&sketch);
        tasks.spawn(async move {
            let alice = actor("alice");
            if i % 2 == 0 {
                policy.make_public(&*sketch, &alice).await
            } else {
                policy.make_private(&*sketch, &alice).await
            }
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert!(h.public_entry_count(&*sketch).await <= 1);
    // Lookups still resolve to a single entry
    h.policy.is_public(&*sketch).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_create_same_key_has_one_winner() {
    let h = TestHarness::new();
    let key = Sketch::new(3, "alice", "Grant race").resource_key();

    let mut tasks = JoinSet::new();
    for _ in 0..TASKS {
        let store = Arc::clone(&h.store);
        let key = key.clone();
        tasks.spawn(async move {
            store
                .create(&key, Some(&actor("bob")), Permissions::read_only())
                .await
        });
    }

    let mut created = 0;
    let mut duplicates = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => created += 1,
            Err(Error::DuplicateEntry { .. }) => duplicates += 1,
            Err(e) => unreachable!("unexpected error: {e}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(duplicates, TASKS - 1);
    assert_eq!(h.store.list(&key).await.unwrap().len(), 1);
}
