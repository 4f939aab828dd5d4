//! End-to-end access flows over sketches and timelines.

use std::collections::BTreeSet;

use casefile_acl::{Access, AclConfig, DenialMode, Error, Permissions, Sketch, Timeline};
use casefile_core::ConfigManager;

use crate::common::{TestHarness, actor};

#[tokio::test]
async fn test_share_publish_unpublish_sketch() {
    let h = TestHarness::new();
    let sketch = Sketch::new(10, "alice", "Lateral movement");
    let alice = actor("alice");
    let bob = actor("bob");
    let carol = actor("carol");

    h.grant(&sketch, "bob", Permissions::read_only()).await;
    assert!(h.policy.can_read(&sketch, Some(&bob)).await.unwrap());
    assert!(!h.policy.can_read(&sketch, Some(&carol)).await.unwrap());

    h.policy.make_public(&sketch, &alice).await.unwrap();
    assert!(h.policy.can_read(&sketch, Some(&carol)).await.unwrap());
    assert!(h.policy.can_read(&sketch, None).await.unwrap());
    assert!(!h.policy.can_write(&sketch, Some(&carol)).await.unwrap());
    assert!(!h.policy.can_write(&sketch, Some(&bob)).await.unwrap());

    h.policy.make_private(&sketch, &alice).await.unwrap();
    assert!(!h.policy.can_read(&sketch, Some(&carol)).await.unwrap());
    assert!(h.policy.can_read(&sketch, Some(&bob)).await.unwrap());
}

#[tokio::test]
async fn test_sketch_and_timeline_with_same_id_are_independent() {
    let h = TestHarness::new();
    let sketch = Sketch::new(1, "alice", "Case");
    let timeline = Timeline::new(1, "alice", "Disk image", "4f1e2d");

    h.policy.make_public(&timeline, &actor("alice")).await.unwrap();

    assert!(h.policy.is_public(&timeline).await.unwrap());
    assert!(!h.policy.is_public(&sketch).await.unwrap());
}

#[tokio::test]
async fn test_collaborators_after_sharing() {
    let h = TestHarness::new();
    let sketch = Sketch::new(2, "alice", "Phishing wave");
    h.grant(&sketch, "bob", Permissions::read_only()).await;
    h.grant(&sketch, "carol", Permissions::read_write()).await;
    h.grant(&sketch, "alice", Permissions::all()).await;
    h.policy.make_public(&sketch, &actor("alice")).await.unwrap();

    let expected: BTreeSet<_> = [actor("bob"), actor("carol")].into_iter().collect();
    assert_eq!(h.policy.collaborators(&sketch).await.unwrap(), expected);
}

#[tokio::test]
async fn test_deleting_resource_cascades_entries() {
    let h = TestHarness::new();
    let sketch = Sketch::new(3, "alice", "Ransomware");
    h.grant(&sketch, "bob", Permissions::read_only()).await;
    h.policy.make_public(&sketch, &actor("alice")).await.unwrap();

    assert_eq!(h.policy.forget(&sketch).await.unwrap(), 2);

    // A new sketch reusing the id starts with a clean ACL
    let reused = Sketch::new(3, "dave", "Unrelated");
    assert!(!h.policy.is_public(&reused).await.unwrap());
    assert!(!h.policy.can_read(&reused, Some(&actor("bob"))).await.unwrap());
    assert!(h.policy.collaborators(&reused).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stranger_cannot_toggle_publication() {
    let h = TestHarness::new();
    let sketch = Sketch::new(4, "alice", "Exfil");
    let mallory = actor("mallory");

    let before = h.policy.is_public(&sketch).await.unwrap();
    let err = h.policy.make_public(&sketch, &mallory).await.unwrap_err();
    assert!(matches!(err, Error::PermissionDenied { .. }));
    assert_eq!(h.policy.is_public(&sketch).await.unwrap(), before);

    h.policy.make_public(&sketch, &actor("alice")).await.unwrap();
    assert!(h.policy.make_private(&sketch, &mallory).await.is_err());
    assert!(h.policy.is_public(&sketch).await.unwrap());
}

#[tokio::test]
async fn test_config_file_selects_silent_denials() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("acl.toml");
    std::fs::write(&path, "denials = \"silent\"\n").unwrap();
    let config = AclConfig::load_with(Some(path.to_str().unwrap()), |_| None).unwrap();
    assert_eq!(config.denials, DenialMode::Silent);

    let h = TestHarness::with_config(config);
    let sketch = Sketch::new(5, "alice", "Insider");
    h.policy.make_public(&sketch, &actor("mallory")).await.unwrap();
    assert!(!h.policy.is_public(&sketch).await.unwrap());
    assert_eq!(h.public_entry_count(&sketch).await, 0);
}

#[tokio::test]
async fn test_require_guards_operations() {
    let h = TestHarness::new();
    let timeline = Timeline::new(6, "alice", "Proxy logs", "9a8b7c");
    h.grant(&timeline, "bob", Permissions::read_only()).await;

    let bob = actor("bob");
    h.policy.require(&timeline, Some(&bob), Access::Read).await.unwrap();
    let err = h
        .policy
        .require(&timeline, Some(&bob), Access::Write)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "bob may not write timeline:6");
}
