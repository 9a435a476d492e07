use quill::storage::{JsonStore, MemoryStore, Post, PostDraft, PostStore, StoreError};
use tempfile::TempDir;
use tokio_test::assert_ok;

// ============================================================================
// Helper Functions
// ============================================================================

fn draft(title: &str, body: &str) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        body: body.to_string(),
    }
}

/// Opens a JsonStore rooted in a fresh temp dir; the dir handle keeps the
/// files alive for the duration of the test.
fn json_store() -> (TempDir, JsonStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonStore::open(dir.path().join("posts")).expect("open store");
    (dir, store)
}

// ============================================================================
// JsonStore Tests
// ============================================================================

#[tokio::test]
async fn test_json_full_crud_cycle() {
    let (_dir, store) = json_store();

    let created = store.create(draft("first entry", "hello")).await.unwrap();
    assert!(!created.id.is_empty());

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);

    let mut edited = created.clone();
    edited.body = "hello, edited".to_string();
    store.update(edited).await.unwrap();

    let fetched = store.get(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.body, "hello, edited");
    assert!(fetched.updated_at >= created.updated_at);

    store.delete(&created.id).await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
    assert_eq!(store.get(&created.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_json_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let posts_dir = dir.path().join("posts");

    let created = {
        let store = JsonStore::open(&posts_dir).unwrap();
        store.create(draft("durable", "still here")).await.unwrap()
    };

    let reopened = JsonStore::open(&posts_dir).unwrap();
    let listed = reopened.list().await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn test_json_lists_most_recently_touched_first() {
    let (_dir, store) = json_store();

    let a = store.create(draft("a", "")).await.unwrap();
    let b = store.create(draft("b", "")).await.unwrap();

    // Fresh creates land on top.
    let listed = store.list().await.unwrap();
    assert_eq!(listed[0].id, b.id);
    assert_eq!(listed[1].id, a.id);

    // Touching `a` moves it back to the top.
    let mut a_edit = a.clone();
    a_edit.body = "touched".to_string();
    store.update(a_edit).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed[0].id, a.id);
    assert_eq!(listed[1].id, b.id);
}

#[tokio::test]
async fn test_json_update_missing_post_errors() {
    let (_dir, store) = json_store();
    let ghost = Post {
        id: "missing".to_string(),
        title: "ghost".to_string(),
        body: String::new(),
        created_at: 0,
        updated_at: 0,
    };
    assert!(matches!(
        store.update(ghost).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_json_watch_notifies_on_change() {
    let (_dir, store) = json_store();
    let mut rx = store.watch();
    let baseline = *rx.borrow_and_update();

    store.create(draft("ping", "")).await.unwrap();

    // The generation moved and the receiver saw it.
    assert!(rx.has_changed().unwrap());
    assert!(*rx.borrow_and_update() > baseline);
}

#[tokio::test]
async fn test_json_watcher_can_await_changes() {
    let (_dir, store) = json_store();
    let store = std::sync::Arc::new(store);
    let mut rx = store.watch();

    let writer = {
        let store = store.clone();
        tokio::spawn(async move { store.create(draft("from a task", "")).await })
    };

    // The watcher wakes without polling once the create commits.
    tokio::time::timeout(std::time::Duration::from_secs(1), rx.changed())
        .await
        .expect("watch should fire")
        .expect("sender alive");

    writer.await.unwrap().unwrap();
    assert_eq!(store.list().await.unwrap().len(), 1);
}

// ============================================================================
// Backend Interchangeability Tests
// ============================================================================

/// Both backends must behave identically through the trait object.
async fn exercise_store(store: &dyn PostStore) {
    let created = store.create(draft("shared", "body")).await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 1);

    let fetched = store.get(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "shared");

    store.delete(&created.id).await.unwrap();
    assert!(store.list().await.unwrap().is_empty());

    // Deleting again is fine.
    store.delete(&created.id).await.unwrap();
}

#[tokio::test]
async fn test_backends_share_contract() {
    let (_dir, json) = json_store();
    exercise_store(&json).await;

    let memory = MemoryStore::new();
    exercise_store(&memory).await;
}

#[tokio::test]
async fn test_create_rejects_nothing_at_store_level() {
    // Title validation is the caller's job (before the effect is spawned);
    // the store itself accepts any draft.
    let (_dir, store) = json_store();
    assert_ok!(store.create(draft("", "no title")).await);
}
