//! # JSON File Backend
//!
//! Posts live under the data directory as one `<uuid>.json` per post plus a
//! lightweight `posts.json` index that keeps the dashboard order without
//! stat-ing every file.
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) for crash
//! safety. The index is rewritten on every mutation; a touched post moves
//! to the front, so the index carries the dashboard order directly.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::{Post, PostDraft, PostStore, StoreError};

/// Summary row in the index file — enough to order and label a post
/// without opening its file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PostMeta {
    id: String,
    title: String,
    created_at: i64,
    updated_at: i64,
}

impl PostMeta {
    fn of(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PostIndex {
    posts: Vec<PostMeta>,
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
pub(crate) fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub struct JsonStore {
    dir: PathBuf,
    generation: watch::Sender<u64>,
}

impl JsonStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let (generation, _) = watch::channel(0);
        Ok(Self { dir, generation })
    }

    fn post_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join("posts.json")
    }

    fn load_index(&self) -> Result<PostIndex, StoreError> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(PostIndex::default());
        }
        let json = fs::read_to_string(&path)?;
        serde_json::from_str(&json).map_err(|e| StoreError::Corrupt(format!("posts.json: {e}")))
    }

    /// Replace one entry (or drop it when `meta` is `None`) and write the
    /// index back. A touched post moves to the front, so the index itself
    /// carries the most-recently-touched-first order.
    fn rewrite_index(&self, id: &str, meta: Option<PostMeta>) -> Result<(), StoreError> {
        let mut index = self.load_index()?;
        index.posts.retain(|m| m.id != id);
        if let Some(meta) = meta {
            index.posts.insert(0, meta);
        }
        atomic_write_json(&self.index_path(), &index)?;
        Ok(())
    }

    fn load_post(&self, id: &str) -> Result<Option<Post>, StoreError> {
        let path = self.post_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(format!("{id}.json: {e}")))
    }

    fn bump(&self) {
        self.generation.send_modify(|g| *g += 1);
    }
}

#[async_trait::async_trait]
impl PostStore for JsonStore {
    fn name(&self) -> &str {
        "json"
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let post = Post::from_draft(draft);
        atomic_write_json(&self.post_path(&post.id), &post)?;
        self.rewrite_index(&post.id, Some(PostMeta::of(&post)))?;
        self.bump();
        Ok(post)
    }

    async fn update(&self, mut post: Post) -> Result<(), StoreError> {
        if !self.post_path(&post.id).exists() {
            return Err(StoreError::NotFound(post.id));
        }
        post.updated_at = chrono::Utc::now().timestamp();
        atomic_write_json(&self.post_path(&post.id), &post)?;
        self.rewrite_index(&post.id, Some(PostMeta::of(&post)))?;
        self.bump();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let path = self.post_path(id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        self.rewrite_index(id, None)?;
        self.bump();
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let index = self.load_index()?;
        let mut posts: Vec<Post> = Vec::with_capacity(index.posts.len());
        for meta in &index.posts {
            match self.load_post(&meta.id)? {
                Some(post) => posts.push(post),
                // Indexed but missing on disk — half-finished delete. Skip
                // rather than brick the dashboard.
                None => warn!("Post {} is in the index but has no file", meta.id),
            }
        }
        Ok(posts)
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        self.load_post(id)
    }

    fn watch(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, body: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        let created = store.create(draft("first", "hello **world**")).await.unwrap();
        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let ghost = Post::from_draft(draft("ghost", ""));
        let err = store.update(ghost).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        store.delete("never-existed").await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_post_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let post = store.create(draft("keep", "")).await.unwrap();
        fs::write(dir.path().join(format!("{}.json", post.id)), "{oops").unwrap();
        let err = store.get(&post.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_watch_bumps_on_every_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let rx = store.watch();
        assert_eq!(*rx.borrow(), 0);

        let post = store.create(draft("a", "")).await.unwrap();
        assert_eq!(*rx.borrow(), 1);

        store.update(post.clone()).await.unwrap();
        assert_eq!(*rx.borrow(), 2);

        store.delete(&post.id).await.unwrap();
        assert_eq!(*rx.borrow(), 3);
    }
}
