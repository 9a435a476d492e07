//! # In-Memory Backend
//!
//! Backing store for `--backend memory` and for tests. Same contract as the
//! file backend, nothing survives the process.

use std::sync::RwLock;

use tokio::sync::watch;

use super::{Post, PostDraft, PostStore, StoreError};

pub struct MemoryStore {
    posts: RwLock<Vec<Post>>,
    generation: watch::Sender<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            posts: RwLock::new(Vec::new()),
            generation,
        }
    }

    fn bump(&self) {
        self.generation.send_modify(|g| *g += 1);
    }

    /// Lock helper — a poisoned lock means a writer panicked mid-mutation,
    /// which only tests can trigger; recover with the inner value.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Post>> {
        self.posts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Post>> {
        self.posts.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PostStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let post = Post::from_draft(draft);
        // Newest at the front, matching the file backend's index order.
        self.write().insert(0, post.clone());
        self.bump();
        Ok(post)
    }

    async fn update(&self, mut post: Post) -> Result<(), StoreError> {
        let mut posts = self.write();
        if !posts.iter().any(|p| p.id == post.id) {
            return Err(StoreError::NotFound(post.id));
        }
        post.updated_at = chrono::Utc::now().timestamp();
        posts.retain(|p| p.id != post.id);
        posts.insert(0, post);
        drop(posts);
        self.bump();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.write().retain(|p| p.id != id);
        self.bump();
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.read().clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.read().iter().find(|p| p.id == id).cloned())
    }

    fn watch(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}
