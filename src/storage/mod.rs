//! # Post Storage
//!
//! CRUD + change notification over the `Post` entity, behind the
//! [`PostStore`] trait so backends stay interchangeable. Two backends ship:
//!
//! - [`JsonStore`]: one JSON file per post plus an index, under the data dir
//! - [`MemoryStore`]: in-process only, for tests and throwaway runs
//!
//! The reactive query surface is `watch()` + `list()`/`get()`: every
//! committed mutation bumps a generation counter, and interested tasks
//! re-query when it moves. Storage calls are async and never block the UI;
//! a failed call surfaces as `Err(StoreError)` and is reported, not retried.

pub mod json;
pub mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// A journal entry. `body` is markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Input to `create`: a post that doesn't have an identity yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

impl PostDraft {
    /// Checked before persistence is attempted; a failing draft never
    /// reaches a backend.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        Ok(())
    }
}

impl Post {
    /// Mint a new post from a draft: fresh v4 id, both timestamps set to now.
    pub fn from_draft(draft: PostDraft) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            body: draft.body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Draft problems caught before any storage call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    TitleRequired,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TitleRequired => {
                write!(f, "Please enter a title before submitting.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors from a storage backend.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure underneath the backend.
    Io(std::io::Error),
    /// A post or index file exists but can't be decoded.
    Corrupt(String),
    /// The id isn't in the store (update only; delete is idempotent).
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {e}"),
            StoreError::Corrupt(msg) => write!(f, "corrupt storage: {msg}"),
            StoreError::NotFound(id) => write!(f, "no post with id {id}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// The persistence seam. Backends must be shareable across tokio tasks.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Backend name for the title bar and logs.
    fn name(&self) -> &str;

    /// Persist a draft, returning the stored post (id included).
    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError>;

    /// Overwrite an existing post. Refreshes `updated_at`.
    async fn update(&self, post: Post) -> Result<(), StoreError>;

    /// Remove a post. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// All posts, most recently touched first (create and update both
    /// move a post to the top).
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    /// A single post, or `None` if the id is unknown.
    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError>;

    /// Generation counter, bumped after every committed mutation. Pair with
    /// `list`/`get` for push-updated queries.
    fn watch(&self) -> watch::Receiver<u64>;
}
