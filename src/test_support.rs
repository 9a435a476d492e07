//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::core::focus::FocusStore;
use crate::core::state::App;
use crate::storage::{MemoryStore, Post};

/// Creates a test App backed by an in-memory store and in-memory focus.
pub fn test_app() -> App {
    App::new(Arc::new(MemoryStore::new()), FocusStore::in_memory())
}

/// A post with fixed timestamps so assertions stay deterministic.
pub fn test_post(id: &str, title: &str) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        body: format!("body of {}", title),
        created_at: 1_700_000_000,
        updated_at: 1_700_000_000,
    }
}
