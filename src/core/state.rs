//! # Application State
//!
//! Core business state for quill. No TUI types here — presentation state
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: Arc<dyn PostStore>   // persistence backend
//! ├── machine: ShortcutMachine    // which surface is active
//! ├── focus: FocusStore           // keyboard focus over the post list
//! ├── posts: Vec<Post>            // latest list() snapshot
//! ├── active_post: Option<Post>   // the post shown on the post page
//! └── notice: Option<Notice>      // current toast, last write wins
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs,
//! plus direct `machine.send` for pure modality intents. This keeps things
//! predictable, so no surprise mutations.

use std::sync::Arc;

use crate::core::focus::FocusStore;
use crate::core::notify::Notice;
use crate::core::shortcut::ShortcutMachine;
use crate::storage::{Post, PostStore};

pub struct App {
    pub store: Arc<dyn PostStore>,
    pub machine: ShortcutMachine,
    pub focus: FocusStore,
    /// Latest full snapshot from the store, most recently updated first.
    pub posts: Vec<Post>,
    /// The post shown on the post page. Refreshed by the store watcher.
    pub active_post: Option<Post>,
    pub notice: Option<Notice>,
    /// Bumped on every notice so the toast can restart its expiry timer.
    pub notice_seq: u64,
}

impl App {
    pub fn new(store: Arc<dyn PostStore>, focus: FocusStore) -> Self {
        Self {
            store,
            machine: ShortcutMachine::new(),
            focus,
            posts: Vec::new(),
            active_post: None,
            notice: None,
            notice_seq: 0,
        }
    }

    /// Replace whatever notice is showing.
    pub fn push_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.notice_seq += 1;
    }

    /// The full post under focus, from the current snapshot.
    pub fn focused_post(&self) -> Option<&Post> {
        let id = self.focus.focused_id()?;
        self.posts.iter().find(|p| p.id == id)
    }
}
