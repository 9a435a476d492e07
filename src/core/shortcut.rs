//! # Shortcut State Machine
//!
//! Single source of truth for "which UI surface is active". Every keyboard
//! shortcut and every overlay is gated on this machine, so modality lives in
//! exactly one place.
//!
//! ```text
//! (UiState, Context) + ShortcutEvent  →  transition()  →  (UiState, Context)
//! ```
//!
//! `transition` is a pure function; the [`ShortcutMachine`] handle owns the
//! current state, dispatches synchronously, and exposes a watch channel so
//! the render side can wake up on changes. Events with no declared
//! transition for the current state are accepted and ignored — the UI sends
//! intents freely and the machine decides what they mean right now.

use tokio::sync::watch;

/// Exclusive UI surfaces. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    /// Before the first page has been selected.
    PageLoad,
    /// The post list.
    Dashboard,
    /// A single post, rendered.
    PostPage,
    /// Title/body editor is focused.
    Editing,
    /// Help drawer overlays the current page.
    HelpDrawerOpen,
    /// New-entry dialog overlays the dashboard.
    NewEntryDialogOpen,
}

/// The page underneath a transient overlay (drawer, editor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    PostPage,
}

/// Remembers which page was active before entering an overlay state, so
/// closing the overlay returns to the right place. Never returns to `None`
/// once a page has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Context {
    pub page: Option<Page>,
}

/// User intents. Events carry no payload — anything that needs data (which
/// post, which draft) travels through [`crate::core::action`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutEvent {
    AddNewEntry,
    ShowAvailableShortcuts,
    /// In the vocabulary but with no transition anywhere: deleting is gated
    /// by a confirmation overlay, not by modality.
    DeletePost,
    EditingPost,
    EditedPost,
    LoadDashboardPage,
    LoadPostPage,
    CloseHelpDrawer,
    ClosePost,
    CloseNewEntryDialog,
}

/// The full transition table. Pairs not matched fall through to the final
/// arm and leave both state and context untouched. Guarded targets check
/// `ctx.page` in declared order; if no guard matches, the state stays put.
pub fn transition(state: UiState, ctx: Context, event: ShortcutEvent) -> (UiState, Context) {
    use ShortcutEvent::*;
    use UiState::*;

    match (state, event) {
        (PageLoad, LoadDashboardPage) => (Dashboard, Context { page: Some(Page::Dashboard) }),
        (PageLoad, LoadPostPage) => (PostPage, Context { page: Some(Page::PostPage) }),

        (Dashboard, AddNewEntry) => (NewEntryDialogOpen, ctx),
        (Dashboard, ShowAvailableShortcuts) => {
            (HelpDrawerOpen, Context { page: Some(Page::Dashboard) })
        }
        (Dashboard, LoadPostPage) => (PostPage, ctx),
        (Dashboard, EditingPost) => (Editing, ctx),

        (PostPage, ShowAvailableShortcuts) => {
            (HelpDrawerOpen, Context { page: Some(Page::PostPage) })
        }
        (PostPage, ClosePost) => (Dashboard, ctx),
        (PostPage, EditingPost) => (Editing, Context { page: Some(Page::PostPage) }),

        (HelpDrawerOpen, CloseHelpDrawer) => match ctx.page {
            Some(Page::Dashboard) => (Dashboard, ctx),
            Some(Page::PostPage) => (PostPage, ctx),
            None => (state, ctx),
        },

        (NewEntryDialogOpen, CloseNewEntryDialog) => (Dashboard, ctx),

        (Editing, EditedPost) => match ctx.page {
            Some(Page::PostPage) => (PostPage, ctx),
            Some(Page::Dashboard) => (Dashboard, ctx),
            None => (state, ctx),
        },

        _ => (state, ctx),
    }
}

/// Owns the machine state and pushes changes to observers.
///
/// Dispatch is synchronous: `send` returns the resulting state before any
/// observer runs, so callers can branch on the outcome immediately.
pub struct ShortcutMachine {
    state: UiState,
    context: Context,
    tx: watch::Sender<UiState>,
}

impl ShortcutMachine {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(UiState::PageLoad);
        Self {
            state: UiState::PageLoad,
            context: Context::default(),
            tx,
        }
    }

    /// Dispatch an event. No-op events resolve to the current state and do
    /// not wake observers.
    pub fn send(&mut self, event: ShortcutEvent) -> UiState {
        let (next, ctx) = transition(self.state, self.context, event);
        self.state = next;
        self.context = ctx;
        self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        next
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn context(&self) -> Context {
        self.context
    }

    /// Derived selector: is `state` the active surface right now?
    pub fn matches(&self, state: UiState) -> bool {
        self.state == state
    }

    /// Subscribe to state changes. The receiver holds the latest state;
    /// `changed()` resolves after every real transition.
    pub fn observe(&self) -> watch::Receiver<UiState> {
        self.tx.subscribe()
    }
}

impl Default for ShortcutMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of the help drawer.
pub struct Shortcut {
    pub label: &'static str,
    pub description: &'static str,
    pub key: &'static str,
}

/// Everything the help drawer lists, in display order.
pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        label: "Help",
        description: "Shows all available shortcuts",
        key: "?",
    },
    Shortcut {
        label: "Add new entry",
        description: "Add a new entry to your journal",
        key: "c",
    },
    Shortcut {
        label: "Navigate",
        description: "Move focus down / up the list",
        key: "j / k",
    },
    Shortcut {
        label: "Open post",
        description: "Open the focused post",
        key: "Enter",
    },
    Shortcut {
        label: "Edit post",
        description: "Edit the current post in place",
        key: "e",
    },
    Shortcut {
        label: "Save edit",
        description: "Save and leave editing mode",
        key: "Ctrl+S",
    },
    Shortcut {
        label: "Delete post",
        description: "Delete a post permanently",
        key: "Delete",
    },
    Shortcut {
        label: "Back",
        description: "Close the current overlay or post",
        key: "Esc",
    },
    Shortcut {
        label: "Quit",
        description: "Exit quill",
        key: "q",
    },
];
