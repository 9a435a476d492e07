//! # Actions
//!
//! Everything that touches data becomes an `Action`. User saves the
//! new-entry dialog? That's `Action::SubmitNewEntry(draft)`. A background
//! create lands? That's `Action::CreateFinished(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an [`Effect`] telling the event loop which
//! storage task to spawn. No I/O happens in here.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```
//!
//! Pure modality intents (open help, close post, ...) don't come through
//! here at all — the event loop dispatches them straight into the shortcut
//! machine. Persistence never blocks a transition, and a failed storage
//! call never rolls one back; it just becomes an error notice.
//!
//! One deliberate exception: the new-entry dialog defers its close until
//! the create succeeds, so a failed create leaves the draft on screen
//! instead of eating it. `test_submit_new_entry_defers_close` pins this.

use crate::core::notify::Notice;
use crate::core::shortcut::{ShortcutEvent, UiState};
use crate::core::state::App;
use crate::storage::{Post, PostDraft, ValidationError};

/// Data-bearing events, from the UI and from finished storage tasks.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Save pressed in the new-entry dialog.
    SubmitNewEntry(PostDraft),
    /// Save pressed in the editor (post already carries the edits).
    SubmitEdit(Post),
    /// Leave the editor without saving.
    CancelEdit,
    /// Enter on the dashboard: open whichever post is focused.
    OpenFocusedPost,
    /// The delete overlay was confirmed.
    ConfirmedDelete(String),

    /// The store watcher re-listed after a change.
    PostsChanged(Vec<Post>),
    /// A `get` for the post page finished.
    PostFetched(Option<Post>),
    /// A background create finished.
    CreateFinished(Result<Post, String>),
    /// A background update finished; `title` labels the notice.
    UpdateFinished { title: String, error: Option<String> },
    /// A background delete finished; `title` labels the notice.
    DeleteFinished { title: String, error: Option<String> },

    Quit,
}

/// Side effects for the event loop to execute after `update` returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    CreatePost(PostDraft),
    UpdatePost(Post),
    DeletePost(String),
    FetchPost(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitNewEntry(draft) => match draft.validate() {
            // Invalid drafts never reach the store; the dialog stays open.
            Err(ValidationError::TitleRequired) => {
                app.push_notice(Notice::info(
                    "Title required",
                    ValidationError::TitleRequired.to_string(),
                ));
                Effect::None
            }
            // Deferred close: the dialog stays up until CreateFinished(Ok).
            Ok(()) => Effect::CreatePost(draft),
        },

        Action::CreateFinished(Ok(post)) => {
            app.machine.send(ShortcutEvent::CloseNewEntryDialog);
            app.push_notice(Notice::success(
                "Post created",
                format!("\"{}\" has been successfully created", post.title),
            ));
            Effect::None
        }
        Action::CreateFinished(Err(e)) => {
            app.push_notice(Notice::error("Create failed", e));
            Effect::None
        }

        Action::SubmitEdit(post) => {
            // Leave editing immediately; the write happens behind us.
            app.machine.send(ShortcutEvent::EditedPost);
            app.active_post = Some(post.clone());
            Effect::UpdatePost(post)
        }
        Action::CancelEdit => {
            app.machine.send(ShortcutEvent::EditedPost);
            Effect::None
        }

        Action::UpdateFinished { title, error: None } => {
            app.push_notice(Notice::success(
                "Post updated",
                format!("\"{}\" has been saved", title),
            ));
            Effect::None
        }
        Action::UpdateFinished {
            error: Some(e), ..
        } => {
            // No rollback: the machine already moved on.
            app.push_notice(Notice::error("Update failed", e));
            Effect::None
        }

        Action::OpenFocusedPost => {
            let Some(id) = app.focus.focused_id().map(str::to_string) else {
                return Effect::None;
            };
            app.machine.send(ShortcutEvent::LoadPostPage);
            // Show the cached copy right away; the fetch keeps it fresh.
            app.active_post = app.posts.iter().find(|p| p.id == id).cloned();
            Effect::FetchPost(id)
        }

        Action::ConfirmedDelete(id) => {
            app.focus.decrement_focus_index();
            Effect::DeletePost(id)
        }
        Action::DeleteFinished { title, error: None } => {
            app.push_notice(Notice::success(
                "Post deleted",
                format!("\"{}\" is gone", title),
            ));
            Effect::None
        }
        Action::DeleteFinished {
            error: Some(e), ..
        } => {
            app.push_notice(Notice::error("Delete failed", e));
            Effect::None
        }

        Action::PostsChanged(posts) => {
            let ids: Vec<String> = posts.iter().map(|p| p.id.clone()).collect();
            app.posts = posts;
            // Wholesale replacement; the focus index is left as-is even if
            // it now points past the end.
            app.focus.set_post_ids(ids);
            // Keep the post page in sync with edits landing from the store.
            let active_id = app.active_post.as_ref().map(|p| p.id.clone());
            if let Some(id) = active_id {
                app.active_post = app.posts.iter().find(|p| p.id == id).cloned();
            }
            Effect::None
        }

        Action::PostFetched(post) => {
            match post {
                Some(post) => app.active_post = Some(post),
                None => {
                    // The post vanished under us; fall back to the dashboard.
                    app.active_post = None;
                    if app.machine.matches(UiState::PostPage) {
                        app.machine.send(ShortcutEvent::ClosePost);
                    }
                }
            }
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::Severity;
    use crate::core::shortcut::ShortcutEvent::*;
    use crate::core::shortcut::UiState::*;
    use crate::storage::Post;
    use crate::test_support::{test_app, test_post};

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            body: "body".to_string(),
        }
    }

    fn app_in_dialog() -> App {
        let mut app = test_app();
        app.machine.send(LoadDashboardPage);
        app.machine.send(AddNewEntry);
        app
    }

    #[test]
    fn test_submit_empty_title_keeps_dialog_open() {
        let mut app = app_in_dialog();
        let effect = update(&mut app, Action::SubmitNewEntry(draft("")));

        assert_eq!(effect, Effect::None);
        assert!(app.machine.matches(NewEntryDialogOpen));
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.severity, Severity::Info);
        assert_eq!(notice.title, "Title required");
    }

    #[test]
    fn test_submit_new_entry_defers_close() {
        // The chosen ordering: the dialog only closes once the create has
        // actually succeeded.
        let mut app = app_in_dialog();

        let effect = update(&mut app, Action::SubmitNewEntry(draft("hello")));
        assert_eq!(effect, Effect::CreatePost(draft("hello")));
        assert!(app.machine.matches(NewEntryDialogOpen));

        let created = test_post("id-1", "hello");
        update(&mut app, Action::CreateFinished(Ok(created)));
        assert!(app.machine.matches(Dashboard));
        assert_eq!(app.notice.as_ref().unwrap().severity, Severity::Success);
    }

    #[test]
    fn test_failed_create_keeps_dialog_open() {
        let mut app = app_in_dialog();
        update(&mut app, Action::SubmitNewEntry(draft("hello")));
        update(
            &mut app,
            Action::CreateFinished(Err("disk full".to_string())),
        );

        assert!(app.machine.matches(NewEntryDialogOpen));
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.description, "disk full");
    }

    #[test]
    fn test_submit_edit_transitions_before_persistence() {
        let mut app = test_app();
        app.machine.send(LoadPostPage);
        app.machine.send(EditingPost);

        let edited = test_post("id-1", "edited title");
        let effect = update(&mut app, Action::SubmitEdit(edited.clone()));

        // Back on the post page before the write has even been spawned.
        assert!(app.machine.matches(PostPage));
        assert_eq!(effect, Effect::UpdatePost(edited.clone()));
        assert_eq!(app.active_post, Some(edited));
    }

    #[test]
    fn test_failed_update_does_not_roll_back() {
        let mut app = test_app();
        app.machine.send(LoadPostPage);
        app.machine.send(EditingPost);
        update(&mut app, Action::SubmitEdit(test_post("id-1", "t")));

        update(
            &mut app,
            Action::UpdateFinished {
                title: "t".to_string(),
                error: Some("write failed".to_string()),
            },
        );

        assert!(app.machine.matches(PostPage));
        assert_eq!(app.notice.as_ref().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_cancel_edit_returns_without_effect() {
        let mut app = test_app();
        app.machine.send(LoadDashboardPage);
        app.machine.send(EditingPost);
        let effect = update(&mut app, Action::CancelEdit);
        assert_eq!(effect, Effect::None);
        assert!(app.machine.matches(Dashboard));
    }

    #[test]
    fn test_posts_changed_replaces_ids_without_clamping() {
        let mut app = test_app();
        app.focus.set_post_ids(vec!["a".into(), "b".into(), "c".into()]);
        app.focus.set_focus_index(Some(2));

        let posts = vec![test_post("a", "only one left")];
        update(&mut app, Action::PostsChanged(posts));

        assert_eq!(app.focus.post_ids(), ["a".to_string()]);
        assert_eq!(app.focus.focus_index(), Some(2));
        assert_eq!(app.focused_post(), None);
    }

    #[test]
    fn test_open_focused_post_fetches_and_transitions() {
        let mut app = test_app();
        app.machine.send(LoadDashboardPage);
        update(
            &mut app,
            Action::PostsChanged(vec![test_post("a", "first"), test_post("b", "second")]),
        );
        app.focus.set_focus_index(Some(1));

        let effect = update(&mut app, Action::OpenFocusedPost);

        assert!(app.machine.matches(PostPage));
        assert_eq!(effect, Effect::FetchPost("b".to_string()));
        assert_eq!(app.active_post.as_ref().unwrap().id, "b");
    }

    #[test]
    fn test_open_focused_post_without_focus_is_noop() {
        let mut app = test_app();
        app.machine.send(LoadDashboardPage);
        let effect = update(&mut app, Action::OpenFocusedPost);
        assert_eq!(effect, Effect::None);
        assert!(app.machine.matches(Dashboard));
    }

    #[test]
    fn test_confirmed_delete_decrements_focus() {
        let mut app = test_app();
        app.focus.set_post_ids(vec!["a".into(), "b".into()]);
        app.focus.set_focus_index(Some(1));

        let effect = update(&mut app, Action::ConfirmedDelete("b".to_string()));

        assert_eq!(effect, Effect::DeletePost("b".to_string()));
        assert_eq!(app.focus.focus_index(), Some(0));
    }

    #[test]
    fn test_fetch_of_vanished_post_closes_post_page() {
        let mut app = test_app();
        app.machine.send(LoadPostPage);
        app.active_post = Some(test_post("gone", "was here"));

        update(&mut app, Action::PostFetched(None));

        assert!(app.machine.matches(Dashboard));
        assert!(app.active_post.is_none());
    }

    #[test]
    fn test_posts_changed_refreshes_active_post() {
        let mut app = test_app();
        app.active_post = Some(test_post("a", "old title"));

        let mut newer = test_post("a", "new title");
        newer.updated_at += 5;
        update(&mut app, Action::PostsChanged(vec![newer]));

        assert_eq!(app.active_post.as_ref().unwrap().title, "new title");
    }

    #[test]
    fn test_notice_last_write_wins() {
        let mut app = test_app();
        update(
            &mut app,
            Action::CreateFinished(Err("first".to_string())),
        );
        update(
            &mut app,
            Action::DeleteFinished {
                title: "x".to_string(),
                error: None,
            },
        );
        // Only the delete notice remains visible.
        assert_eq!(app.notice.as_ref().unwrap().title, "Post deleted");
    }
}
