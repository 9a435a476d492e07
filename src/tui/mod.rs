//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into shortcut-machine dispatches and
//! [`Action`] values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! shortcut machine decides how each key is interpreted: `j` moves list
//! focus on the dashboard, walks to the next post on the post page, and is
//! just a letter inside the editor.
//!
//! ## Data flow
//!
//! Keyboard intents dispatch into the machine synchronously; anything that
//! touches storage goes through `update()` and comes back as an [`Effect`],
//! which this loop turns into a spawned tokio task. Finished tasks report
//! back over an `mpsc` channel that is drained once per iteration. A
//! watcher task re-lists the store every time its generation counter moves,
//! so every surface sees writes as soon as they commit.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::focus::FocusStore;
use crate::core::shortcut::{ShortcutEvent, UiState};
use crate::core::state::App;
use crate::storage::{JsonStore, MemoryStore, PostStore};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConfirmDelete, ConfirmEvent, DashboardState, EntryFormState, FormEvent, PostViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub dashboard: DashboardState,
    pub post_view: PostViewState,
    /// Present while the new-entry dialog or the editor is up.
    pub entry_form: Option<EntryFormState>,
    /// Present while a delete is waiting on confirmation.
    pub confirm: Option<ConfirmDelete>,
    pub toast_visible: bool,
    toast_seen_seq: u64,
    toast_deadline: Option<Instant>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            dashboard: DashboardState::new(),
            post_view: PostViewState::new(),
            entry_form: None,
            confirm: None,
            toast_visible: false,
            toast_seen_seq: 0,
            toast_deadline: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse capture, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build a store from the resolved config's backend name.
pub fn build_store(config: &ResolvedConfig) -> std::io::Result<Arc<dyn PostStore>> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        other => {
            if other != "json" {
                warn!("Unknown backend '{}', falling back to json", other);
            }
            let store = JsonStore::open(config.data_dir.join("posts"))
                .map_err(std::io::Error::other)?;
            Ok(Arc::new(store))
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let store = build_store(&config)?;
    // The memory backend is for throwaway runs; don't leave focus files
    // behind for it.
    let focus = if config.backend == "memory" {
        FocusStore::in_memory()
    } else {
        FocusStore::load(&config.data_dir)
    };

    let mut app = App::new(store.clone(), focus);
    // The dashboard is the landing page.
    app.machine.send(ShortcutEvent::LoadDashboardPage);

    let mut tui = TuiState::new();
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_store_watcher(store.clone(), tx.clone());

    // Re-render whenever the machine actually transitions.
    let mut machine_rx = app.machine.observe();

    let toast_ttl = Duration::from_secs(config.toast_seconds);
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        // Restart the toast timer whenever a new notice lands; drop the
        // toast once its time is up.
        if app.notice_seq != tui.toast_seen_seq {
            tui.toast_seen_seq = app.notice_seq;
            tui.toast_deadline = Some(Instant::now() + toast_ttl);
            tui.toast_visible = true;
            needs_redraw = true;
        }
        if tui.toast_visible
            && tui.toast_deadline.is_some_and(|d| Instant::now() >= d)
        {
            tui.toast_visible = false;
            needs_redraw = true;
        }

        // The form only exists while the machine is on a form surface.
        if tui.entry_form.is_some()
            && !matches!(
                app.machine.state(),
                UiState::Editing | UiState::NewEntryDialogOpen
            )
        {
            tui.entry_form = None;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit = true;
                continue;
            }

            // The confirmation overlay swallows everything while it's up.
            if tui.confirm.is_some() {
                let confirm_event = tui.confirm.as_mut().and_then(|c| c.handle_event(&event));
                match confirm_event {
                    Some(ConfirmEvent::Confirm) => {
                        if let Some(confirm) = tui.confirm.take() {
                            let effect =
                                update(&mut app, Action::ConfirmedDelete(confirm.post_id));
                            should_quit |= run_effect(effect, &app, &store, &tx);
                        }
                    }
                    Some(ConfirmEvent::Cancel) => tui.confirm = None,
                    None => {}
                }
                continue;
            }

            match app.machine.state() {
                UiState::PageLoad => {}

                UiState::Dashboard => match event {
                    TuiEvent::InputChar('q') => should_quit = true,
                    TuiEvent::InputChar('c') => {
                        app.machine.send(ShortcutEvent::AddNewEntry);
                        tui.entry_form = Some(EntryFormState::new_draft());
                    }
                    TuiEvent::InputChar('?') => {
                        app.machine.send(ShortcutEvent::ShowAvailableShortcuts);
                    }
                    TuiEvent::InputChar('j') | TuiEvent::CursorDown => {
                        app.focus.increment_focus_index();
                    }
                    TuiEvent::InputChar('k') | TuiEvent::CursorUp => {
                        app.focus.decrement_focus_index();
                    }
                    TuiEvent::InputChar('e') => {
                        if let Some(post) = app.focused_post().cloned() {
                            app.machine.send(ShortcutEvent::EditingPost);
                            tui.entry_form = Some(EntryFormState::for_post(&post));
                        }
                    }
                    TuiEvent::Submit => {
                        let effect = update(&mut app, Action::OpenFocusedPost);
                        should_quit |= run_effect(effect, &app, &store, &tx);
                    }
                    TuiEvent::DeleteKey => {
                        if let Some(post) = app.focused_post() {
                            tui.confirm =
                                Some(ConfirmDelete::new(post.id.clone(), post.title.clone()));
                        }
                    }
                    // Hovering a row focuses it, same as j/k landing there.
                    TuiEvent::MouseMove(_col, row) => {
                        let area = ui::main_area(terminal.get_frame().area());
                        let offset = tui.dashboard.list_state.offset();
                        if let Some(idx) =
                            DashboardState::hit_test(area, row, app.posts.len(), offset)
                        {
                            app.focus.set_focus_index(Some(idx));
                        }
                    }
                    _ => {}
                },

                UiState::PostPage => match event {
                    TuiEvent::Escape => {
                        app.machine.send(ShortcutEvent::ClosePost);
                    }
                    TuiEvent::InputChar('q') => should_quit = true,
                    TuiEvent::InputChar('?') => {
                        app.machine.send(ShortcutEvent::ShowAvailableShortcuts);
                    }
                    TuiEvent::InputChar('e') => {
                        if let Some(post) = app.active_post.clone() {
                            app.machine.send(ShortcutEvent::EditingPost);
                            tui.entry_form = Some(EntryFormState::for_post(&post));
                        }
                    }
                    // j/k walk the dashboard order without leaving the page.
                    TuiEvent::InputChar('j') => {
                        let len = app.focus.post_ids().len();
                        if app.focus.focus_index().is_some_and(|i| i + 1 < len) {
                            app.focus.increment_focus_index();
                            let effect = update(&mut app, Action::OpenFocusedPost);
                            should_quit |= run_effect(effect, &app, &store, &tx);
                            tui.post_view = PostViewState::new();
                        }
                    }
                    TuiEvent::InputChar('k') => {
                        if app.focus.focus_index().is_some_and(|i| i > 0) {
                            app.focus.decrement_focus_index();
                            let effect = update(&mut app, Action::OpenFocusedPost);
                            should_quit |= run_effect(effect, &app, &store, &tx);
                            tui.post_view = PostViewState::new();
                        }
                    }
                    other => tui.post_view.handle_event(&other),
                },

                UiState::HelpDrawerOpen => {
                    if matches!(event, TuiEvent::Escape | TuiEvent::InputChar('?')) {
                        app.machine.send(ShortcutEvent::CloseHelpDrawer);
                    }
                }

                UiState::NewEntryDialogOpen => {
                    let form_event = tui.entry_form.as_mut().and_then(|f| f.handle_event(&event));
                    match form_event {
                        Some(FormEvent::Save) => {
                            if let Some(form) = &tui.entry_form {
                                let effect =
                                    update(&mut app, Action::SubmitNewEntry(form.draft()));
                                should_quit |= run_effect(effect, &app, &store, &tx);
                            }
                            // The dialog stays up until CreateFinished says
                            // the write landed.
                        }
                        Some(FormEvent::Cancel) => {
                            app.machine.send(ShortcutEvent::CloseNewEntryDialog);
                            tui.entry_form = None;
                        }
                        None => {}
                    }
                }

                UiState::Editing => {
                    let form_event = tui.entry_form.as_mut().and_then(|f| f.handle_event(&event));
                    match form_event {
                        Some(FormEvent::Save) => {
                            if let Some(form) = tui.entry_form.take() {
                                let base = form
                                    .editing_id
                                    .as_ref()
                                    .and_then(|id| app.posts.iter().find(|p| &p.id == id))
                                    .cloned()
                                    .or_else(|| app.active_post.clone());
                                match base {
                                    Some(base) => {
                                        let updated = form.apply_to(base);
                                        let effect =
                                            update(&mut app, Action::SubmitEdit(updated));
                                        should_quit |= run_effect(effect, &app, &store, &tx);
                                    }
                                    None => {
                                        // The post disappeared mid-edit;
                                        // nothing left to save into.
                                        let effect = update(&mut app, Action::CancelEdit);
                                        should_quit |= run_effect(effect, &app, &store, &tx);
                                    }
                                }
                            }
                        }
                        Some(FormEvent::Cancel) => {
                            let effect = update(&mut app, Action::CancelEdit);
                            should_quit |= run_effect(effect, &app, &store, &tx);
                            tui.entry_form = None;
                        }
                        None => {}
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (storage results, list refreshes)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            should_quit |= run_effect(effect, &app, &store, &tx);
        }

        if machine_rx.has_changed().unwrap_or(false) {
            machine_rx.borrow_and_update();
            needs_redraw = true;
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Execute an effect by spawning the matching storage task. Returns true
/// when the loop should exit.
fn run_effect(
    effect: Effect,
    app: &App,
    store: &Arc<dyn PostStore>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::CreatePost(draft) => {
            spawn_create(store.clone(), draft, tx.clone());
            false
        }
        Effect::UpdatePost(post) => {
            spawn_update(store.clone(), post, tx.clone());
            false
        }
        Effect::DeletePost(id) => {
            let title = app
                .posts
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.title.clone())
                .unwrap_or_default();
            spawn_delete(store.clone(), id, title, tx.clone());
            false
        }
        Effect::FetchPost(id) => {
            spawn_fetch(store.clone(), id, tx.clone());
            false
        }
    }
}

/// Re-list whenever the store's generation counter moves, starting with
/// one initial listing. Ends when the receiver goes away.
fn spawn_store_watcher(store: Arc<dyn PostStore>, tx: mpsc::Sender<Action>) {
    let mut generation = store.watch();
    tokio::spawn(async move {
        loop {
            match store.list().await {
                Ok(posts) => {
                    if tx.send(Action::PostsChanged(posts)).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Store list failed: {}", e),
            }
            if generation.changed().await.is_err() {
                break;
            }
        }
    });
}

fn spawn_create(
    store: Arc<dyn PostStore>,
    draft: crate::storage::PostDraft,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning create for \"{}\"", draft.title);
    tokio::spawn(async move {
        let result = store.create(draft).await.map_err(|e| e.to_string());
        if tx.send(Action::CreateFinished(result)).is_err() {
            warn!("Create finished but the event loop is gone");
        }
    });
}

fn spawn_update(store: Arc<dyn PostStore>, post: crate::storage::Post, tx: mpsc::Sender<Action>) {
    info!("Spawning update for {}", post.id);
    let title = post.title.clone();
    tokio::spawn(async move {
        let error = store.update(post).await.err().map(|e| e.to_string());
        if tx.send(Action::UpdateFinished { title, error }).is_err() {
            warn!("Update finished but the event loop is gone");
        }
    });
}

fn spawn_delete(store: Arc<dyn PostStore>, id: String, title: String, tx: mpsc::Sender<Action>) {
    info!("Spawning delete for {}", id);
    tokio::spawn(async move {
        let error = store.delete(&id).await.err().map(|e| e.to_string());
        if tx.send(Action::DeleteFinished { title, error }).is_err() {
            warn!("Delete finished but the event loop is gone");
        }
    });
}

fn spawn_fetch(store: Arc<dyn PostStore>, id: String, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let post = match store.get(&id).await {
            Ok(post) => post,
            Err(e) => {
                warn!("Fetch of {} failed: {}", id, e);
                None
            }
        };
        let _ = tx.send(Action::PostFetched(post));
    });
}
