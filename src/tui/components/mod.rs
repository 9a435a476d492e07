//! # TUI Components
//!
//! All UI components for the terminal interface, one file per component.
//! Stateless components (title bar, toast, help drawer) receive everything
//! as props; stateful components (dashboard, post view, entry form) follow
//! the persistent state + transient wrapper pattern — the `*State` struct
//! lives in `TuiState`, and a thin wrapper borrows it each frame.
//!
//! Components receive data explicitly rather than reaching into global
//! state, so each file can be read and tested on its own.

pub mod confirm;
pub mod dashboard;
pub mod entry_form;
pub mod help_drawer;
pub mod post_view;
pub mod title_bar;
pub mod toast;

pub use confirm::{ConfirmDelete, ConfirmEvent};
pub use dashboard::{Dashboard, DashboardState};
pub use entry_form::{EntryForm, EntryFormState, FormEvent};
pub use help_drawer::HelpDrawer;
pub use post_view::{PostView, PostViewState};
pub use title_bar::TitleBar;
pub use toast::Toast;

use ratatui::layout::{Constraint, Layout, Rect};

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
