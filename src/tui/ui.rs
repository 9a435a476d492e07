use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Clear;

use crate::core::shortcut::{Page, UiState};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    Dashboard, EntryForm, HelpDrawer, PostView, TitleBar, Toast, centered_rect,
};

/// Draw the whole frame: title bar, the surface the machine says is
/// active, any overlays, and the footer hints.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, footer_area] = layout.areas(frame.area());

    TitleBar::new(
        app.store.name().to_string(),
        app.posts.len(),
        surface_label(app.machine.state()).to_string(),
    )
    .render(frame, title_area);

    match app.machine.state() {
        UiState::PageLoad | UiState::Dashboard => {
            draw_dashboard(frame, main_area, app, tui);
        }
        UiState::PostPage => draw_post_page(frame, main_area, app, tui),

        UiState::Editing => {
            if let Some(form) = &mut tui.entry_form {
                EntryForm::new(form).render(frame, main_area);
            }
        }

        UiState::NewEntryDialogOpen => {
            draw_dashboard(frame, main_area, app, tui);
            let dialog = centered_rect(70, 70, main_area);
            frame.render_widget(Clear, dialog);
            if let Some(form) = &mut tui.entry_form {
                EntryForm::new(form).render(frame, dialog);
            }
        }

        UiState::HelpDrawerOpen => {
            // The page that opened the drawer stays underneath.
            match app.machine.context().page {
                Some(Page::PostPage) => draw_post_page(frame, main_area, app, tui),
                _ => draw_dashboard(frame, main_area, app, tui),
            }
            HelpDrawer::render(frame, main_area);
        }
    }

    if let Some(confirm) = &tui.confirm {
        confirm.render(frame, main_area);
    }

    if tui.toast_visible {
        if let Some(notice) = &app.notice {
            Toast::render(frame, main_area, notice);
        }
    }

    let footer = Span::styled(
        keybinding_hints(app.machine.state(), tui.confirm.is_some()),
        Style::default().fg(Color::DarkGray),
    );
    frame.render_widget(footer, footer_area);
}

fn draw_dashboard(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    Dashboard::new(&app.posts, app.focus.focus_index(), &mut tui.dashboard).render(frame, area);
}

fn draw_post_page(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    PostView::new(app.active_post.as_ref(), &mut tui.post_view).render(frame, area);
}

/// The main content rect for the given frame area — used for mouse hit
/// testing outside the draw pass.
pub fn main_area(frame_area: Rect) -> Rect {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [_title, main, _footer] = layout.areas(frame_area);
    main
}

fn surface_label(state: UiState) -> &'static str {
    match state {
        UiState::PageLoad => "Loading",
        UiState::Dashboard => "Dashboard",
        UiState::PostPage => "Post",
        UiState::Editing => "Editing",
        UiState::HelpDrawerOpen => "Help",
        UiState::NewEntryDialogOpen => "New entry",
    }
}

fn keybinding_hints(state: UiState, confirming: bool) -> &'static str {
    if confirming {
        return " y Confirm  n/Esc Cancel";
    }
    match state {
        UiState::PageLoad => "",
        UiState::Dashboard => {
            " j/k Navigate  Enter Open  c New  e Edit  Del Delete  ? Help  q Quit"
        }
        UiState::PostPage => " j/k Next/Prev  e Edit  ? Help  Esc Back  q Quit",
        UiState::Editing | UiState::NewEntryDialogOpen => {
            " Ctrl+S Save  Esc Cancel  Tab Switch field"
        }
        UiState::HelpDrawerOpen => " Esc Close",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shortcut::ShortcutEvent;
    use crate::test_support::{test_app, test_post};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_dashboard_smoke() {
        let mut app = test_app();
        app.machine.send(ShortcutEvent::LoadDashboardPage);
        app.posts = vec![test_post("a", "hello world")];
        let mut tui = TuiState::new();
        let text = rendered(&app, &mut tui);
        assert!(text.contains("hello world"));
        assert!(text.contains("quill (backend: memory)"));
    }

    #[test]
    fn test_draw_help_drawer_over_dashboard() {
        let mut app = test_app();
        app.machine.send(ShortcutEvent::LoadDashboardPage);
        app.machine.send(ShortcutEvent::ShowAvailableShortcuts);
        let mut tui = TuiState::new();
        let text = rendered(&app, &mut tui);
        assert!(text.contains("Add new entry"));
    }

    #[test]
    fn test_draw_post_page() {
        let mut app = test_app();
        app.machine.send(ShortcutEvent::LoadPostPage);
        app.active_post = Some(test_post("a", "the title"));
        let mut tui = TuiState::new();
        let text = rendered(&app, &mut tui);
        assert!(text.contains("the title"));
    }

    #[test]
    fn test_main_area_excludes_chrome() {
        let area = Rect::new(0, 0, 80, 24);
        let main = main_area(area);
        assert_eq!(main.y, 1);
        assert_eq!(main.height, 22);
    }
}
