//! # TitleBar Component
//!
//! Top status bar: app name, active backend, entry count, and a context
//! hint for the current surface. Purely presentational — all fields are
//! props, so it renders exactly what it's given.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// Name of the active storage backend (e.g. "json").
    pub backend_name: String,
    /// Number of posts in the journal.
    pub post_count: usize,
    /// Context-dependent hint, e.g. "? Help".
    pub hint: String,
}

impl TitleBar {
    pub fn new(backend_name: String, post_count: usize, hint: String) -> Self {
        Self {
            backend_name,
            post_count,
            hint,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let entries = match self.post_count {
            1 => "1 entry".to_string(),
            n => format!("{} entries", n),
        };
        let title_text = if self.hint.is_empty() {
            format!("quill (backend: {}) | {}", self.backend_name, entries)
        } else {
            format!(
                "quill (backend: {}) | {} | {}",
                self.backend_name, entries, self.hint
            )
        };
        frame.render_widget(Span::raw(title_text), area);
    }
}
